//! Line-oriented terminal front end over the learning services.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

use academy_core::model::SignCategory;
use academy_core::remediation::ReviewStep;
use services::quiz::QuizStep;
use services::signs::SignStep;
use services::{
    ActiveView, AppServices, LearnerSession, QuizSession, QuizState, ScenarioSession,
    ScenarioState, SignDrill,
};

use crate::vm::{
    ReviewCardVm, ScenarioVm, StatsVm, answer_feedback, chat_line, choice_feedback, map_question,
    parse_option,
};

/// Which activity the shell opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Hub,
    Coach,
    Signs,
}

pub struct Shell<R, W> {
    services: AppServices,
    learner: LearnerSession,
    input: Lines<R>,
    out: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(services: AppServices, input: R, out: W) -> Self {
        let learner = services.new_learner();
        Self {
            services,
            learner,
            input: input.lines(),
            out,
        }
    }

    #[cfg(test)]
    fn learner(&self) -> &LearnerSession {
        &self.learner
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }

    /// Run until the learner exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from the terminal.
    pub async fn run(&mut self, mode: Mode) -> io::Result<()> {
        match mode {
            Mode::Hub => self.hub().await,
            Mode::Coach => self.coach().await,
            Mode::Signs => self.signs().await,
        }
    }

    // ─── I/O ───────────────────────────────────────────────────────────────────

    async fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        self.out.write_all(line.as_ref().as_bytes()).await?;
        self.out.write_all(b"\n").await
    }

    async fn say_all(&mut self, lines: Vec<String>) -> io::Result<()> {
        for line in lines {
            self.say(line).await?;
        }
        Ok(())
    }

    /// Prompt and read one line. `None` at end of input.
    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await?;
        let line = self.input.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    // ─── HUB ───────────────────────────────────────────────────────────────────

    async fn hub(&mut self) -> io::Result<()> {
        self.say("Ohio Driving Academy").await?;
        if !self.services.is_online() {
            self.say("(offline: built-in practice content)").await?;
        }
        loop {
            let stats = StatsVm::from(self.learner.stats());
            self.say("").await?;
            self.say(stats.headline()).await?;
            self.say(stats.progress_bar()).await?;
            self.say(stats.badge_line()).await?;
            if self.learner.active_view() == ActiveView::Booking {
                self.say("Lesson booking is handled at the front desk. [d] back to dashboard")
                    .await?;
            }
            let queued = self.learner.remediation().len();
            self.say(format!(
                "[q] Theory quiz  [s] Scenario  [r] Review cards ({queued})  [c] Coach Alex  \
                 [g] Road signs  [b] Booking  [x] Exit"
            ))
            .await?;

            let Some(choice) = self.ask("> ").await? else {
                return Ok(());
            };
            match choice.to_ascii_lowercase().as_str() {
                "q" => self.quiz().await?,
                "s" => self.scenario().await?,
                "r" => self.review().await?,
                "c" => self.coach().await?,
                "g" => self.signs().await?,
                "b" => self.learner.set_active_view(ActiveView::Booking),
                "d" => self.learner.set_active_view(ActiveView::Dashboard),
                "x" => return Ok(()),
                "" => {}
                other => self.say(format!("Unknown choice: {other}")).await?,
            }
        }
    }

    // ─── QUIZ ──────────────────────────────────────────────────────────────────

    async fn quiz(&mut self) -> io::Result<()> {
        let quiz_loop = self.services.quiz_loop();
        let mut quiz = QuizSession::new();
        loop {
            match quiz.state().clone() {
                QuizState::Loading => {
                    self.say("Generating your quiz...").await?;
                    if let Err(err) = quiz_loop.start(&mut quiz).await {
                        self.say(format!("Could not load the quiz: {err}")).await?;
                    }
                }
                QuizState::Failed { .. } => {
                    if !self.confirm("Try again? [y/n] ").await? {
                        return Ok(());
                    }
                    self.say("Generating your quiz...").await?;
                    if let Err(err) = quiz_loop.start(&mut quiz).await {
                        self.say(format!("Could not load the quiz: {err}")).await?;
                    }
                }
                QuizState::Active {
                    selection: None, ..
                } => {
                    let Some(vm) = map_question(&quiz) else {
                        return Ok(());
                    };
                    self.say("").await?;
                    self.say_all(vm.lines()).await?;
                    let Some(input) = self.ask("Answer (a-d, x to leave): ").await? else {
                        return Ok(());
                    };
                    if input.eq_ignore_ascii_case("x") {
                        return Ok(());
                    }
                    let Some(option) = parse_option(&input, vm.options.len()) else {
                        self.say("Pick one of the listed options.").await?;
                        continue;
                    };
                    let level_before = self.learner.stats().level();
                    let report = match quiz_loop.answer(&mut quiz, &mut self.learner, option).await {
                        Ok(report) => report,
                        Err(err) => {
                            self.say(err.to_string()).await?;
                            continue;
                        }
                    };
                    if let Some((_, question)) = quiz.current() {
                        let lines = answer_feedback(question, &report);
                        self.say_all(lines).await?;
                    }
                    self.announce_level(level_before).await?;
                    if report.open_review {
                        self.say("Three cards are waiting. Time for a quick review!").await?;
                        self.review().await?;
                    }
                }
                QuizState::Active { .. } => {
                    if self.ask("Press Enter to continue ").await?.is_none() {
                        return Ok(());
                    }
                    if let Ok(QuizStep::Completed(result)) = quiz.advance() {
                        debug!(?result, "quiz pass finished");
                    }
                }
                QuizState::Completed(result) => {
                    self.say(format!(
                        "Quiz complete: {} of {} correct.",
                        result.correct_count, result.total
                    ))
                    .await?;
                    if !self.confirm("Take another quiz? [y/n] ").await? {
                        return Ok(());
                    }
                    self.say("Generating your quiz...").await?;
                    if let Err(err) = quiz_loop.restart(&mut quiz).await {
                        self.say(format!("Could not load the quiz: {err}")).await?;
                    }
                }
            }
        }
    }

    // ─── SCENARIO ──────────────────────────────────────────────────────────────

    async fn scenario(&mut self) -> io::Result<()> {
        let scenario_loop = self.services.scenario_loop();
        let mut session = ScenarioSession::new();
        loop {
            match session.state().clone() {
                ScenarioState::Loading => {
                    self.say("Setting up your mission...").await?;
                    if let Err(err) = scenario_loop.start(&mut session).await {
                        self.say(format!("Could not load a scenario: {err}")).await?;
                    }
                }
                ScenarioState::Failed { .. } => {
                    if !self.confirm("Try again? [y/n] ").await? {
                        return Ok(());
                    }
                    self.say("Setting up your mission...").await?;
                    if let Err(err) = scenario_loop.start(&mut session).await {
                        self.say(format!("Could not load a scenario: {err}")).await?;
                    }
                }
                ScenarioState::Active {
                    selection: None, ..
                } => {
                    let Some(vm) = ScenarioVm::from_session(&session) else {
                        return Ok(());
                    };
                    self.say("").await?;
                    self.say(&vm.scene).await?;
                    self.say(&vm.context).await?;
                    self.say_all(vm.options.clone()).await?;
                    let Some(input) = self.ask("Your move (x to leave): ").await? else {
                        return Ok(());
                    };
                    if input.eq_ignore_ascii_case("x") {
                        return Ok(());
                    }
                    let Some(option) = parse_option(&input, vm.options.len()) else {
                        self.say("Pick one of the listed options.").await?;
                        continue;
                    };
                    let level_before = self.learner.stats().level();
                    match scenario_loop.choose(&mut session, &mut self.learner, option) {
                        Ok(report) => self.say_all(choice_feedback(&report)).await?,
                        Err(err) => self.say(err.to_string()).await?,
                    }
                    self.announce_level(level_before).await?;
                }
                ScenarioState::Active { .. } => {
                    if !self.confirm("Next mission? [y/n] ").await? {
                        return Ok(());
                    }
                    self.say("Setting up your mission...").await?;
                    if let Err(err) = scenario_loop.next(&mut session).await {
                        self.say(format!("Could not load a scenario: {err}")).await?;
                    }
                }
            }
        }
    }

    // ─── REVIEW ────────────────────────────────────────────────────────────────

    async fn review(&mut self) -> io::Result<()> {
        let started = self
            .learner
            .remediation_mut()
            .start_review()
            .map(ReviewCardVm::from);
        let mut card = match started {
            Ok(card) => card,
            Err(err) => return self.say(format!("Nothing to review: {err}")).await,
        };
        loop {
            self.say("").await?;
            self.say(format!("{} [{}]", card.heading, card.category)).await?;
            self.say(&card.text).await?;
            let prompt = if card.is_last {
                "[f] flip  [n] finish  [x] close: "
            } else {
                "[f] flip  [n] next  [x] close: "
            };
            let Some(input) = self.ask(prompt).await? else {
                return Ok(());
            };
            let queue = self.learner.remediation_mut();
            match input.to_ascii_lowercase().as_str() {
                "f" | "" => {
                    if let Err(err) = queue.flip() {
                        self.say(err.to_string()).await?;
                    }
                }
                "n" => {
                    if let Ok(ReviewStep::Finished { reviewed }) = queue.advance() {
                        return self.say(format!("Review done: {reviewed} cards cleared.")).await;
                    }
                }
                "x" => {
                    let cleared = queue.cancel().unwrap_or_default();
                    return self.say(format!("Review closed: {cleared} cards cleared.")).await;
                }
                _ => continue,
            }
            match self.learner.remediation().current() {
                Some(current) => card = ReviewCardVm::from(current),
                None => return Ok(()),
            }
        }
    }

    // ─── COACH ─────────────────────────────────────────────────────────────────

    async fn coach(&mut self) -> io::Result<()> {
        let coach = self.services.coach();
        let mut conversation = coach.start_conversation();
        for message in conversation.messages() {
            self.say(chat_line(message)).await?;
        }
        loop {
            let Some(input) = self.ask("You (empty line to leave): ").await? else {
                return Ok(());
            };
            if input.is_empty() {
                return Ok(());
            }
            if let Some(reply) = coach.send(&mut conversation, &input).await {
                self.say(chat_line(reply)).await?;
            }
        }
    }

    // ─── SIGNS ─────────────────────────────────────────────────────────────────

    async fn signs(&mut self) -> io::Result<()> {
        let mut drill = SignDrill::new();
        loop {
            let Some(sign) = drill.current().copied() else {
                self.say(format!("Drill complete: {} of {} correct.", drill.score(), drill.total()))
                    .await?;
                if !self.confirm("Play again? [y/n] ").await? {
                    return Ok(());
                }
                let _ = drill.restart();
                continue;
            };
            self.say("").await?;
            self.say(format!("Sign {} of {}: {}", drill.index() + 1, drill.total(), sign.name))
                .await?;
            self.say(sign.description).await?;
            let Some(input) = self
                .ask("[r] Regulatory  [w] Warning  [g] Guide  [x] leave: ")
                .await?
            else {
                return Ok(());
            };
            let category = match input.to_ascii_lowercase().as_str() {
                "r" => SignCategory::Regulatory,
                "w" => SignCategory::Warning,
                "g" => SignCategory::Guide,
                "x" => return Ok(()),
                _ => continue,
            };
            let message = match drill.guess(category) {
                Ok(feedback) => feedback.message.clone(),
                Err(err) => err.to_string(),
            };
            self.say(message).await?;
            if let Ok(SignStep::Completed { score, total }) = drill.next() {
                debug!(score, total, "sign drill finished");
            }
        }
    }

    // ─── HELPERS ───────────────────────────────────────────────────────────────

    async fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self
            .ask(prompt)
            .await?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }

    async fn announce_level(&mut self, level_before: u64) -> io::Result<()> {
        let level = self.learner.stats().level();
        if level > level_before {
            self.say(format!("Level up! You reached level {level}.")).await?;
        }
        Ok(())
    }
}
