use std::sync::Arc;

use academy_core::model::{Flashcard, FlashcardId, QuizQuestion};
use academy_core::remediation::{CardFace, ReviewStep};
use academy_core::time::fixed_now;
use services::quiz::{QuizResult, QuizState, QuizStep, Remediation};
use services::{InMemoryContentProvider, LearnerSession, LoadOutcome, QuizLoopService, QuizSession};

fn question(n: usize) -> QuizQuestion {
    QuizQuestion::new(
        format!("Question {n}"),
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        n % 4,
        format!("Explanation {n}"),
    )
    .expect("valid question")
}

fn card(n: usize) -> Flashcard {
    Flashcard::new(FlashcardId::new(format!("card-{n}")), format!("front {n}"), format!("back {n}"), "Theory")
}

#[tokio::test]
async fn five_question_pass_with_two_misses() {
    let provider = Arc::new(InMemoryContentProvider::new());
    provider.push_quiz((0..5).map(question).collect());
    provider.push_flashcard(card(1));
    provider.push_flashcard(card(3));
    let service = QuizLoopService::new(provider.clone());

    let mut quiz = QuizSession::new();
    let mut learner = LearnerSession::new(fixed_now());
    assert_eq!(service.start(&mut quiz).await.expect("load quiz"), LoadOutcome::Applied);

    for n in 0..5 {
        let correct = n % 4;
        let pick = if n == 1 || n == 3 { (correct + 1) % 4 } else { correct };
        let report = service
            .answer(&mut quiz, &mut learner, pick)
            .await
            .expect("answer");
        assert_eq!(report.outcome.is_correct(), n != 1 && n != 3);
        if n == 3 {
            assert_eq!(report.remediation, Some(Remediation::Queued { queue_len: 2 }));
        }
        quiz.advance().expect("advance");
    }

    assert_eq!(
        quiz.state(),
        &QuizState::Completed(QuizResult {
            correct_count: 3,
            total: 5
        })
    );
    assert_eq!(learner.stats().xp(), 250 + 3 * 100);
    assert_eq!(learner.remediation().len(), 2);
    assert_eq!(
        provider.flashcard_topics(),
        vec!["Question 1".to_string(), "Question 3".to_string()]
    );
}

#[tokio::test]
async fn third_miss_opens_review_which_drains_queue() {
    let provider = Arc::new(InMemoryContentProvider::new());
    provider.push_quiz((0..3).map(question).collect());
    for n in 0..3 {
        provider.push_flashcard(card(n));
    }
    let service = QuizLoopService::new(provider);

    let mut quiz = QuizSession::new();
    let mut learner = LearnerSession::new(fixed_now());
    service.start(&mut quiz).await.expect("load quiz");

    let mut open_review = false;
    for n in 0..3 {
        let wrong = (n % 4 + 1) % 4;
        let report = service
            .answer(&mut quiz, &mut learner, wrong)
            .await
            .expect("answer");
        open_review = report.open_review;
        if matches!(quiz.advance().expect("advance"), QuizStep::Completed(_)) {
            break;
        }
    }
    assert!(open_review);

    let queue = learner.remediation_mut();
    let first = queue.start_review().expect("start review");
    assert_eq!(first.card.id.as_str(), "card-0");
    assert_eq!(first.face, CardFace::Front);
    assert_eq!(queue.flip().expect("flip"), CardFace::Back);
    assert_eq!(queue.current().expect("current").visible_text(), "back 0");

    assert_eq!(queue.advance().expect("advance"), ReviewStep::Next { position: 1 });
    assert_eq!(queue.current().expect("current").face, CardFace::Front);
    assert_eq!(queue.advance().expect("advance"), ReviewStep::Next { position: 2 });
    assert_eq!(queue.advance().expect("advance"), ReviewStep::Finished { reviewed: 3 });
    assert!(queue.is_empty());
    assert!(!queue.is_reviewing());
}

#[tokio::test]
async fn failed_load_then_retry() {
    let provider = Arc::new(InMemoryContentProvider::new());
    provider.push_quiz_failure();
    provider.push_quiz(vec![question(0)]);
    let service = QuizLoopService::new(provider);
    let mut quiz = QuizSession::new();

    assert!(service.start(&mut quiz).await.is_err());
    assert!(matches!(quiz.state(), QuizState::Failed { .. }));

    service.start(&mut quiz).await.expect("retry");
    assert_eq!(quiz.total(), 1);
}

#[tokio::test]
async fn restart_fetches_a_new_set() {
    let provider = Arc::new(InMemoryContentProvider::new());
    provider.push_quiz(vec![question(0)]);
    provider.push_quiz(vec![question(7), question(8)]);
    let service = QuizLoopService::new(provider);
    let mut quiz = QuizSession::new();
    let mut learner = LearnerSession::new(fixed_now());

    service.start(&mut quiz).await.expect("load");
    service.answer(&mut quiz, &mut learner, 0).await.expect("answer");
    quiz.advance().expect("advance");
    assert!(quiz.result().expect("completed").is_perfect());

    service.restart(&mut quiz).await.expect("restart");
    assert_eq!(quiz.total(), 2);
    assert_eq!(quiz.correct_count(), 0);
    assert_eq!(quiz.current().expect("active").1.question, "Question 7");
}
