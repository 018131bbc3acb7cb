use std::sync::Arc;

use tracing::{info, warn};

use crate::Clock;
use crate::coach::CoachService;
use crate::learner::LearnerSession;
use crate::provider::{
    ContentProvider, HttpContentProvider, InMemoryContentProvider, ProviderConfig,
    quiz_size_from_env,
};
use crate::quiz::QuizLoopService;
use crate::scenario::ScenarioLoopService;

/// Startup switches read from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Serve built-in content instead of calling the remote provider.
    pub offline: bool,
    /// Overrides `ACADEMY_QUIZ_SIZE`. Offline, it caps the built-in quiz set.
    pub quiz_size: Option<usize>,
}

/// Assembles app-facing services around one content provider.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    provider: Arc<dyn ContentProvider>,
    online: bool,
    quiz_loop: Arc<QuizLoopService>,
    scenario_loop: Arc<ScenarioLoopService>,
    coach: Arc<CoachService>,
}

impl AppServices {
    /// Build services from `ACADEMY_AI_*` settings.
    ///
    /// Falls back to built-in content when offline is requested or no
    /// provider is configured.
    #[must_use]
    pub fn from_env(clock: Clock, options: ServiceOptions) -> Self {
        let quiz_size = options.quiz_size.or_else(quiz_size_from_env);
        if options.offline {
            info!("offline mode: serving built-in content");
            return Self::offline_with_quiz_size(clock, quiz_size);
        }
        let Some(mut config) = ProviderConfig::from_env() else {
            warn!("ACADEMY_AI_API_KEY not set; serving built-in content");
            return Self::offline_with_quiz_size(clock, quiz_size);
        };
        if let Some(size) = quiz_size {
            config = config.with_quiz_size(size);
        }
        info!(base_url = %config.base_url, model = %config.model, "remote content provider");
        Self::with_provider(clock, Arc::new(HttpContentProvider::new(Some(config))), true)
    }

    /// Services backed by built-in sample content.
    #[must_use]
    pub fn offline(clock: Clock) -> Self {
        Self::offline_with_quiz_size(clock, None)
    }

    fn offline_with_quiz_size(clock: Clock, quiz_size: Option<usize>) -> Self {
        let mut provider = InMemoryContentProvider::with_sample_content();
        if let Some(size) = quiz_size {
            provider = provider.with_sample_quiz_size(size);
        }
        Self::with_provider(clock, Arc::new(provider), false)
    }

    #[must_use]
    pub fn with_provider(clock: Clock, provider: Arc<dyn ContentProvider>, online: bool) -> Self {
        Self {
            clock,
            quiz_loop: Arc::new(QuizLoopService::new(Arc::clone(&provider))),
            scenario_loop: Arc::new(ScenarioLoopService::new(Arc::clone(&provider))),
            coach: Arc::new(CoachService::new(Arc::clone(&provider), clock)),
            provider,
            online,
        }
    }

    /// A fresh learner sitting stamped with the service clock.
    #[must_use]
    pub fn new_learner(&self) -> LearnerSession {
        LearnerSession::new(self.clock.now())
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online
    }

    #[must_use]
    pub fn provider(&self) -> Arc<dyn ContentProvider> {
        Arc::clone(&self.provider)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn scenario_loop(&self) -> Arc<ScenarioLoopService> {
        Arc::clone(&self.scenario_loop)
    }

    #[must_use]
    pub fn coach(&self) -> Arc<CoachService> {
        Arc::clone(&self.coach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::time::{fixed_clock, fixed_now};

    #[test]
    fn offline_services_share_clock() {
        let services = AppServices::from_env(
            fixed_clock(),
            ServiceOptions {
                offline: true,
                quiz_size: None,
            },
        );
        assert!(!services.is_online());
        assert_eq!(services.new_learner().started_at(), fixed_now());
    }

    #[tokio::test]
    async fn offline_quiz_honours_requested_size() {
        let services = AppServices::from_env(
            fixed_clock(),
            ServiceOptions {
                offline: true,
                quiz_size: Some(2),
            },
        );
        let mut quiz = crate::quiz::QuizSession::new();
        services.quiz_loop().start(&mut quiz).await.unwrap();
        assert_eq!(quiz.total(), 2);
    }

    #[tokio::test]
    async fn offline_quiz_uses_sample_set() {
        let services = AppServices::offline(fixed_clock());
        let mut quiz = crate::quiz::QuizSession::new();
        services.quiz_loop().start(&mut quiz).await.unwrap();
        assert_eq!(quiz.total(), crate::provider::DEFAULT_QUIZ_SIZE);
    }
}
