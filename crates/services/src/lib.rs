#![forbid(unsafe_code)]

pub mod app_services;
pub mod coach;
pub mod error;
pub mod generation;
pub mod learner;
pub mod provider;
pub mod quiz;
pub mod scenario;
pub mod signs;

pub use academy_core::Clock;

pub use app_services::{AppServices, ServiceOptions};
pub use coach::{CoachConversation, CoachService};
pub use error::{ProviderError, QuizError, ScenarioError, SignDrillError};
pub use generation::{Generation, LoadOutcome, LoadTicket};
pub use learner::{ActiveView, LearnerSession};
pub use provider::{ContentProvider, HttpContentProvider, InMemoryContentProvider, ProviderConfig};
pub use quiz::{AnswerReport, QuizLoopService, QuizSession, QuizState};
pub use scenario::{ScenarioLoopService, ScenarioSession, ScenarioState};
pub use signs::SignDrill;
