#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod remediation;
pub mod reward;
pub mod time;

pub use error::ContentError;
pub use time::Clock;
