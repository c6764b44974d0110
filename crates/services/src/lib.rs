#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod generation;
pub mod study_loop;

pub use study_core::Clock;

pub use config::GenerationConfig;
pub use error::{ConfigError, GenerationError, MalformedResponse};
pub use generation::{FlashcardGenerator, HttpGenerationClient};
pub use study_loop::{GenerationOutcome, StudyLoopService};
