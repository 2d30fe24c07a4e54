#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod quiz;

pub use api::{Ack, AnswerDraft, ApiClient, ApiMessage};
pub use config::{AccessToken, ApiConfig, PlayerConfig};
pub use error::{ApiError, ConfigError, PlayerError};
pub use quiz::{QuestionProvider, QuizHandle, QuizPlayer, SubmissionService};
