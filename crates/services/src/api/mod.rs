mod answers;
mod auth;
mod client;
mod envelope;
mod questions;
mod users;

pub use answers::AnswerDraft;
pub use client::ApiClient;
pub use envelope::{Ack, ApiMessage};
