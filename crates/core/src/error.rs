use thiserror::Error;

use crate::model::{ParseIdError, QuestionError};
use crate::session::TransitionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}
