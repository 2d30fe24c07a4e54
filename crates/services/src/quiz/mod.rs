mod collaborators;
mod player;

pub use collaborators::{QuestionProvider, SubmissionService};
pub use player::{QuizHandle, QuizPlayer};
