mod ids;
mod question;
mod submission;
mod user;

pub use ids::{AnswerId, ParseIdError, QuestionId, UserId};

pub use question::{
    AnswerChoice, AnswerRecord, Question, QuestionDetail, QuestionDraft, QuestionError,
    QuestionSummary, validate_question_set,
};
pub use submission::{GradedQuestion, GradingResult, SubmittedAnswer};
pub use user::{Role, SortOrder, User, UserDraft, UserPage, UserQuery};
