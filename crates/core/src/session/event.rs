use crate::model::{AnswerId, GradingResult, Question};

/// Everything that can move a quiz session forward.
///
/// User input, the countdown timer and the asynchronous collaborators all feed the
/// session through this one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    QuestionsLoaded(Vec<Question>),
    QuestionsLoadFailed,
    Start,
    AnswerToggled(AnswerId),
    NextQuestion,
    Tick,
    GradedResultReceived(GradingResult),
    GradingFailed,
    Restart,
}

impl QuizEvent {
    /// Short stable name, used in logs and rejection errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            QuizEvent::QuestionsLoaded(_) => "questions_loaded",
            QuizEvent::QuestionsLoadFailed => "questions_load_failed",
            QuizEvent::Start => "start",
            QuizEvent::AnswerToggled(_) => "answer_toggled",
            QuizEvent::NextQuestion => "next_question",
            QuizEvent::Tick => "tick",
            QuizEvent::GradedResultReceived(_) => "graded_result_received",
            QuizEvent::GradingFailed => "grading_failed",
            QuizEvent::Restart => "restart",
        }
    }
}
