use std::sync::Arc;

use thiserror::Error;

use super::event::QuizEvent;
use super::state::{SECONDS_PER_QUESTION, Session, SessionStatus};
use crate::model::{QuestionId, SubmittedAnswer};

/// Reasons a session refuses an event.
///
/// A rejection never changes the session; callers keep the value they had.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("{event} is not accepted while the session is {status}")]
    Rejected {
        status: SessionStatus,
        event: &'static str,
    },

    #[error("every question has already been answered")]
    NoCurrentQuestion,
}

impl Session {
    /// Apply one event and return the resulting session.
    ///
    /// `self` is left untouched, so a rejected event costs nothing but the error.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::Rejected` when the event is not defined for the
    /// current status, and `TransitionError::NoCurrentQuestion` when answering or
    /// advancing after the last question has been recorded.
    pub fn apply(&self, event: QuizEvent) -> Result<Session, TransitionError> {
        use SessionStatus::{Active, Error, Finished, Loading, Ready};

        match (self.status, event) {
            (Loading, QuizEvent::QuestionsLoaded(questions)) => Ok(Session {
                status: Ready,
                questions: Arc::from(questions),
                ..self.clone()
            }),
            (Loading, QuizEvent::QuestionsLoadFailed) => Ok(self.with_status(Error)),
            (Ready, QuizEvent::Start) => {
                let budget = u32::try_from(self.questions.len())
                    .unwrap_or(u32::MAX)
                    .saturating_mul(SECONDS_PER_QUESTION);
                Ok(Session {
                    status: Active,
                    seconds_remaining: Some(budget),
                    ..self.clone()
                })
            }
            (Active, QuizEvent::AnswerToggled(answer_id)) => {
                let question_id = self
                    .current_question()
                    .map(|q| q.id)
                    .ok_or(TransitionError::NoCurrentQuestion)?;

                let mut selected = self.selected_answer_ids.clone();
                if let Some(pos) = selected.iter().position(|id| *id == answer_id) {
                    selected.remove(pos);
                } else {
                    selected.push(answer_id);
                }

                Ok(Session {
                    current_question_id: Some(question_id),
                    selected_answer_ids: selected,
                    ..self.clone()
                })
            }
            (Active, QuizEvent::NextQuestion) => {
                if self.index >= self.questions.len() {
                    return Err(TransitionError::NoCurrentQuestion);
                }

                let mut submitted = self.submitted_answers.clone();
                submitted.push(SubmittedAnswer::new(
                    self.current_question_id.unwrap_or(QuestionId::UNSET),
                    self.selected_answer_ids.clone(),
                ));

                Ok(Session {
                    index: self.index + 1,
                    current_question_id: None,
                    selected_answer_ids: Vec::new(),
                    submitted_answers: submitted,
                    ..self.clone()
                })
            }
            (Active, QuizEvent::Tick) => {
                let remaining = self.seconds_remaining.unwrap_or(0).saturating_sub(1);
                Ok(Session {
                    status: if remaining == 0 { Finished } else { Active },
                    seconds_remaining: Some(remaining),
                    ..self.clone()
                })
            }
            (Active, QuizEvent::GradedResultReceived(result)) => Ok(Session {
                status: Finished,
                total_score: result.total_score,
                high_score: self.high_score.max(result.total_score),
                graded_results: result.list_question_checked,
                ..self.clone()
            }),
            (Active, QuizEvent::GradingFailed) => Ok(Session {
                status: Error,
                seconds_remaining: None,
                ..self.clone()
            }),
            (Finished | Error, QuizEvent::Restart) => Ok(Session::with_high_score(self.high_score)),
            (status, event) => Err(TransitionError::Rejected {
                status,
                event: event.kind(),
            }),
        }
    }

    fn with_status(&self, status: SessionStatus) -> Session {
        Session {
            status,
            ..self.clone()
        }
    }
}
