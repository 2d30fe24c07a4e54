use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::model::{AnswerId, GradedQuestion, Question, QuestionId, SubmittedAnswer};

/// Countdown budget granted per question when a session starts.
pub const SECONDS_PER_QUESTION: u32 = 30;

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Loading,
    Error,
    Ready,
    Active,
    Finished,
}

impl SessionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Loading => "loading",
            SessionStatus::Error => "error",
            SessionStatus::Ready => "ready",
            SessionStatus::Active => "active",
            SessionStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of a quiz, from loading questions to grading.
///
/// A `Session` is an immutable value: every transition produces a new one (see
/// [`Session::apply`]). The question list is shared behind an `Arc` since it never
/// changes once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) status: SessionStatus,
    pub(crate) questions: Arc<[Question]>,
    pub(crate) index: usize,
    pub(crate) current_question_id: Option<QuestionId>,
    pub(crate) selected_answer_ids: Vec<AnswerId>,
    pub(crate) submitted_answers: Vec<SubmittedAnswer>,
    pub(crate) seconds_remaining: Option<u32>,
    pub(crate) graded_results: Vec<GradedQuestion>,
    pub(crate) total_score: u32,
    pub(crate) high_score: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session waiting for its questions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_high_score(0)
    }

    /// A fresh session that remembers the best score seen so far.
    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            status: SessionStatus::Loading,
            questions: Arc::from(Vec::<Question>::new()),
            index: 0,
            current_question_id: None,
            selected_answer_ids: Vec::new(),
            submitted_answers: Vec::new(),
            seconds_remaining: None,
            graded_results: Vec::new(),
            total_score: 0,
            high_score,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn num_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The question being answered, or `None` once every question has been passed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    #[must_use]
    pub fn current_question_id(&self) -> Option<QuestionId> {
        self.current_question_id
    }

    #[must_use]
    pub fn selected_answer_ids(&self) -> &[AnswerId] {
        &self.selected_answer_ids
    }

    #[must_use]
    pub fn is_selected(&self, answer_id: AnswerId) -> bool {
        self.selected_answer_ids.contains(&answer_id)
    }

    #[must_use]
    pub fn submitted_answers(&self) -> &[SubmittedAnswer] {
        &self.submitted_answers
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> Option<u32> {
        self.seconds_remaining
    }

    #[must_use]
    pub fn graded_results(&self) -> &[GradedQuestion] {
        &self.graded_results
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Number of graded questions marked correct.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.graded_results.iter().filter(|q| q.is_correct).count()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.index + 1 == self.questions.len()
    }

    /// True once the last question's answer has been recorded.
    #[must_use]
    pub fn all_answered(&self) -> bool {
        !self.questions.is_empty() && self.index == self.questions.len()
    }
}
