use super::state::{Session, SessionStatus};
use crate::model::SubmittedAnswer;

/// Side effects implied by a transition, carried out by whoever drives the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchQuestions,
    StartTimer,
    StopTimer,
    SubmitAnswers(Vec<SubmittedAnswer>),
}

/// Effects owed by a brand new session before any event has been applied.
#[must_use]
pub fn initial_effects(session: &Session) -> Vec<Effect> {
    match session.status() {
        SessionStatus::Loading => vec![Effect::FetchQuestions],
        SessionStatus::Active => vec![Effect::StartTimer],
        _ => Vec::new(),
    }
}

/// Effects implied by moving from `prev` to `next`.
///
/// Timer effects come first so a session that both finishes and stops does not
/// observe another tick.
#[must_use]
pub fn effects_between(prev: &Session, next: &Session) -> Vec<Effect> {
    let mut effects = Vec::new();
    let was_active = prev.status() == SessionStatus::Active;
    let is_active = next.status() == SessionStatus::Active;

    if was_active && !is_active {
        effects.push(Effect::StopTimer);
    }
    if !was_active && is_active {
        effects.push(Effect::StartTimer);
    }
    if next.status() == SessionStatus::Loading && prev.status() != SessionStatus::Loading {
        effects.push(Effect::FetchQuestions);
    }
    if is_active && next.all_answered() && prev.index() < next.index() {
        effects.push(Effect::SubmitAnswers(next.submitted_answers().to_vec()));
    }

    effects
}
