mod effect;
mod event;
mod state;
mod transition;

pub use effect::{Effect, effects_between, initial_effects};
pub use event::QuizEvent;
pub use state::{SECONDS_PER_QUESTION, Session, SessionStatus};
pub use transition::TransitionError;
