use std::fmt::Write as _;

use quiz_core::{Session, SessionStatus};

/// Decides what is worth printing as the session changes.
///
/// Every tick publishes a new session; only status changes, question changes,
/// selection changes and a few countdown milestones are shown.
#[derive(Debug, Default)]
pub struct Screen {
    last_status: Option<SessionStatus>,
    last_index: usize,
    last_selection: Vec<u64>,
}

impl Screen {
    /// Text to print for `session`, or `None` if nothing visible changed.
    pub fn update(&mut self, session: &Session) -> Option<String> {
        let status = session.status();
        let selection: Vec<u64> = session
            .selected_answer_ids()
            .iter()
            .map(|id| id.value())
            .collect();

        let status_changed = self.last_status != Some(status);
        let index_changed = self.last_index != session.index();
        let selection_changed = self.last_selection != selection;

        self.last_status = Some(status);
        self.last_index = session.index();
        self.last_selection = selection;

        if status_changed || index_changed || selection_changed {
            return Some(render(session));
        }

        match (status, session.seconds_remaining()) {
            (SessionStatus::Active, Some(secs)) if secs <= 5 || secs % 30 == 0 => {
                Some(format!("  {} left", format_timer(secs)))
            }
            _ => None,
        }
    }
}

pub fn format_timer(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

pub fn render(session: &Session) -> String {
    let mut out = String::new();
    match session.status() {
        SessionStatus::Loading => out.push_str("Loading questions..."),
        SessionStatus::Error => out.push_str("Something went wrong. Type `restart` to try again."),
        SessionStatus::Ready => {
            let _ = write!(
                out,
                "{} questions ready. Type `start` to begin. High score: {}",
                session.num_questions(),
                session.high_score()
            );
        }
        SessionStatus::Active => match session.current_question() {
            Some(question) => {
                let _ = writeln!(
                    out,
                    "Question {}/{}  ({} left)",
                    session.index() + 1,
                    session.num_questions(),
                    format_timer(session.seconds_remaining().unwrap_or(0))
                );
                let _ = writeln!(out, "{}", question.content);
                for choice in &question.answers {
                    let mark = if session.is_selected(choice.id) {
                        'x'
                    } else {
                        ' '
                    };
                    let _ = writeln!(out, "  [{mark}] {}: {}", choice.id, choice.content);
                }
                if session.is_last_question() {
                    out.push_str("Type answer ids to toggle, `next` to submit.");
                } else {
                    out.push_str("Type answer ids to toggle, `next` to continue.");
                }
            }
            None => out.push_str("Submitting answers..."),
        },
        SessionStatus::Finished => {
            if session.graded_results().is_empty() {
                out.push_str("Time is up!\n");
            } else {
                let _ = writeln!(
                    out,
                    "{}/{} correct.",
                    session.correct_count(),
                    session.graded_results().len()
                );
            }
            let _ = write!(
                out,
                "Score: {}  High score: {}. Type `restart` to play again.",
                session.total_score(),
                session.high_score()
            );
        }
    }
    out
}
