use quiz_core::model::AnswerId;
use quiz_core::{QuizEvent, Session, SessionStatus};

/// A line typed by the player, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Events(Vec<QuizEvent>),
    Quit,
    Help,
    Empty,
    Unknown(String),
}

/// Parse one line of player input.
///
/// Answer ids may be given several at a time, separated by spaces or commas; each
/// one toggles that answer.
pub fn parse_line(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => return Input::Empty,
        "q" | "quit" | "exit" => return Input::Quit,
        "h" | "help" | "?" => return Input::Help,
        "s" | "start" => return Input::Events(vec![QuizEvent::Start]),
        "n" | "next" => return Input::Events(vec![QuizEvent::NextQuestion]),
        "r" | "restart" => return Input::Events(vec![QuizEvent::Restart]),
        _ => {}
    }

    let ids: Result<Vec<AnswerId>, _> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse::<AnswerId>)
        .collect();

    match ids {
        Ok(ids) => Input::Events(ids.into_iter().map(QuizEvent::AnswerToggled).collect()),
        Err(_) => Input::Unknown(trimmed.to_string()),
    }
}

/// The answer id in `event` that the current question does not offer, if any.
///
/// Outside an active question every event passes; the session decides.
pub fn foreign_choice(session: &Session, event: &QuizEvent) -> Option<AnswerId> {
    match event {
        QuizEvent::AnswerToggled(id) if session.status() == SessionStatus::Active => session
            .current_question()
            .filter(|question| !question.has_choice(*id))
            .map(|_| *id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerChoice, Question, QuestionId};

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_line(" START "), Input::Events(vec![QuizEvent::Start]));
        assert_eq!(parse_line("n"), Input::Events(vec![QuizEvent::NextQuestion]));
        assert_eq!(parse_line("Restart"), Input::Events(vec![QuizEvent::Restart]));
        assert_eq!(parse_line("q"), Input::Quit);
        assert_eq!(parse_line("   "), Input::Empty);
    }

    #[test]
    fn answer_ids_toggle_in_order() {
        assert_eq!(
            parse_line("12, 7 3"),
            Input::Events(vec![
                QuizEvent::AnswerToggled(AnswerId::new(12)),
                QuizEvent::AnswerToggled(AnswerId::new(7)),
                QuizEvent::AnswerToggled(AnswerId::new(3)),
            ])
        );
    }

    #[test]
    fn garbage_is_reported() {
        assert_eq!(parse_line("12 abc"), Input::Unknown("12 abc".into()));
    }

    #[test]
    fn toggles_outside_the_current_question_are_flagged() {
        let session = Session::new()
            .apply(QuizEvent::QuestionsLoaded(vec![Question {
                id: QuestionId::new(1),
                content: "Pick one".into(),
                thumbnail: None,
                answers: vec![AnswerChoice {
                    id: AnswerId::new(7),
                    content: "seven".into(),
                }],
            }]))
            .unwrap();
        let toggle = |id| QuizEvent::AnswerToggled(AnswerId::new(id));

        assert_eq!(foreign_choice(&session, &toggle(9)), None);

        let active = session.apply(QuizEvent::Start).unwrap();
        assert_eq!(foreign_choice(&active, &toggle(7)), None);
        assert_eq!(foreign_choice(&active, &toggle(9)), Some(AnswerId::new(9)));
        assert_eq!(foreign_choice(&active, &QuizEvent::NextQuestion), None);
    }
}
