use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use quiz_core::model::{AnswerId, SubmittedAnswer, validate_question_set};
use quiz_core::session::{Effect, QuizEvent, Session, effects_between, initial_effects};

use super::collaborators::{QuestionProvider, SubmissionService};
use crate::config::PlayerConfig;
use crate::error::PlayerError;

#[derive(Debug)]
enum Command {
    /// Input from the player.
    Dispatch(QuizEvent),
    /// A collaborator response, tagged with the session epoch that requested it.
    Response { epoch: u64, event: QuizEvent },
    /// A countdown tick from the timer with the given id.
    Tick { timer: u64 },
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Cloneable front end to a running quiz player.
///
/// Dispatching never blocks: events are queued and applied in order by the player
/// task. The latest session is always available through [`QuizHandle::snapshot`].
#[derive(Clone, Debug)]
pub struct QuizHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<Session>,
}

impl QuizHandle {
    /// Queue an event for the session.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player task has stopped.
    pub fn dispatch(&self, event: QuizEvent) -> Result<(), PlayerError> {
        self.commands
            .send(Command::Dispatch(event))
            .map_err(|_| PlayerError::Closed)
    }

    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player task has stopped.
    pub fn start(&self) -> Result<(), PlayerError> {
        self.dispatch(QuizEvent::Start)
    }

    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player task has stopped.
    pub fn toggle_answer(&self, answer_id: AnswerId) -> Result<(), PlayerError> {
        self.dispatch(QuizEvent::AnswerToggled(answer_id))
    }

    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player task has stopped.
    pub fn next_question(&self) -> Result<(), PlayerError> {
        self.dispatch(QuizEvent::NextQuestion)
    }

    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player task has stopped.
    pub fn restart(&self) -> Result<(), PlayerError> {
        self.dispatch(QuizEvent::Restart)
    }

    /// The most recently published session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// A receiver that is notified after every applied transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.clone()
    }

    /// Wait until the session satisfies `predicate`, returning that session.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player stops before the predicate holds.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&Session) -> bool,
    ) -> Result<Session, PlayerError> {
        let mut state = self.state.clone();
        let session = state
            .wait_for(|session| predicate(session))
            .await
            .map_err(|_| PlayerError::Closed)?;
        Ok(session.clone())
    }
}

//
// ─── PLAYER ────────────────────────────────────────────────────────────────────
//

/// Drives a quiz session against its collaborators.
///
/// The player task owns the `Session` and is the only place transitions are applied,
/// so each event sees the fully applied result of the previous one. It requests
/// questions whenever a session enters `loading`, submits once every question has an
/// answer, and runs the countdown only while the session is `active`. Collaborator
/// responses and timer ticks that belong to an earlier session are dropped.
pub struct QuizPlayer {
    session: Session,
    epoch: u64,
    timer_id: u64,
    timer: Option<JoinHandle<()>>,
    provider: Arc<dyn QuestionProvider>,
    grader: Arc<dyn SubmissionService>,
    config: PlayerConfig,
    loopback: mpsc::WeakUnboundedSender<Command>,
    state: watch::Sender<Session>,
}

impl QuizPlayer {
    /// Start a player task on the current tokio runtime with a fresh session.
    #[must_use]
    pub fn spawn(
        provider: Arc<dyn QuestionProvider>,
        grader: Arc<dyn SubmissionService>,
        config: PlayerConfig,
    ) -> QuizHandle {
        let session = Session::new();
        let (commands, inbox) = mpsc::unbounded_channel();
        let (state, state_rx) = watch::channel(session.clone());

        let player = Self {
            session,
            epoch: 0,
            timer_id: 0,
            timer: None,
            provider,
            grader,
            config,
            loopback: commands.downgrade(),
            state,
        };
        tokio::spawn(player.run(inbox));

        QuizHandle {
            commands,
            state: state_rx,
        }
    }

    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Command>) {
        for effect in initial_effects(&self.session) {
            self.perform(effect);
        }

        while let Some(command) = inbox.recv().await {
            match command {
                Command::Dispatch(event) => self.apply(event),
                Command::Response { epoch, event } if epoch == self.epoch => self.apply(event),
                Command::Response { epoch, event } => {
                    tracing::debug!(
                        event = event.kind(),
                        epoch,
                        current = self.epoch,
                        "dropping response for a previous session"
                    );
                }
                Command::Tick { timer } if self.timer.is_some() && timer == self.timer_id => {
                    self.apply(QuizEvent::Tick);
                }
                Command::Tick { .. } => {}
            }
        }

        self.stop_timer();
        tracing::debug!("quiz player stopped");
    }

    fn apply(&mut self, event: QuizEvent) {
        let kind = event.kind();
        match self.session.apply(event) {
            Ok(next) => {
                let effects = effects_between(&self.session, &next);
                tracing::trace!(
                    event = kind,
                    from = %self.session.status(),
                    to = %next.status(),
                    "applied quiz event"
                );
                self.session = next;
                self.state.send_replace(self.session.clone());
                for effect in effects {
                    self.perform(effect);
                }
            }
            Err(err) => {
                tracing::debug!(event = kind, error = %err, "ignoring quiz event");
            }
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::FetchQuestions => self.fetch_questions(),
            Effect::StartTimer => self.start_timer(),
            Effect::StopTimer => self.stop_timer(),
            Effect::SubmitAnswers(answers) => self.submit(answers),
        }
    }

    fn fetch_questions(&mut self) {
        self.epoch += 1;
        let epoch = self.epoch;
        let provider = Arc::clone(&self.provider);
        let credential = self.config.credential.clone();
        let count = self.config.question_count;
        let loopback = self.loopback.clone();

        tokio::spawn(async move {
            let event = match provider.fetch_questions(&credential, count).await {
                Ok(questions) => match validate_question_set(&questions) {
                    Ok(()) => {
                        tracing::info!(epoch, questions = questions.len(), "questions loaded");
                        QuizEvent::QuestionsLoaded(questions)
                    }
                    Err(err) => {
                        tracing::warn!(epoch, error = %err, "unusable question set");
                        QuizEvent::QuestionsLoadFailed
                    }
                },
                Err(err) => {
                    tracing::warn!(epoch, error = %err, "failed to load questions");
                    QuizEvent::QuestionsLoadFailed
                }
            };
            send_back(&loopback, Command::Response { epoch, event });
        });
    }

    fn submit(&mut self, answers: Vec<SubmittedAnswer>) {
        let epoch = self.epoch;
        let grader = Arc::clone(&self.grader);
        let credential = self.config.credential.clone();
        let loopback = self.loopback.clone();

        tracing::info!(epoch, answers = answers.len(), "submitting answers for grading");
        tokio::spawn(async move {
            let event = match grader.submit_answers(&credential, &answers).await {
                Ok(result) => {
                    tracing::info!(epoch, score = result.total_score, "answers graded");
                    QuizEvent::GradedResultReceived(result)
                }
                Err(err) => {
                    tracing::warn!(epoch, error = %err, "grading failed");
                    QuizEvent::GradingFailed
                }
            };
            send_back(&loopback, Command::Response { epoch, event });
        });
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        self.timer_id += 1;
        let timer = self.timer_id;
        let period = self.config.tick_interval.max(Duration::from_millis(1));
        let loopback = self.loopback.clone();

        self.timer = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !send_back(&loopback, Command::Tick { timer }) {
                    break;
                }
            }
        }));
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

fn send_back(loopback: &mpsc::WeakUnboundedSender<Command>, command: Command) -> bool {
    loopback
        .upgrade()
        .is_some_and(|sender| sender.send(command).is_ok())
}
