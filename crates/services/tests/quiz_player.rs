use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{
    AnswerChoice, AnswerId, GradedQuestion, GradingResult, Question, QuestionId, SubmittedAnswer,
};
use quiz_core::session::SessionStatus;
use services::{
    AccessToken, ApiError, PlayerConfig, QuestionProvider, QuizPlayer, SubmissionService,
};

fn question(id: u64) -> Question {
    Question {
        id: QuestionId::new(id),
        content: format!("Question {id}"),
        thumbnail: None,
        answers: vec![
            AnswerChoice {
                id: AnswerId::new(id * 10),
                content: "first".into(),
            },
            AnswerChoice {
                id: AnswerId::new(id * 10 + 1),
                content: "second".into(),
            },
        ],
    }
}

struct FakeProvider {
    questions: Vec<Question>,
    fail_first: bool,
    calls: AtomicUsize,
}

impl FakeProvider {
    fn with(n: u64) -> Arc<Self> {
        Arc::new(Self {
            questions: (1..=n).map(question).collect(),
            fail_first: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing_once(n: u64) -> Arc<Self> {
        Arc::new(Self {
            questions: (1..=n).map(question).collect(),
            fail_first: true,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl QuestionProvider for FakeProvider {
    async fn fetch_questions(
        &self,
        _credential: &AccessToken,
        _count: Option<u32>,
    ) -> Result<Vec<Question>, ApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_first && call == 0 {
            return Err(ApiError::Rejected {
                status: 400,
                message: "not enough questions".into(),
            });
        }
        Ok(self.questions.clone())
    }
}

struct FakeGrader {
    score: u32,
    delay: Duration,
    received: Mutex<Vec<Vec<SubmittedAnswer>>>,
}

impl FakeGrader {
    fn scoring(score: u32) -> Arc<Self> {
        Self::slow(score, Duration::ZERO)
    }

    fn slow(score: u32, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            score,
            delay,
            received: Mutex::new(Vec::new()),
        })
    }

    fn submissions(&self) -> Vec<Vec<SubmittedAnswer>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionService for FakeGrader {
    async fn submit_answers(
        &self,
        _credential: &AccessToken,
        answers: &[SubmittedAnswer],
    ) -> Result<GradingResult, ApiError> {
        self.received.lock().unwrap().push(answers.to_vec());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(GradingResult {
            list_question_checked: answers
                .iter()
                .map(|a| GradedQuestion {
                    id: a.id,
                    is_correct: true,
                })
                .collect(),
            total_score: self.score,
        })
    }
}

fn config() -> PlayerConfig {
    PlayerConfig::new(AccessToken::new("token"))
}

#[tokio::test(start_paused = true)]
async fn plays_a_full_session_and_records_high_score() {
    let provider = FakeProvider::with(2);
    let grader = FakeGrader::scoring(70);
    let handle = QuizPlayer::spawn(provider.clone(), grader.clone(), config());

    let ready = handle
        .wait_for(|s| s.status() == SessionStatus::Ready)
        .await
        .unwrap();
    assert_eq!(ready.num_questions(), 2);

    handle.start().unwrap();
    handle.toggle_answer(AnswerId::new(10)).unwrap();
    handle.next_question().unwrap();
    handle.toggle_answer(AnswerId::new(21)).unwrap();
    handle.next_question().unwrap();

    let finished = handle
        .wait_for(|s| s.status() == SessionStatus::Finished)
        .await
        .unwrap();
    assert_eq!(finished.total_score(), 70);
    assert_eq!(finished.high_score(), 70);
    assert_eq!(finished.graded_results().len(), 2);
    assert!(
        finished
            .seconds_remaining()
            .is_some_and(|secs| secs > 0 && secs <= 60)
    );

    assert_eq!(
        grader.submissions(),
        vec![vec![
            SubmittedAnswer::new(QuestionId::new(1), vec![AnswerId::new(10)]),
            SubmittedAnswer::new(QuestionId::new(2), vec![AnswerId::new(21)]),
        ]]
    );
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn countdown_times_out_without_grading() {
    let grader = FakeGrader::scoring(100);
    let handle = QuizPlayer::spawn(FakeProvider::with(1), grader.clone(), config());

    handle
        .wait_for(|s| s.status() == SessionStatus::Ready)
        .await
        .unwrap();
    handle.start().unwrap();

    let finished = handle
        .wait_for(|s| s.status() == SessionStatus::Finished)
        .await
        .unwrap();
    assert_eq!(finished.seconds_remaining(), Some(0));
    assert_eq!(finished.index(), 0);
    assert!(finished.graded_results().is_empty());
    assert!(grader.submissions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn timeout_wins_over_a_late_grading_result() {
    let grader = FakeGrader::slow(100, Duration::from_secs(120));
    let handle = QuizPlayer::spawn(FakeProvider::with(1), grader.clone(), config());

    handle
        .wait_for(|s| s.status() == SessionStatus::Ready)
        .await
        .unwrap();
    handle.start().unwrap();
    handle.toggle_answer(AnswerId::new(10)).unwrap();
    handle.next_question().unwrap();

    let finished = handle
        .wait_for(|s| s.status() == SessionStatus::Finished)
        .await
        .unwrap();
    assert_eq!(finished.seconds_remaining(), Some(0));

    tokio::time::sleep(Duration::from_secs(180)).await;
    let after = handle.snapshot();
    assert_eq!(grader.submissions().len(), 1);
    assert_eq!(after.status(), SessionStatus::Finished);
    assert_eq!(after.total_score(), 0);
    assert_eq!(after.high_score(), 0);
}

#[tokio::test(start_paused = true)]
async fn timer_stops_once_the_session_is_graded() {
    let handle = QuizPlayer::spawn(FakeProvider::with(1), FakeGrader::scoring(10), config());

    handle
        .wait_for(|s| s.status() == SessionStatus::Ready)
        .await
        .unwrap();
    handle.start().unwrap();
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    handle.next_question().unwrap();

    let finished = handle
        .wait_for(|s| s.status() == SessionStatus::Finished)
        .await
        .unwrap();
    assert_eq!(finished.seconds_remaining(), Some(27));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().seconds_remaining(), Some(27));
}

#[tokio::test(start_paused = true)]
async fn load_failure_recovers_through_restart() {
    let provider = FakeProvider::failing_once(2);
    let handle = QuizPlayer::spawn(provider.clone(), FakeGrader::scoring(0), config());

    handle
        .wait_for(|s| s.status() == SessionStatus::Error)
        .await
        .unwrap();

    handle.restart().unwrap();
    let ready = handle
        .wait_for(|s| s.status() == SessionStatus::Ready)
        .await
        .unwrap();
    assert_eq!(ready.num_questions(), 2);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn restart_carries_high_score_into_the_next_session() {
    let handle = QuizPlayer::spawn(FakeProvider::with(1), FakeGrader::scoring(80), config());

    handle
        .wait_for(|s| s.status() == SessionStatus::Ready)
        .await
        .unwrap();
    handle.start().unwrap();
    handle.next_question().unwrap();
    handle
        .wait_for(|s| s.status() == SessionStatus::Finished)
        .await
        .unwrap();

    handle.restart().unwrap();
    let ready = handle
        .wait_for(|s| s.status() == SessionStatus::Ready)
        .await
        .unwrap();
    assert_eq!(ready.high_score(), 80);
    assert_eq!(ready.total_score(), 0);
    assert!(ready.submitted_answers().is_empty());
    assert_eq!(ready.seconds_remaining(), None);
}

#[tokio::test(start_paused = true)]
async fn ignores_events_the_session_does_not_accept() {
    let handle = QuizPlayer::spawn(FakeProvider::with(1), FakeGrader::scoring(0), config());

    let ready = handle
        .wait_for(|s| s.status() == SessionStatus::Ready)
        .await
        .unwrap();
    handle.next_question().unwrap();
    handle.toggle_answer(AnswerId::new(10)).unwrap();
    handle.restart().unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.snapshot(), ready);
}
