//! Timed evaluation engine.
//!
//! Presents questions one at a time and races each answer against a single
//! deadline shared by the whole session. The first deadline miss ends the
//! session; whatever was answered by then is scored.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::error::{RespondentReadError, SessionError};
use crate::model::{
    normalize_answer, QuestionSequence, SessionOutcome, SessionResult, TerminalState,
};
use crate::traits::AnswerReader;

/// Default whole-session time limit.
pub const DEFAULT_LIMIT_SECS: u64 = 30;

/// Configuration for the evaluation engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Time budget for the whole session, not per question.
    pub time_limit: Duration,
}

impl EngineConfig {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            time_limit: Duration::from_secs(secs),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_secs(DEFAULT_LIMIT_SECS)
    }
}

/// Session progress callbacks.
pub trait SessionObserver: Send + Sync {
    fn on_session_start(&self, total: usize, time_limit: Duration);
    /// Called right before the answer for question `number` (1-based) is awaited.
    fn on_question(&self, number: usize, prompt: &str);
    fn on_answer(&self, number: usize, correct: bool);
    fn on_timeout(&self, presented: usize);
    fn on_session_complete(&self, outcome: &SessionOutcome);
}

/// No-op session observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_session_start(&self, _: usize, _: Duration) {}
    fn on_question(&self, _: usize, _: &str) {}
    fn on_answer(&self, _: usize, _: bool) {}
    fn on_timeout(&self, _: usize) {}
    fn on_session_complete(&self, _: &SessionOutcome) {}
}

/// A normalized answer (or read failure) and when the worker produced it.
type Delivery = (Result<String, RespondentReadError>, Instant);

/// The timed evaluation engine.
pub struct TimedEvaluationEngine {
    reader: Arc<dyn AnswerReader>,
    config: EngineConfig,
}

impl TimedEvaluationEngine {
    pub fn new(reader: Arc<dyn AnswerReader>, config: EngineConfig) -> Self {
        Self { reader, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one session over `questions`.
    ///
    /// Returns the terminal state and score, or an error if respondent input
    /// became unreadable. Running out of time is a normal outcome.
    pub async fn run(
        &self,
        questions: QuestionSequence,
        observer: &dyn SessionObserver,
    ) -> Result<SessionOutcome, SessionError> {
        let total = questions.len();
        observer.on_session_start(total, self.config.time_limit);

        let start = Instant::now();
        let deadline = start + self.config.time_limit;
        let expired = tokio::time::sleep_until(deadline);
        tokio::pin!(expired);
        tracing::info!(
            "session started: {total} question(s), {:.1}s limit",
            self.config.time_limit.as_secs_f64()
        );

        let mut correct = 0usize;
        let mut presented = 0usize;
        let mut terminal = TerminalState::Completed;

        for (idx, question) in questions.iter().enumerate() {
            let number = idx + 1;
            observer.on_question(number, question.prompt());
            let delivery = self.spawn_answer_worker(number)?;

            // A delivery is always judged by its arrival stamp, so the
            // deadline branch only wins when nothing has been delivered.
            let answered = tokio::select! {
                biased;
                delivered = delivery => Some(delivered),
                () = &mut expired => None,
            };

            let answer = match answered {
                None => None,
                Some(Ok((_, arrived))) if arrived >= deadline => None,
                Some(Ok((Ok(answer), _))) => Some(answer),
                Some(Ok((Err(source), _))) => {
                    tracing::warn!("respondent input failed on question {number}: {source}");
                    return Err(SessionError::Respondent {
                        question: number,
                        source,
                    });
                }
                Some(Err(_)) => {
                    return Err(SessionError::Respondent {
                        question: number,
                        source: RespondentReadError::WorkerLost,
                    });
                }
            };

            let Some(answer) = answer else {
                tracing::debug!("deadline hit on question {number}, abandoning its worker");
                terminal = TerminalState::TimedOut;
                observer.on_timeout(presented);
                break;
            };

            let is_correct = question.is_correct(&answer);
            if is_correct {
                correct += 1;
            }
            presented += 1;
            tracing::debug!("question {number}: answered, correct={is_correct}");
            observer.on_answer(number, is_correct);
        }

        let outcome = SessionOutcome {
            state: terminal,
            result: SessionResult::from_counts(correct, presented, total),
            elapsed: start.elapsed(),
        };
        tracing::info!(
            "session {terminal}: {correct}/{total} correct, {presented} answered in {}ms",
            outcome.elapsed.as_millis()
        );
        observer.on_session_complete(&outcome);

        Ok(outcome)
    }

    /// Start a worker thread that blocks on one answer and hands it back
    /// through a single-slot channel.
    ///
    /// A plain thread rather than a runtime blocking task: an abandoned read
    /// must never hold up runtime shutdown.
    fn spawn_answer_worker(
        &self,
        number: usize,
    ) -> Result<oneshot::Receiver<Delivery>, SessionError> {
        let (tx, rx) = oneshot::channel();
        let reader = Arc::clone(&self.reader);

        std::thread::Builder::new()
            .name(format!("answer-{number}"))
            .spawn(move || {
                let answer = reader.read_answer().map(|raw| normalize_answer(&raw));
                let delivery = (answer, Instant::now());
                // The receiver is gone once the session has moved on.
                let _ = tx.send(delivery);
            })
            .map_err(|e| SessionError::Respondent {
                question: number,
                source: RespondentReadError::Io(e),
            })?;

        Ok(rx)
    }
}
