//! timequiz-core — Question source, timed evaluation engine, and reports.
//!
//! A session presents questions one at a time and races every answer
//! against a single deadline shared by the whole session.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod reader;
pub mod report;
pub mod source;
pub mod traits;

pub use engine::{EngineConfig, NoopObserver, SessionObserver, TimedEvaluationEngine};
pub use error::{RespondentReadError, SessionError, SourceError};
pub use model::{Question, QuestionSequence, SessionOutcome, SessionResult, TerminalState};
pub use traits::AnswerReader;
