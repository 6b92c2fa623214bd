//! Core trait definitions.

use crate::error::RespondentReadError;

/// A blocking source of respondent answers, one line per call.
///
/// Calls happen on a dedicated worker thread per question, so
/// implementations may block for as long as the respondent takes. A worker
/// whose question timed out is never interrupted, so an implementation must
/// tolerate a later call arriving while an abandoned one is still blocked.
pub trait AnswerReader: Send + Sync + 'static {
    /// Read one raw answer. End of input is [`RespondentReadError::Closed`].
    fn read_answer(&self) -> Result<String, RespondentReadError>;
}
