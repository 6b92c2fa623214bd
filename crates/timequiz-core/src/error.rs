//! Error types for loading question banks and running sessions.
//!
//! Source errors abort before any timing starts. Respondent errors abort a
//! running session. Running out of time is not an error: it is reported as
//! [`TerminalState::TimedOut`](crate::model::TerminalState::TimedOut).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning raw tabular input into a question sequence.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The question bank could not be opened or read.
    #[error("failed to read question bank {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The question bank is not valid CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A record did not have exactly two fields.
    #[error("record {record} has {fields} field(s), expected 2 (question, answer)")]
    MalformedRecord { record: usize, fields: usize },
}

/// Errors raised while collecting an answer from the respondent.
#[derive(Debug, Error)]
pub enum RespondentReadError {
    /// The input stream reached end-of-file before an answer arrived.
    #[error("input stream closed before an answer was given")]
    Closed,

    /// Reading the input stream failed.
    #[error("failed to read answer: {0}")]
    Io(#[from] io::Error),

    /// The answer worker went away without delivering anything.
    #[error("answer worker exited without delivering an answer")]
    WorkerLost,
}

/// Errors that abort a running session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("respondent input failed on question {question}: {source}")]
    Respondent {
        /// 1-based number of the question being answered.
        question: usize,
        #[source]
        source: RespondentReadError,
    },
}

impl SessionError {
    /// The underlying respondent failure.
    pub fn respondent_error(&self) -> &RespondentReadError {
        match self {
            SessionError::Respondent { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_record_message_names_record() {
        let err = SourceError::MalformedRecord {
            record: 3,
            fields: 1,
        };
        assert_eq!(
            err.to_string(),
            "record 3 has 1 field(s), expected 2 (question, answer)"
        );
    }

    #[test]
    fn session_error_exposes_cause() {
        let err = SessionError::Respondent {
            question: 2,
            source: RespondentReadError::Closed,
        };
        assert!(err.to_string().contains("question 2"));
        assert!(matches!(
            err.respondent_error(),
            RespondentReadError::Closed
        ));
    }
}
