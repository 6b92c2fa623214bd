//! Core data model types for timequiz.
//!
//! Questions, the ordered sequence handed to the engine, and the result a
//! session produces.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fold an answer for comparison: surrounding whitespace stripped, lowercased.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A single question and its expected answer.
///
/// The expected answer is normalized once here, so checking a respondent's
/// (already normalized) answer is a plain equality test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "QuestionFields")]
pub struct Question {
    prompt: String,
    expected_answer: String,
}

#[derive(Deserialize)]
struct QuestionFields {
    prompt: String,
    expected_answer: String,
}

impl From<QuestionFields> for Question {
    fn from(fields: QuestionFields) -> Self {
        Question::new(&fields.prompt, &fields.expected_answer)
    }
}

impl Question {
    pub fn new(prompt: &str, expected_answer: &str) -> Self {
        Self {
            prompt: prompt.trim().to_string(),
            expected_answer: normalize_answer(expected_answer),
        }
    }

    /// The text shown to the respondent.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The normalized expected answer.
    pub fn expected_answer(&self) -> &str {
        &self.expected_answer
    }

    /// Whether a normalized answer matches.
    pub fn is_correct(&self, normalized_answer: &str) -> bool {
        self.expected_answer == normalized_answer
    }
}

/// An ordered, finite list of questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSequence {
    questions: Vec<Question>,
}

impl QuestionSequence {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_vec(self) -> Vec<Question> {
        self.questions
    }
}

impl From<Vec<Question>> for QuestionSequence {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}

impl FromIterator<Question> for QuestionSequence {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a QuestionSequence {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// Final score of a session.
///
/// Invariant: `correct_count <= questions_presented <= total_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResultCounts")]
pub struct SessionResult {
    correct_count: usize,
    total_count: usize,
    questions_presented: usize,
}

#[derive(Deserialize)]
struct ResultCounts {
    correct_count: usize,
    total_count: usize,
    questions_presented: usize,
}

impl TryFrom<ResultCounts> for SessionResult {
    type Error = String;

    fn try_from(c: ResultCounts) -> Result<Self, Self::Error> {
        SessionResult::new(c.correct_count, c.questions_presented, c.total_count).ok_or_else(|| {
            format!(
                "inconsistent counts: {} correct, {} presented, {} total",
                c.correct_count, c.questions_presented, c.total_count
            )
        })
    }
}

impl SessionResult {
    /// Build a result, rejecting counts that break the ordering invariant.
    pub fn new(
        correct_count: usize,
        questions_presented: usize,
        total_count: usize,
    ) -> Option<Self> {
        if correct_count <= questions_presented && questions_presented <= total_count {
            Some(Self {
                correct_count,
                total_count,
                questions_presented,
            })
        } else {
            None
        }
    }

    /// Counts maintained by the engine, which only ever grows them in order.
    pub(crate) fn from_counts(
        correct_count: usize,
        questions_presented: usize,
        total_count: usize,
    ) -> Self {
        debug_assert!(correct_count <= questions_presented && questions_presented <= total_count);
        Self {
            correct_count,
            total_count,
            questions_presented,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Length of the full question sequence, presented or not.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Questions whose answer arrived before the deadline.
    pub fn questions_presented(&self) -> usize {
        self.questions_presented
    }
}

impl fmt::Display for SessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You scored {} out of {} total.",
            self.correct_count, self.total_count
        )
    }
}

/// The two ways a session can end normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalState {
    /// Every question was answered before the deadline.
    Completed,
    /// The deadline fired while a question was awaiting an answer.
    TimedOut,
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalState::Completed => write!(f, "completed"),
            TerminalState::TimedOut => write!(f, "timed_out"),
        }
    }
}

impl FromStr for TerminalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(TerminalState::Completed),
            "timed_out" | "timedout" | "timeout" => Ok(TerminalState::TimedOut),
            other => Err(format!("unknown terminal state: {other}")),
        }
    }
}

/// What a finished session hands back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub state: TerminalState,
    pub result: SessionResult,
    /// Wall-clock time from deadline start to finalization.
    pub elapsed: Duration,
}

impl SessionOutcome {
    pub fn timed_out(&self) -> bool {
        self.state == TerminalState::TimedOut
    }
}
