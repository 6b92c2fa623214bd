//! [`AnswerReader`] implementations: terminal input, any buffered reader,
//! and a scripted respondent for tests.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::RespondentReadError;
use crate::traits::AnswerReader;

/// Reads answers from the process's standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinReader;

impl AnswerReader for StdinReader {
    fn read_answer(&self) -> Result<String, RespondentReadError> {
        read_line_from(&mut io::stdin().lock())
    }
}

/// Reads answers line by line from any buffered reader.
pub struct LineReader<R> {
    inner: Mutex<R>,
}

impl<R: BufRead + Send + 'static> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }
}

impl<R: BufRead + Send + 'static> AnswerReader for LineReader<R> {
    fn read_answer(&self) -> Result<String, RespondentReadError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| RespondentReadError::WorkerLost)?;
        read_line_from(&mut *inner)
    }
}

fn read_line_from<R: BufRead + ?Sized>(reader: &mut R) -> Result<String, RespondentReadError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(RespondentReadError::Closed);
    }
    Ok(line)
}

/// One scripted respondent action.
#[derive(Debug, Clone)]
pub enum ScriptedAnswer {
    /// Answer immediately.
    Line(String),
    /// Answer after a delay.
    Delayed(Duration, String),
    /// The input stream closes.
    Closed,
    /// Reading fails with an I/O error of this kind.
    Failed(io::ErrorKind),
    /// Never answer; the worker blocks for the rest of the process.
    Stall,
}

/// A respondent that replays a fixed script, for driving sessions in tests.
///
/// Once the script is exhausted every read reports a closed stream.
pub struct ScriptedReader {
    script: Mutex<VecDeque<ScriptedAnswer>>,
    reads: AtomicUsize,
}

impl ScriptedReader {
    pub fn new(script: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            reads: AtomicUsize::new(0),
        }
    }

    /// A script that answers each line immediately.
    pub fn lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self::new(lines.into_iter().map(|l| ScriptedAnswer::Line(l.into())))
    }

    /// Number of reads started so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl AnswerReader for ScriptedReader {
    fn read_answer(&self) -> Result<String, RespondentReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .map_err(|_| RespondentReadError::WorkerLost)?
            .pop_front();

        match next {
            Some(ScriptedAnswer::Line(line)) => Ok(line),
            Some(ScriptedAnswer::Delayed(delay, line)) => {
                std::thread::sleep(delay);
                Ok(line)
            }
            Some(ScriptedAnswer::Failed(kind)) => {
                Err(io::Error::new(kind, "scripted read failure").into())
            }
            Some(ScriptedAnswer::Stall) => loop {
                std::thread::park();
            },
            Some(ScriptedAnswer::Closed) | None => Err(RespondentReadError::Closed),
        }
    }
}
