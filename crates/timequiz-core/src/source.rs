//! Question bank loading.
//!
//! Reads two-column CSV (question, answer) into a [`QuestionSequence`],
//! optionally shuffles it, and lints it for common authoring mistakes.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::SourceError;
use crate::model::{Question, QuestionSequence};

/// Turn raw records into questions, trimming both fields.
///
/// Every record must have exactly two fields.
pub fn load_records<I, R, S>(records: I) -> Result<QuestionSequence, SourceError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| match record.as_ref() {
            [prompt, answer] => Ok(Question::new(prompt.as_ref(), answer.as_ref())),
            fields => Err(SourceError::MalformedRecord {
                record: idx + 1,
                fields: fields.len(),
            }),
        })
        .collect()
}

/// Parse CSV from any reader. There is no header row.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<QuestionSequence, SourceError> {
    // Flexible so that short or long rows reach `load_records` and get a
    // record-numbered error instead of a generic length mismatch.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    load_records(records)
}

/// Parse CSV from a string (useful for testing).
pub fn load_csv_str(content: &str) -> Result<QuestionSequence, SourceError> {
    load_csv_reader(content.as_bytes())
}

/// Load a CSV question bank from disk.
pub fn load_csv(path: &Path) -> Result<QuestionSequence, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let questions = load_csv_reader(file)?;
    tracing::debug!(
        "loaded {} question(s) from {}",
        questions.len(),
        path.display()
    );
    Ok(questions)
}

/// Uniformly permute a sequence with the thread-local RNG.
pub fn shuffle(seq: QuestionSequence) -> QuestionSequence {
    shuffle_with(seq, &mut rand::rng())
}

/// Uniformly permute a sequence with a fixed seed, for reproducible runs.
pub fn shuffle_seeded(seq: QuestionSequence, seed: u64) -> QuestionSequence {
    shuffle_with(seq, &mut StdRng::seed_from_u64(seed))
}

/// Uniformly permute a sequence with the given RNG (Fisher–Yates).
pub fn shuffle_with<R: Rng + ?Sized>(seq: QuestionSequence, rng: &mut R) -> QuestionSequence {
    let mut questions = seq.into_vec();
    questions.as_mut_slice().shuffle(rng);
    QuestionSequence::new(questions)
}

/// A non-fatal issue found in a question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 1-based position of the question (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a question bank for common issues.
pub fn validate(seq: &QuestionSequence) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if seq.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "question bank is empty".into(),
        });
    }

    let mut seen_prompts = HashSet::new();
    for (idx, q) in seq.iter().enumerate() {
        let number = Some(idx + 1);

        if q.prompt().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "prompt is empty".into(),
            });
        }

        if q.expected_answer().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "expected answer is empty".into(),
            });
        }

        if !q.prompt().is_empty() && !seen_prompts.insert(q.prompt()) {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("duplicate prompt: {}", q.prompt()),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBLEMS: &str = "5+5,10\n7+3,10\n1+1,2\n\"what 2+2, sir?\",4\n";

    fn numbered(n: usize) -> QuestionSequence {
        (0..n)
            .map(|i| Question::new(&format!("q{i}"), &i.to_string()))
            .collect()
    }

    #[test]
    fn load_trims_fields() {
        let seq = load_records(vec![vec!["  2+2 ", " 4 "], vec!["3+3", "6"]]).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.as_slice()[0].prompt(), "2+2");
        assert_eq!(seq.as_slice()[0].expected_answer(), "4");
    }

    #[test]
    fn load_rejects_wrong_field_count() {
        let err = load_records(vec![vec!["2+2", "4"], vec!["3+3"]]).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MalformedRecord {
                record: 2,
                fields: 1
            }
        ));

        let err = load_records(vec![vec!["a", "b", "c"]]).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MalformedRecord {
                record: 1,
                fields: 3
            }
        ));
    }

    #[test]
    fn load_csv_handles_quoted_commas() {
        let seq = load_csv_str(PROBLEMS).unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.as_slice()[3].prompt(), "what 2+2, sir?");
        assert_eq!(seq.as_slice()[3].expected_answer(), "4");
    }

    #[test]
    fn load_csv_reports_short_rows_by_record_number() {
        let err = load_csv_str("1+1,2\n2+2\n").unwrap_err();
        assert!(matches!(
            err,
            SourceError::MalformedRecord {
                record: 2,
                fields: 1
            }
        ));
    }

    #[test]
    fn load_csv_empty_input_is_empty_sequence() {
        assert!(load_csv_str("").unwrap().is_empty());
    }

    #[test]
    fn load_csv_missing_file() {
        let err = load_csv(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, SourceError::Load { .. }));
    }

    #[test]
    fn load_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        std::fs::write(&path, PROBLEMS).unwrap();

        let seq = load_csv(&path).unwrap();
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn loading_twice_is_identical() {
        let first = load_csv_str(PROBLEMS).unwrap();
        let second = load_csv_str(PROBLEMS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let original = numbered(50);
        let shuffled = shuffle(original.clone());
        assert_eq!(shuffled.len(), original.len());

        let mut a: Vec<_> = original.into_vec();
        let mut b: Vec<_> = shuffled.into_vec();
        a.sort_by(|x, y| x.prompt().cmp(y.prompt()));
        b.sort_by(|x, y| x.prompt().cmp(y.prompt()));
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let a = shuffle_seeded(numbered(20), 42);
        let b = shuffle_seeded(numbered(20), 42);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_of_empty_and_singleton() {
        assert!(shuffle(QuestionSequence::default()).is_empty());
        assert_eq!(shuffle(numbered(1)), numbered(1));
    }

    #[test]
    fn shuffle_positions_are_uniform() {
        // Every element should land in every position about equally often.
        const N: usize = 4;
        const TRIALS: usize = 24_000;
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [[0usize; N]; N];

        for _ in 0..TRIALS {
            let shuffled = shuffle_with(numbered(N), &mut rng);
            for (pos, q) in shuffled.iter().enumerate() {
                let original: usize = q.expected_answer().parse().unwrap();
                counts[original][pos] += 1;
            }
        }

        let expected = TRIALS as f64 / N as f64;
        let mut chi_square = 0.0;
        for row in &counts {
            for &observed in row {
                let diff = observed as f64 - expected;
                chi_square += diff * diff / expected;
            }
        }
        // 9 degrees of freedom; the 99.9th percentile is about 27.9.
        assert!(chi_square < 27.9, "chi-square too large: {chi_square}");
    }

    #[test]
    fn validate_flags_issues() {
        let seq: QuestionSequence = vec![
            Question::new("2+2", "4"),
            Question::new("2+2", "4"),
            Question::new("", "1"),
            Question::new("3+3", "  "),
        ]
        .into();
        let warnings = validate(&seq);
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(2) && w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(3) && w.message == "prompt is empty"));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(4) && w.message.contains("answer is empty")));
    }

    #[test]
    fn validate_clean_bank() {
        let seq = load_csv_str(PROBLEMS).unwrap();
        assert!(validate(&seq).is_empty());
        assert_eq!(validate(&QuestionSequence::default()).len(), 1);
    }
}
