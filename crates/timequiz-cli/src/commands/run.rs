//! The `timequiz run` command.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use timequiz_core::config::{load_config_from, ConfigOverrides};
use timequiz_core::engine::{SessionObserver, TimedEvaluationEngine};
use timequiz_core::model::SessionOutcome;
use timequiz_core::reader::StdinReader;
use timequiz_core::report::SessionReport;
use timequiz_core::source;

/// Console session observer.
///
/// Prompts go to stdout, or to stderr when stdout is reserved for JSON.
struct ConsoleObserver {
    prompts_to_stderr: bool,
}

impl ConsoleObserver {
    fn prompt(&self, text: &str) {
        // Prompts have no trailing newline, so flush explicitly.
        if self.prompts_to_stderr {
            let mut err = std::io::stderr().lock();
            let _ = write!(err, "{text}");
            let _ = err.flush();
        } else {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "{text}");
            let _ = out.flush();
        }
    }
}

impl SessionObserver for ConsoleObserver {
    fn on_session_start(&self, total: usize, time_limit: Duration) {
        tracing::debug!("{total} question(s), {}s on the clock", time_limit.as_secs());
    }

    fn on_question(&self, number: usize, prompt: &str) {
        self.prompt(&format!("Problem #{number}: {prompt} = "));
    }

    fn on_answer(&self, _: usize, _: bool) {}

    fn on_timeout(&self, _: usize) {
        eprintln!("\nTime's up!");
    }

    fn on_session_complete(&self, _: &SessionOutcome) {}
}

pub async fn execute(
    overrides: ConfigOverrides,
    config_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let json = match format.as_str() {
        "text" => false,
        "json" => true,
        other => anyhow::bail!("unknown format: '{other}' (expected text or json)"),
    };

    let config = load_config_from(config_path.as_deref())?.merge_overrides(overrides);

    // Malformed banks abort here, before the clock starts.
    let questions = source::load_csv(&config.problems)?;
    let questions = match (config.shuffle, config.seed) {
        (true, Some(seed)) => source::shuffle_seeded(questions, seed),
        (true, None) => source::shuffle(questions),
        (false, _) => questions,
    };

    let engine = TimedEvaluationEngine::new(Arc::new(StdinReader), config.engine_config());
    let observer = ConsoleObserver {
        prompts_to_stderr: json,
    };

    let outcome = engine
        .run(questions, &observer)
        .await
        .context("quiz session aborted")?;

    let report = SessionReport::new(&config, &outcome);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", outcome.result);
    }

    if let Some(dir) = &config.report_dir {
        let path = report.save_in(dir)?;
        eprintln!("Session report: {}", path.display());
    }

    Ok(())
}
