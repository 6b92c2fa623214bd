//! Quiz configuration loading.
//!
//! Settings come from an optional `timequiz.toml`, then `TIMEQUIZ_*`
//! environment variables, then command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, DEFAULT_LIMIT_SECS};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "timequiz.toml";

/// Top-level timequiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// CSV question bank.
    #[serde(default = "default_problems")]
    pub problems: PathBuf,
    /// Whole-session time limit in seconds.
    #[serde(default = "default_limit")]
    pub limit_secs: u64,
    /// Shuffle questions before the session starts.
    #[serde(default = "default_true")]
    pub shuffle: bool,
    /// Fixed shuffle seed for reproducible orderings.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Where to write JSON session reports (none = don't write).
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

fn default_problems() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_limit() -> u64 {
    DEFAULT_LIMIT_SECS
}
fn default_true() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            problems: default_problems(),
            limit_secs: default_limit(),
            shuffle: true,
            seed: None,
            report_dir: None,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub problems: Option<PathBuf>,
    pub limit_secs: Option<u64>,
    pub shuffle: Option<bool>,
    pub seed: Option<u64>,
    pub report_dir: Option<PathBuf>,
}

impl QuizConfig {
    /// Apply command-line overrides on top of this config.
    pub fn merge_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(problems) = overrides.problems {
            self.problems = problems;
        }
        if let Some(limit) = overrides.limit_secs {
            self.limit_secs = limit;
        }
        if let Some(shuffle) = overrides.shuffle {
            self.shuffle = shuffle;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.report_dir.is_some() {
            self.report_dir = overrides.report_dir;
        }
        self
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::from_secs(self.limit_secs)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through as-is, never expanded again. An
/// unterminated `${` is left in place.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from `timequiz.toml` in the current directory.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or the default location if present.
///
/// An explicit path must exist. A missing default file yields
/// [`QuizConfig::default`].
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(problems) = std::env::var("TIMEQUIZ_PROBLEMS") {
        config.problems = PathBuf::from(problems);
    }
    if let Ok(limit) = std::env::var("TIMEQUIZ_LIMIT") {
        config.limit_secs = limit
            .trim()
            .parse()
            .with_context(|| format!("invalid TIMEQUIZ_LIMIT: '{limit}'"))?;
    }

    config.problems = resolve_path(&config.problems);
    config.report_dir = config.report_dir.as_deref().map(resolve_path);

    Ok(config)
}
