//! teamforge configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::{FormationConfig, FormationEngine, DEFAULT_CANDIDATE_WINDOW};
use crate::matcher::{BestMatchFinder, DEFAULT_ACCEPTANCE_THRESHOLD};

/// Top-level teamforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamforgeConfig {
    /// Candidates the greedy assembler scores per pick.
    #[serde(default = "default_candidate_window")]
    pub candidate_window: usize,
    /// Minimum compatibility total for a best-match suggestion.
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: f64,
    /// Team size (including the target student) for `teamforge match`.
    #[serde(default = "default_match_size")]
    pub default_match_size: usize,
    /// Output directory for formation reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_candidate_window() -> usize {
    DEFAULT_CANDIDATE_WINDOW
}
fn default_acceptance_threshold() -> f64 {
    DEFAULT_ACCEPTANCE_THRESHOLD
}
fn default_match_size() -> usize {
    3
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./teamforge-results")
}

impl Default for TeamforgeConfig {
    fn default() -> Self {
        Self {
            candidate_window: default_candidate_window(),
            acceptance_threshold: default_acceptance_threshold(),
            default_match_size: default_match_size(),
            output_dir: default_output_dir(),
        }
    }
}

impl TeamforgeConfig {
    pub fn engine(&self) -> FormationEngine {
        FormationEngine::new(FormationConfig {
            candidate_window: self.candidate_window,
        })
    }

    pub fn finder(&self) -> BestMatchFinder {
        BestMatchFinder::new(self.acceptance_threshold)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `teamforge.toml` in the current directory
/// 2. `~/.config/teamforge/config.toml`
///
/// Environment variable override: `TEAMFORGE_CANDIDATE_WINDOW`.
pub fn load_config_from(path: Option<&Path>) -> Result<TeamforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("teamforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TeamforgeConfig::default(),
    };

    if let Ok(window) = std::env::var("TEAMFORGE_CANDIDATE_WINDOW") {
        config.candidate_window = window
            .trim()
            .parse()
            .with_context(|| format!("invalid TEAMFORGE_CANDIDATE_WINDOW: {window}"))?;
    }

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config_str(content: &str) -> Result<TeamforgeConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("teamforge"))
}
