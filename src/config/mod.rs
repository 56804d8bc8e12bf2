//! Project configuration
//!
//! Loads per-project settings from a `numcensus.toml` next to the corpus.
//! Everything is optional; values act as defaults under the CLI flags.
//!
//! # Configuration Format
//!
//! ```toml
//! # numcensus.toml
//!
//! [scan]
//! language = "en"
//! min = 0
//! max = 100
//!
//! [defaults]
//! format = "text"
//! workers = 8
//! progress_every = 100000
//!
//! [lexicon]
//! path = "lexicon.json"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "numcensus.toml";

/// Scan parameters that may come from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanDefaults {
    pub language: Option<String>,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// CLI defaults that may come from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliDefaults {
    pub format: Option<String>,
    pub workers: Option<usize>,
    pub progress_every: Option<u64>,
}

/// Lexicon settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub path: Option<PathBuf>,
}

/// Full project configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub scan: ScanDefaults,
    pub defaults: CliDefaults,
    pub lexicon: LexiconConfig,
}

/// Load `numcensus.toml` from a directory. A missing file yields the
/// defaults; a malformed file is reported and ignored rather than
/// aborting the run.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let path = dir.join(CONFIG_FILE_NAME);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(_) => {
            debug!("no {} found in {}", CONFIG_FILE_NAME, dir.display());
            return ProjectConfig::default();
        }
    };
    match toml::from_str(&contents) {
        Ok(config) => {
            debug!("loaded project config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("ignoring malformed {}: {}", path.display(), e);
            ProjectConfig::default()
        }
    }
}
