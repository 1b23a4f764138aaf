use crate::error::{AggregatorError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Process-wide run settings. Every tunable the pipeline reads lives here,
/// resolved once at startup; the pipeline itself never consults the
/// environment or re-derives these values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory searched for the candidate input files
    pub data_dir: PathBuf,
    /// Directory the JSON artifacts are written to
    pub output_dir: PathBuf,
    pub years: YearRange,
    pub imputation: ImputationDefaults,
    pub sampling: SamplingConfig,
    pub ranking: RankingConfig,
}

/// Valid release-year window; rows outside it are dropped by the cleaner.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Fixed substitutes for missing numeric features. Rows are never dropped
/// for a missing acoustic feature, only for a missing year.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ImputationDefaults {
    pub popularity: f64,
    pub energy: f64,
    pub danceability: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub tempo: f64,
    pub loudness: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Upper bound on the feature sample; the full set is used when smaller
    pub size: usize,
    /// Fixed seed so re-runs over identical input produce identical samples
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Genres kept per decade in the distribution
    pub top_genres: usize,
    /// Artists kept per decade in the ranking
    pub top_artists: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("data/processed"),
            years: YearRange::default(),
            imputation: ImputationDefaults::default(),
            sampling: SamplingConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self { min: 1960, max: 2024 }
    }
}

impl Default for ImputationDefaults {
    fn default() -> Self {
        Self {
            popularity: 0.0,
            energy: 0.5,
            danceability: 0.5,
            valence: 0.5,
            acousticness: 0.5,
            tempo: 120.0,
            loudness: -12.0,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { size: 500, seed: 42 }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top_genres: 10, top_artists: 10 }
    }
}

impl Config {
    /// Load a TOML config file; missing keys fall back to the defaults above.
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            AggregatorError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Load from an explicit path, or use defaults when none is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
