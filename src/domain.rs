use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::pipeline::decade::Decade;

/// A normalized track as produced by a layout normalizer, before cleaning.
/// Numeric fields are still optional; the cleaner imputes or drops.
#[derive(Debug, Clone, Default)]
pub struct RawTrack {
    pub year: Option<i32>,
    pub popularity: Option<f64>,
    pub energy: Option<f64>,
    pub danceability: Option<f64>,
    pub valence: Option<f64>,
    pub acousticness: Option<f64>,
    pub tempo: Option<f64>,
    pub loudness: Option<f64>,
    pub artist_name: String,
    pub genre: Option<String>,
    pub title: Option<String>,
    pub duration_ms: Option<f64>,
}

/// Canonical track record consumed by every aggregator. Exists only after
/// cleaning: `year` is guaranteed in range and all numeric features are
/// concrete (imputed where the source was missing them).
#[derive(Debug, Clone)]
pub struct Track {
    pub year: i32,
    pub popularity: f64,
    pub energy: f64,
    pub danceability: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub tempo: f64,
    pub loudness: f64,
    pub artist_name: String,
    pub genre: Option<String>,
    pub title: Option<String>,
}

/// Per-decade popularity summary for the `by_decade` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecadeSummary {
    pub decade: Decade,
    pub start_year: i32,
    pub end_year: i32,
    pub avg_popularity: f64,
    pub count: usize,
    pub min_year: i32,
    pub max_year: i32,
}

/// Per-decade genre shares for the `by_genre` document. Shares are fractions
/// of the decade's total row count and sum to at most 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreDistribution {
    pub decade: Decade,
    pub genres: BTreeMap<String, f64>,
    pub total: usize,
}

/// One sampled track for the `energy_danceability` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSample {
    pub decade: Decade,
    pub energy: f64,
    pub danceability: f64,
    pub popularity: f64,
    pub genre: String,
    pub year: i32,
}

/// One ranked artist within a decade for the `top_artists` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRanking {
    pub name: String,
    pub decade: Decade,
    /// Mean popularity across the artist's rows in the decade
    pub popularity: f64,
    /// Modal genre for the artist-decade group
    pub genre: String,
    pub hit_count: usize,
}

/// Per-decade feature means for the `radial_data` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialProfile {
    pub decade: Decade,
    pub energy: f64,
    pub tempo: f64,
    pub valence: f64,
    pub loudness: f64,
    pub acousticness: f64,
}
