use tracing::info;

use crate::config::{ImputationDefaults, YearRange};
use crate::domain::{RawTrack, Track};

/// Row-level outcome counts from a cleaning pass
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanStats {
    pub input_rows: usize,
    pub kept: usize,
    pub dropped_missing_year: usize,
    pub dropped_out_of_range: usize,
}

/// Validate and impute. Only a missing year is fatal for a row; every other
/// gap is filled with the configured default. Rows outside the valid year
/// window are dropped.
pub fn clean(
    raw_tracks: Vec<RawTrack>,
    years: &YearRange,
    defaults: &ImputationDefaults,
) -> (Vec<Track>, CleanStats) {
    let mut stats = CleanStats {
        input_rows: raw_tracks.len(),
        ..CleanStats::default()
    };

    let mut tracks = Vec::with_capacity(raw_tracks.len());
    for raw in raw_tracks {
        let year = match raw.year {
            Some(year) => year,
            None => {
                stats.dropped_missing_year += 1;
                continue;
            }
        };

        if year < years.min || year > years.max {
            stats.dropped_out_of_range += 1;
            continue;
        }

        tracks.push(Track {
            year,
            popularity: raw.popularity.unwrap_or(defaults.popularity),
            energy: raw.energy.unwrap_or(defaults.energy),
            danceability: raw.danceability.unwrap_or(defaults.danceability),
            valence: raw.valence.unwrap_or(defaults.valence),
            acousticness: raw.acousticness.unwrap_or(defaults.acousticness),
            tempo: raw.tempo.unwrap_or(defaults.tempo),
            loudness: raw.loudness.unwrap_or(defaults.loudness),
            artist_name: raw.artist_name,
            genre: raw.genre,
            title: raw.title,
        });
    }
    stats.kept = tracks.len();

    info!(
        "After cleaning: {} records kept ({} missing year, {} outside {}-{})",
        stats.kept, stats.dropped_missing_year, stats.dropped_out_of_range, years.min, years.max
    );

    (tracks, stats)
}
