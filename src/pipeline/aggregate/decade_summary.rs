use crate::domain::{DecadeSummary, Track};
use crate::pipeline::aggregate::{group_by_decade, mean};

/// Mean popularity, row count, and observed year span per decade. Decades
/// with no rows are omitted, so the mean is always over a non-empty set.
pub fn summarize(tracks: &[Track]) -> Vec<DecadeSummary> {
    group_by_decade(tracks)
        .into_iter()
        .map(|(decade, rows)| {
            let min_year = rows.iter().map(|t| t.year).min().unwrap_or(decade.start_year());
            let max_year = rows.iter().map(|t| t.year).max().unwrap_or(decade.end_year());
            DecadeSummary {
                decade,
                start_year: decade.start_year(),
                end_year: decade.end_year(),
                avg_popularity: mean(rows.iter().map(|t| t.popularity)),
                count: rows.len(),
                min_year,
                max_year,
            }
        })
        .collect()
}
