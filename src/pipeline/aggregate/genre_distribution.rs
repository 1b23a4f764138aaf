use std::collections::{BTreeMap, HashMap};

use crate::domain::{GenreDistribution, Track};
use crate::pipeline::aggregate::group_by_decade;

/// Per-decade genre shares: the top N most frequent cleaned labels, each as a
/// fraction of the decade's total row count (not of the top-N subtotal), so
/// shares sum to at most 1.0.
pub fn distribute(tracks: &[Track], top_n: usize) -> Vec<GenreDistribution> {
    group_by_decade(tracks)
        .into_iter()
        .map(|(decade, rows)| {
            let total = rows.len();

            let mut counts: HashMap<String, usize> = HashMap::new();
            for track in &rows {
                if let Some(label) = track.genre.as_deref().and_then(clean_label) {
                    *counts.entry(label).or_insert(0) += 1;
                }
            }

            // Top N by count; equal counts break on label so truncation is
            // independent of hash order
            let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(top_n);

            let mut genres: BTreeMap<String, f64> = ranked
                .into_iter()
                .map(|(label, count)| (label, count as f64 / total as f64))
                .collect();

            if genres.is_empty() {
                genres.insert("Unknown".to_string(), 1.0);
            }

            GenreDistribution { decade, genres, total }
        })
        .collect()
}

/// Trim whitespace and strip quote characters; labels that clean down to
/// nothing, "nan", or "0" are unusable and excluded from the counts.
fn clean_label(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") || cleaned == "0" {
        None
    } else {
        Some(cleaned)
    }
}
