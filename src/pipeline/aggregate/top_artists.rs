use std::collections::BTreeMap;

use crate::domain::{ArtistRanking, Track};
use crate::pipeline::aggregate::{group_by_decade, mean};

/// Top artists per decade by mean popularity. Each artist-decade group gets
/// its mean popularity, row count, and modal genre; only the `top_n` best
/// artists per decade survive, in descending popularity order.
pub fn rank(tracks: &[Track], top_n: usize) -> Vec<ArtistRanking> {
    let mut rankings = Vec::new();

    for (decade, rows) in group_by_decade(tracks) {
        // BTreeMap keys the artist grouping so iteration order, and with it
        // truncation under popularity ties, is stable
        let mut by_artist: BTreeMap<&str, Vec<&Track>> = BTreeMap::new();
        for track in rows {
            by_artist.entry(track.artist_name.as_str()).or_default().push(track);
        }

        let mut decade_rankings: Vec<ArtistRanking> = by_artist
            .into_iter()
            .map(|(name, artist_rows)| ArtistRanking {
                name: name.to_string(),
                decade,
                popularity: mean(artist_rows.iter().map(|t| t.popularity)),
                genre: modal_genre(&artist_rows),
                hit_count: artist_rows.len(),
            })
            .collect();

        decade_rankings.sort_by(|a, b| {
            b.popularity
                .partial_cmp(&a.popularity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        decade_rankings.truncate(top_n);
        rankings.extend(decade_rankings);
    }

    rankings
}

/// Most frequent genre in the group; ties break to the lexicographically
/// smallest label, and a group with no genre at all reads as Unknown.
fn modal_genre(rows: &[&Track]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for track in rows {
        if let Some(genre) = track.genre.as_deref() {
            *counts.entry(genre).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(genre, _)| genre.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
