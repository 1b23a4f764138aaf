pub mod decade_summary;
pub mod feature_sample;
pub mod genre_distribution;
pub mod radial;
pub mod top_artists;

use std::collections::BTreeMap;

use crate::domain::Track;
use crate::pipeline::decade::Decade;

/// Partition tracks into decade buckets, chronologically ordered. Buckets
/// with no rows simply never appear, so downstream reducers cannot emit
/// empty-decade entries.
pub fn group_by_decade(tracks: &[Track]) -> BTreeMap<Decade, Vec<&Track>> {
    let mut groups: BTreeMap<Decade, Vec<&Track>> = BTreeMap::new();
    for track in tracks {
        // Cleaned tracks always map; anything else was dropped upstream
        if let Some(decade) = Decade::from_year(track.year) {
            groups.entry(decade).or_default().push(track);
        }
    }
    groups
}

pub fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
pub(crate) fn test_track(year: i32, popularity: f64, artist: &str, genre: Option<&str>) -> Track {
    Track {
        year,
        popularity,
        energy: 0.5,
        danceability: 0.5,
        valence: 0.5,
        acousticness: 0.5,
        tempo: 120.0,
        loudness: -12.0,
        artist_name: artist.to_string(),
        genre: genre.map(|g| g.to_string()),
        title: None,
    }
}
