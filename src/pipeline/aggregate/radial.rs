use crate::domain::{RadialProfile, Track};
use crate::pipeline::aggregate::{group_by_decade, mean};

/// Per-decade feature means for the radial spectrum view. A source schema
/// with no acousticness column ends up at a constant 0.5 here, because the
/// normalizer synthesizes 0.5 for every row.
pub fn profile(tracks: &[Track]) -> Vec<RadialProfile> {
    group_by_decade(tracks)
        .into_iter()
        .map(|(decade, rows)| RadialProfile {
            decade,
            energy: mean(rows.iter().map(|t| t.energy)),
            tempo: mean(rows.iter().map(|t| t.tempo)),
            valence: mean(rows.iter().map(|t| t.valence)),
            loudness: mean(rows.iter().map(|t| t.loudness)),
            acousticness: mean(rows.iter().map(|t| t.acousticness)),
        })
        .collect()
}
