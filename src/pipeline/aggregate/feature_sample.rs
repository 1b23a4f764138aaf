use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SamplingConfig;
use crate::domain::{FeatureSample, Track};
use crate::pipeline::decade::Decade;

/// Uniform sample without replacement of up to `size` rows from the whole
/// cleaned set, decade-agnostic. The seeded generator plus ascending index
/// order make the artifact byte-identical across runs on identical input.
pub fn sample(tracks: &[Track], sampling: &SamplingConfig) -> Vec<FeatureSample> {
    let amount = sampling.size.min(tracks.len());
    if amount == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(sampling.seed);
    let mut indices = rand::seq::index::sample(&mut rng, tracks.len(), amount).into_vec();
    indices.sort_unstable();

    indices
        .into_iter()
        .filter_map(|i| {
            let track = &tracks[i];
            let decade = Decade::from_year(track.year)?;
            Some(FeatureSample {
                decade,
                energy: track.energy,
                danceability: track.danceability,
                popularity: track.popularity,
                genre: track
                    .genre
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                year: track.year,
            })
        })
        .collect()
}
