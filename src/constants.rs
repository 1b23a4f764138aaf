use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Candidate input file names, searched for under the configured data dir.
/// These constants define the mapping between dataset layouts and files.

// Year-bearing layout (preferred when both files are present and readable)
pub const YEAR_BEARING_INPUT: &str = "million_songs.csv";
// Feature-rich layout (used when the year-bearing source is unavailable)
pub const FEATURE_RICH_INPUT: &str = "spotify_tracks.csv";

// Output document names; each becomes `<name>.json` in the output dir
pub const BY_DECADE_DOC: &str = "by_decade";
pub const BY_GENRE_DOC: &str = "by_genre";
pub const ENERGY_DANCEABILITY_DOC: &str = "energy_danceability";
pub const TOP_ARTISTS_DOC: &str = "top_artists";
pub const RADIAL_DATA_DOC: &str = "radial_data";

/// Header column whose presence identifies the year-bearing layout
pub const YEAR_BEARING_MARKER_COLUMN: &str = "song.year";

/// Static decade-summary placeholder emitted by the CLI when no input source
/// can be located. Only `by_decade` is written on this path; the other four
/// documents are never produced without real input.
pub static PLACEHOLDER_BY_DECADE: Lazy<Value> = Lazy::new(|| {
    json!([
        { "decade": "1960s", "startYear": 1960, "endYear": 1969, "avgPopularity": 35 },
        { "decade": "1970s", "startYear": 1970, "endYear": 1979, "avgPopularity": 40 },
        { "decade": "1980s", "startYear": 1980, "endYear": 1989, "avgPopularity": 45 },
        { "decade": "1990s", "startYear": 1990, "endYear": 1999, "avgPopularity": 50 },
        { "decade": "2000s", "startYear": 2000, "endYear": 2009, "avgPopularity": 55 },
        { "decade": "2010s", "startYear": 2010, "endYear": 2019, "avgPopularity": 60 },
        { "decade": "2020s", "startYear": 2020, "endYear": 2024, "avgPopularity": 65 }
    ])
});
