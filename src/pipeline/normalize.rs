use csv::StringRecord;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::RawTrack;
use crate::loader::SourceLayout;

/// Canonical fields a normalizer can pull out of a source row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Popularity,
    Energy,
    Danceability,
    Valence,
    Acousticness,
    Tempo,
    Loudness,
    ArtistName,
    Genre,
    ArtistTerms,
    Title,
    DurationMs,
}

/// Canonical-field-to-column-index map, resolved once against the header.
/// Aggregators never see source column names; the selector is the only place
/// a rename happens.
pub struct FieldMap {
    indices: HashMap<Field, usize>,
}

impl FieldMap {
    fn resolve(headers: &StringRecord, columns: &[(Field, &str)]) -> FieldMap {
        let mut indices = HashMap::new();
        for (field, column) in columns {
            if let Some(idx) = headers.iter().position(|h| h.trim() == *column) {
                indices.insert(*field, idx);
            } else {
                debug!("Source lacks column '{}'; field will be synthesized", column);
            }
        }
        FieldMap { indices }
    }

    fn has(&self, field: Field) -> bool {
        self.indices.contains_key(&field)
    }

    fn text<'a>(&self, row: &'a StringRecord, field: Field) -> Option<&'a str> {
        let idx = *self.indices.get(&field)?;
        match row.get(idx) {
            Some(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    fn number(&self, row: &StringRecord, field: Field) -> Option<f64> {
        let value: f64 = self.text(row, field)?.trim().parse().ok()?;
        if value.is_finite() {
            Some(value)
        } else {
            None
        }
    }
}

/// Turns one source row into a canonical raw track. Pure per-row transform;
/// invalid years are left as `None` for the cleaner to drop, never an error.
pub trait Normalizer {
    fn layout(&self) -> SourceLayout;
    fn normalize(&self, row: &StringRecord) -> RawTrack;
}

/// Single normalizer implementation driven by a layout-specific column map.
/// Derivation only kicks in for fields whose column is absent from the source
/// schema; row-level gaps in present columns flow through as `None` and are
/// imputed by the cleaner.
pub struct MappedNormalizer {
    layout: SourceLayout,
    fields: FieldMap,
    /// Source popularity is on the unit interval and must be scaled to 0-100
    popularity_unit_interval: bool,
}

impl MappedNormalizer {
    /// MSD-style export: `song.*`/`artist.*` columns, no audio-feature set.
    pub fn year_bearing(headers: &StringRecord) -> MappedNormalizer {
        let fields = FieldMap::resolve(
            headers,
            &[
                (Field::Year, "song.year"),
                (Field::ArtistName, "artist.name"),
                (Field::Title, "song.title"),
                (Field::Tempo, "song.tempo"),
                (Field::Loudness, "song.loudness"),
                (Field::DurationMs, "song.duration"),
                (Field::Popularity, "song.hotttnesss"),
                (Field::ArtistTerms, "artist.terms"),
            ],
        );
        MappedNormalizer {
            layout: SourceLayout::YearBearing,
            fields,
            popularity_unit_interval: true,
        }
    }

    /// Audio-feature export: canonical columns under their own names.
    pub fn feature_rich(headers: &StringRecord) -> MappedNormalizer {
        let fields = FieldMap::resolve(
            headers,
            &[
                (Field::Year, "year"),
                (Field::ArtistName, "artist_name"),
                (Field::Title, "track_name"),
                (Field::Tempo, "tempo"),
                (Field::Loudness, "loudness"),
                (Field::DurationMs, "duration_ms"),
                (Field::Popularity, "popularity"),
                (Field::Energy, "energy"),
                (Field::Danceability, "danceability"),
                (Field::Valence, "valence"),
                (Field::Acousticness, "acousticness"),
                (Field::Genre, "genre"),
            ],
        );
        MappedNormalizer {
            layout: SourceLayout::FeatureRich,
            fields,
            popularity_unit_interval: false,
        }
    }

    fn year(&self, row: &StringRecord) -> Option<i32> {
        // Non-numeric and non-positive years are both treated as missing;
        // the cleaner drops those rows.
        let year = self.fields.number(row, Field::Year)? as i32;
        if year > 0 {
            Some(year)
        } else {
            None
        }
    }

    fn popularity(&self, row: &StringRecord) -> Option<f64> {
        let raw = self.fields.number(row, Field::Popularity)?;
        if self.popularity_unit_interval {
            Some(raw.max(0.0) * 100.0)
        } else {
            Some(raw)
        }
    }

    fn genre(&self, row: &StringRecord) -> Option<String> {
        if self.fields.has(Field::Genre) {
            return self.fields.text(row, Field::Genre).map(|s| s.to_string());
        }
        // Schema gap: fall back to the free-text artist terms, verbatim
        match self.fields.text(row, Field::ArtistTerms) {
            Some(terms) => Some(terms.to_string()),
            None => Some("Unknown".to_string()),
        }
    }
}

impl Normalizer for MappedNormalizer {
    fn layout(&self) -> SourceLayout {
        self.layout
    }

    fn normalize(&self, row: &StringRecord) -> RawTrack {
        let tempo = self.fields.number(row, Field::Tempo);
        let loudness = self.fields.number(row, Field::Loudness);

        let energy = if self.fields.has(Field::Energy) {
            self.fields.number(row, Field::Energy)
        } else {
            Some(energy_from_loudness(loudness))
        };

        let danceability = if self.fields.has(Field::Danceability) {
            self.fields.number(row, Field::Danceability)
        } else {
            Some(danceability_from_tempo(tempo))
        };

        let valence = if self.fields.has(Field::Valence) {
            self.fields.number(row, Field::Valence)
        } else {
            Some(0.5)
        };

        let acousticness = if self.fields.has(Field::Acousticness) {
            self.fields.number(row, Field::Acousticness)
        } else {
            Some(0.5)
        };

        RawTrack {
            year: self.year(row),
            popularity: self.popularity(row),
            energy,
            danceability,
            valence,
            acousticness,
            tempo,
            loudness,
            artist_name: self
                .fields
                .text(row, Field::ArtistName)
                .unwrap_or_default()
                .to_string(),
            genre: self.genre(row),
            title: self.fields.text(row, Field::Title).map(|s| s.to_string()),
            duration_ms: self.fields.number(row, Field::DurationMs),
        }
    }
}

/// Build the normalizer matching the detected source layout.
pub fn for_layout(layout: SourceLayout, headers: &StringRecord) -> Box<dyn Normalizer + Send + Sync> {
    match layout {
        SourceLayout::YearBearing => Box::new(MappedNormalizer::year_bearing(headers)),
        SourceLayout::FeatureRich => Box::new(MappedNormalizer::feature_rich(headers)),
    }
}

/// Energy proxy for sources without audio features: loudness rescaled from
/// the [-60, 0] dB range onto [0, 1].
fn energy_from_loudness(loudness: Option<f64>) -> f64 {
    match loudness {
        Some(db) => ((db + 60.0) / 60.0).clamp(0.0, 1.0),
        None => 0.5,
    }
}

/// Danceability proxy: tempo rescaled from the [60, 200] bpm range onto [0, 1].
fn danceability_from_tempo(tempo: Option<f64>) -> f64 {
    match tempo {
        Some(bpm) => ((bpm - 60.0) / 140.0).clamp(0.0, 1.0),
        None => 0.5,
    }
}
