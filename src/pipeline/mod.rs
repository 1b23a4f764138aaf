pub mod aggregate;
pub mod clean;
pub mod decade;
pub mod normalize;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::Config;
use crate::constants::{
    BY_DECADE_DOC, BY_GENRE_DOC, ENERGY_DANCEABILITY_DOC, RADIAL_DATA_DOC, TOP_ARTISTS_DOC,
};
use crate::domain::Track;
use crate::error::Result;
use crate::loader;
use crate::sink::ArtifactSink;

/// Record count for one emitted document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub name: String,
    pub records: usize,
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub source: String,
    pub layout: String,
    pub rows_read: usize,
    pub malformed_rows: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub documents: Vec<DocumentSummary>,
    pub started_at: DateTime<Utc>,
    pub elapsed_secs: f64,
}

pub struct Pipeline;

impl Pipeline {
    /// Run the complete pipeline: discover and load the input, normalize and
    /// clean it, reduce it five ways, and hand each document to the sink.
    #[instrument(skip(config, sink))]
    pub fn run(config: &Config, sink: &dyn ArtifactSink) -> Result<RunSummary> {
        let started_at = Utc::now();
        let t_pipeline = std::time::Instant::now();

        // Step 1: Load raw rows
        info!("Loading dataset from {}", config.data_dir.display());
        println!("📡 Loading dataset from {}...", config.data_dir.display());
        let dataset = loader::load_from_dir(&config.data_dir)?;
        println!(
            "✅ Loaded {} records ({} layout)",
            dataset.rows.len(),
            dataset.layout.name()
        );

        // Step 2: Normalize onto the canonical track shape
        println!("🔧 Normalizing records...");
        let normalizer = normalize::for_layout(dataset.layout, &dataset.headers);
        let raw_tracks: Vec<_> = dataset
            .rows
            .iter()
            .map(|row| normalizer.normalize(row))
            .collect();

        // Step 3: Clean
        println!("🧹 Cleaning records...");
        let (tracks, clean_stats) =
            clean::clean(raw_tracks, &config.years, &config.imputation);
        println!(
            "✅ After cleaning: {} records ({} dropped)",
            clean_stats.kept,
            clean_stats.input_rows - clean_stats.kept
        );

        // Step 4: Aggregate and emit. The five reducers are independent; an
        // empty cleaned set just produces five empty documents.
        println!("📊 Aggregating...");
        let documents = Self::emit_documents(&tracks, config, sink)?;
        for doc in &documents {
            info!("Emitted {} with {} records", doc.name, doc.records);
        }

        let elapsed_secs = t_pipeline.elapsed().as_secs_f64();
        info!(
            "Pipeline finished in {:.2}s: {} rows in, {} kept",
            elapsed_secs, clean_stats.input_rows, clean_stats.kept
        );

        Ok(RunSummary {
            source: dataset.path.display().to_string(),
            layout: dataset.layout.name().to_string(),
            rows_read: dataset.rows.len(),
            malformed_rows: dataset.malformed_rows,
            rows_kept: clean_stats.kept,
            rows_dropped: clean_stats.input_rows - clean_stats.kept,
            documents,
            started_at,
            elapsed_secs,
        })
    }

    fn emit_documents(
        tracks: &[Track],
        config: &Config,
        sink: &dyn ArtifactSink,
    ) -> Result<Vec<DocumentSummary>> {
        let by_decade = aggregate::decade_summary::summarize(tracks);
        let by_genre = aggregate::genre_distribution::distribute(tracks, config.ranking.top_genres);
        let samples = aggregate::feature_sample::sample(tracks, &config.sampling);
        let top_artists = aggregate::top_artists::rank(tracks, config.ranking.top_artists);
        let radial = aggregate::radial::profile(tracks);

        let mut documents = Vec::new();
        let mut emit = |name: &str, value: serde_json::Value| -> Result<()> {
            let records = value.as_array().map(|a| a.len()).unwrap_or(0);
            sink.write_document(name, &value)?;
            documents.push(DocumentSummary {
                name: name.to_string(),
                records,
            });
            Ok(())
        };

        emit(BY_DECADE_DOC, serde_json::to_value(&by_decade)?)?;
        emit(BY_GENRE_DOC, serde_json::to_value(&by_genre)?)?;
        emit(ENERGY_DANCEABILITY_DOC, serde_json::to_value(&samples)?)?;
        emit(TOP_ARTISTS_DOC, serde_json::to_value(&top_artists)?)?;
        emit(RADIAL_DATA_DOC, serde_json::to_value(&radial)?)?;

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::InMemorySink;
    use std::io::Write;

    fn config_for(dir: &std::path::Path) -> Config {
        Config {
            data_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn empty_dataset_emits_five_empty_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join(crate::constants::FEATURE_RICH_INPUT))
            .unwrap();
        f.write_all(b"year,artist_name,popularity\n").unwrap();

        let sink = InMemorySink::new();
        let summary = Pipeline::run(&config_for(dir.path()), &sink).unwrap();

        assert_eq!(summary.rows_kept, 0);
        assert_eq!(
            sink.document_names(),
            vec![
                "by_decade",
                "by_genre",
                "energy_danceability",
                "radial_data",
                "top_artists"
            ]
        );
        for name in sink.document_names() {
            let doc = sink.get(&name).unwrap();
            assert_eq!(doc.as_array().map(|a| a.len()), Some(0), "{name} not empty");
        }
    }

    #[test]
    fn missing_input_surfaces_before_any_document() {
        let dir = tempfile::tempdir().unwrap();
        let sink = InMemorySink::new();
        let err = Pipeline::run(&config_for(dir.path()), &sink).unwrap_err();
        assert!(matches!(err, crate::error::AggregatorError::MissingInput(_)));
        assert!(sink.document_names().is_empty());
    }
}
