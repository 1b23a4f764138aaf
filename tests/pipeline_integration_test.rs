use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use sonic_aggregator::config::Config;
use sonic_aggregator::pipeline::Pipeline;
use sonic_aggregator::sink::JsonDirSink;

fn write_input(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn read_document(dir: &Path, name: &str) -> Value {
    let raw = fs::read_to_string(dir.join(format!("{name}.json"))).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn config_for(data_dir: &Path, out_dir: &Path) -> Config {
    Config {
        data_dir: data_dir.to_path_buf(),
        output_dir: out_dir.to_path_buf(),
        ..Config::default()
    }
}

#[test]
fn feature_rich_dataset_end_to_end() -> Result<()> {
    let data_dir = tempdir()?;
    let out_dir = tempdir()?;

    write_input(
        data_dir.path(),
        "spotify_tracks.csv",
        "year,artist_name,track_name,popularity,energy,danceability,valence,acousticness,tempo,loudness,genre\n\
         1965,The Byrds,Mr. Tambourine Man,10,0.4,0.5,0.6,0.3,120,-9,folk rock\n\
         1965,The Kinks,Tired of Waiting,20,0.5,0.4,0.7,0.2,118,-8,rock\n\
         1975,Queen,Bohemian Rhapsody,80,0.6,0.3,0.5,0.25,72,-10,rock\n",
    );

    let config = config_for(data_dir.path(), out_dir.path());
    let sink = JsonDirSink::new(out_dir.path());
    let summary = Pipeline::run(&config, &sink)?;

    assert_eq!(summary.rows_read, 3);
    assert_eq!(summary.rows_kept, 3);
    assert_eq!(summary.layout, "feature-rich");

    // DecadeSummary: 1960s avg 15 over 2 rows, 1970s avg 80 over 1 row,
    // no other decades
    let by_decade = read_document(out_dir.path(), "by_decade");
    let entries = by_decade.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["decade"], "1960s");
    assert_eq!(entries[0]["avgPopularity"], 15.0);
    assert_eq!(entries[0]["count"], 2);
    assert_eq!(entries[0]["startYear"], 1960);
    assert_eq!(entries[0]["endYear"], 1969);
    assert_eq!(entries[0]["minYear"], 1965);
    assert_eq!(entries[0]["maxYear"], 1965);
    assert_eq!(entries[1]["decade"], "1970s");
    assert_eq!(entries[1]["avgPopularity"], 80.0);
    assert_eq!(entries[1]["count"], 1);

    // Genre shares are fractions of the decade total
    let by_genre = read_document(out_dir.path(), "by_genre");
    let sixties = &by_genre.as_array().unwrap()[0];
    assert_eq!(sixties["total"], 2);
    assert_eq!(sixties["genres"]["folk rock"], 0.5);
    assert_eq!(sixties["genres"]["rock"], 0.5);

    // Every cleaned row fits into the sample
    let samples = read_document(out_dir.path(), "energy_danceability");
    assert_eq!(samples.as_array().unwrap().len(), 3);

    // Top artists carry mean popularity and hit counts
    let top_artists = read_document(out_dir.path(), "top_artists");
    let rankings = top_artists.as_array().unwrap();
    let queen = rankings
        .iter()
        .find(|r| r["name"] == "Queen")
        .expect("Queen ranked");
    assert_eq!(queen["decade"], "1970s");
    assert_eq!(queen["popularity"], 80.0);
    assert_eq!(queen["hitCount"], 1);
    assert_eq!(queen["genre"], "rock");

    let radial = read_document(out_dir.path(), "radial_data");
    let seventies = radial
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["decade"] == "1970s")
        .expect("1970s profile");
    assert_eq!(seventies["energy"], 0.6);
    assert_eq!(seventies["tempo"], 72.0);

    Ok(())
}

#[test]
fn year_bearing_dataset_derives_missing_features() -> Result<()> {
    let data_dir = tempdir()?;
    let out_dir = tempdir()?;

    write_input(
        data_dir.path(),
        "million_songs.csv",
        "song.year,artist.name,song.title,song.tempo,song.loudness,song.duration,song.hotttnesss,artist.terms\n\
         1982,Heart,Song A,200,-30,210,0.6,hard rock\n\
         0,Nameless,Song B,120,-10,180,0.4,rock\n\
         1985,Heart,Song C,not-a-tempo,,190,-1,hard rock\n",
    );

    let config = config_for(data_dir.path(), out_dir.path());
    let sink = JsonDirSink::new(out_dir.path());
    let summary = Pipeline::run(&config, &sink)?;

    assert_eq!(summary.layout, "year-bearing");
    // Row with year 0 is dropped; the other two survive
    assert_eq!(summary.rows_read, 3);
    assert_eq!(summary.rows_kept, 2);

    let samples = read_document(out_dir.path(), "energy_danceability");
    let rows = samples.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let song_a = rows.iter().find(|r| r["year"] == 1982).unwrap();
    // energy = clamp((-30 + 60) / 60) = 0.5, danceability = clamp((200-60)/140) = 1.0
    assert_eq!(song_a["energy"], 0.5);
    assert_eq!(song_a["danceability"], 1.0);
    assert_eq!(song_a["genre"], "hard rock");
    // hotttnesss 0.6 scales to 60
    assert_eq!(song_a["popularity"], 60.0);

    let song_c = rows.iter().find(|r| r["year"] == 1985).unwrap();
    // Missing loudness and unparseable tempo fall back to the neutral 0.5,
    // negative hotttnesss clips to 0
    assert_eq!(song_c["energy"], 0.5);
    assert_eq!(song_c["danceability"], 0.5);
    assert_eq!(song_c["popularity"], 0.0);

    // Radial acousticness is the synthesized constant for this layout
    let radial = read_document(out_dir.path(), "radial_data");
    for profile in radial.as_array().unwrap() {
        assert_eq!(profile["acousticness"], 0.5);
        assert_eq!(profile["valence"], 0.5);
    }

    Ok(())
}

#[test]
fn year_bearing_source_preferred_over_feature_rich() -> Result<()> {
    let data_dir = tempdir()?;
    let out_dir = tempdir()?;

    write_input(
        data_dir.path(),
        "million_songs.csv",
        "song.year,artist.name,song.tempo,song.loudness,song.hotttnesss,artist.terms\n\
         1971,The Who,135,-8,0.8,rock\n",
    );
    write_input(
        data_dir.path(),
        "spotify_tracks.csv",
        "year,artist_name,popularity\n1999,Moby,74\n",
    );

    let config = config_for(data_dir.path(), out_dir.path());
    let sink = JsonDirSink::new(out_dir.path());
    let summary = Pipeline::run(&config, &sink)?;

    assert_eq!(summary.layout, "year-bearing");
    let by_decade = read_document(out_dir.path(), "by_decade");
    assert_eq!(by_decade[0]["decade"], "1970s");

    Ok(())
}

#[test]
fn identical_runs_write_byte_identical_sample_documents() -> Result<()> {
    let data_dir = tempdir()?;

    let mut csv = String::from("year,artist_name,popularity,energy,danceability,genre\n");
    for i in 0..1200 {
        let year = 1960 + (i % 65);
        csv.push_str(&format!("{year},artist{i},{},0.5,0.5,rock\n", i % 100));
    }
    write_input(data_dir.path(), "spotify_tracks.csv", &csv);

    let out_a = tempdir()?;
    let out_b = tempdir()?;
    Pipeline::run(
        &config_for(data_dir.path(), out_a.path()),
        &JsonDirSink::new(out_a.path()),
    )?;
    Pipeline::run(
        &config_for(data_dir.path(), out_b.path()),
        &JsonDirSink::new(out_b.path()),
    )?;

    let first = fs::read(out_a.path().join("energy_danceability.json"))?;
    let second = fs::read(out_b.path().join("energy_danceability.json"))?;
    assert_eq!(first, second);

    // Sample is capped at the configured size
    let samples: Value = serde_json::from_slice(&first)?;
    assert_eq!(samples.as_array().unwrap().len(), 500);

    Ok(())
}

#[test]
fn artist_rankings_respect_top_n_and_ordering() -> Result<()> {
    let data_dir = tempdir()?;
    let out_dir = tempdir()?;

    let mut csv = String::from("year,artist_name,popularity,genre\n");
    for i in 0..15 {
        csv.push_str(&format!("1994,artist{i:02},{},grunge\n", i * 5));
    }
    write_input(data_dir.path(), "spotify_tracks.csv", &csv);

    let config = config_for(data_dir.path(), out_dir.path());
    Pipeline::run(&config, &JsonDirSink::new(out_dir.path()))?;

    let top_artists = read_document(out_dir.path(), "top_artists");
    let rankings = top_artists.as_array().unwrap();
    assert_eq!(rankings.len(), 10);

    let popularity: Vec<f64> = rankings
        .iter()
        .map(|r| r["popularity"].as_f64().unwrap())
        .collect();
    for pair in popularity.windows(2) {
        assert!(pair[0] >= pair[1], "rankings must be non-increasing");
    }

    Ok(())
}

#[test]
fn genre_fractions_sum_to_at_most_one() -> Result<()> {
    let data_dir = tempdir()?;
    let out_dir = tempdir()?;

    let mut csv = String::from("year,artist_name,popularity,genre\n");
    for i in 0..40 {
        // 12 distinct genres so the top-10 cut leaves some out of the map
        csv.push_str(&format!("2003,artist{i},50,genre{}\n", i % 12));
    }
    write_input(data_dir.path(), "spotify_tracks.csv", &csv);

    Pipeline::run(
        &config_for(data_dir.path(), out_dir.path()),
        &JsonDirSink::new(out_dir.path()),
    )?;

    let by_genre = read_document(out_dir.path(), "by_genre");
    for entry in by_genre.as_array().unwrap() {
        let genres = entry["genres"].as_object().unwrap();
        assert!(genres.len() <= 10);
        let sum: f64 = genres.values().map(|v| v.as_f64().unwrap()).sum();
        assert!(sum <= 1.0 + 1e-9, "shares summed to {sum}");
    }

    Ok(())
}
