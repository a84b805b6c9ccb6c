use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use sortstream::config::DatasetConfig;
use sortstream::{
    Catalog, ChannelTransport, CsvDatasetLoader, DatasetError, DatasetSource, ServerConfig,
    ServerMessage, SessionHandler, SessionState,
};

const CITIES: &str = "\
code;name;latitude;longitude
38185;Grenoble;45.166667;5.716667
75056;Paris;48.8566;2.3522
13055;Marseille;43.2965;5.3698
69123;Lyon;45.764;4.8357
00000;Nowhere;;
99999;Broken;abc;1.0
";

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn config_for(path: PathBuf) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.dataset.files.insert("p".to_string(), path);
    config.speeds.insert("0".to_string(), 0);
    config
}

#[tokio::test]
async fn test_loader_reads_distances_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "cities.csv", CITIES);
    let config = config_for(path);

    let loader = CsvDatasetLoader::from_config(&config.dataset);
    let distances = loader.load("p").await.unwrap();

    assert_eq!(distances.len(), 4);
    assert!(distances[0] < 1e-6);
    // Lyon is the closest of the remaining cities, Paris the farthest.
    assert!(distances[3] < distances[2]);
    assert!(distances[2] < distances[1]);
}

#[tokio::test]
async fn test_loader_respects_custom_columns_and_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "pts.csv", "lat,lon\n45.166667,5.716667\n45.2,5.7\n");
    let config = DatasetConfig {
        files: [("x".to_string(), path)].into_iter().collect(),
        delimiter: ',',
        latitude_column: "lat".to_string(),
        longitude_column: "lon".to_string(),
        ..DatasetConfig::default()
    };

    let distances = CsvDatasetLoader::from_config(&config).load("x").await.unwrap();
    assert_eq!(distances.len(), 2);
    assert!(distances[1] > 0.0 && distances[1] < 10.0);
}

#[tokio::test]
async fn test_missing_file_rejects_session_only() {
    let config = config_for(PathBuf::from("/does/not/exist.csv"));
    let loader = CsvDatasetLoader::from_config(&config.dataset);
    assert!(matches!(loader.load("p").await, Err(DatasetError::Io { .. })));

    let handler = SessionHandler::new(
        Arc::new(Catalog::from_config(&config)),
        Arc::new(loader),
    );
    let (mut transport, mut rx) = ChannelTransport::channel(4);
    let state = handler
        .handle(1, r#"{"algo":"shellsort","file":"p","speed":"0"}"#, &mut transport)
        .await;
    assert!(matches!(state, SessionState::Rejected { .. }));
    assert!(matches!(rx.recv().await, Some(ServerMessage::Rejected { .. })));
}

#[tokio::test]
async fn test_file_backed_session_sorts_distances() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "cities.csv", CITIES);
    let config = config_for(path);
    let loader = CsvDatasetLoader::from_config(&config.dataset);
    let mut expected = loader.load("p").await.unwrap();
    expected.sort_by(f64::total_cmp);

    let handler = SessionHandler::new(
        Arc::new(Catalog::from_config(&config)),
        Arc::new(loader),
    );
    let (mut transport, mut rx) = ChannelTransport::channel(64);
    let state = handler
        .handle(1, r#"{"algo":"heapsort","file":"p","speed":"0"}"#, &mut transport)
        .await;
    drop(transport);

    let mut last = None;
    while let Some(message) = rx.recv().await {
        last = Some(message);
    }
    assert!(matches!(state, SessionState::Completed { .. }));
    match last {
        Some(ServerMessage::Step(event)) => assert_eq!(event.values, expected),
        other => panic!("expected a final step, got {other:?}"),
    }
}
