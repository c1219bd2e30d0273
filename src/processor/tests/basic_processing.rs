//! Basic processing tests

use super::{create_test_network, STATIONS_JSON};
use crate::processor::TransitProcessor;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_basic_processing_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_network(&temp_dir);
    let paths = config.paths.clone();

    let processor = TransitProcessor::new(config).unwrap();
    let stats = processor.process().unwrap();

    assert_eq!(stats.stations.features_read, 3);
    assert_eq!(stats.stations.records_emitted, 2);
    assert_eq!(stats.stations.features_dropped, 1);
    assert_eq!(stats.connections.features_read, 2);
    assert_eq!(stats.connections.records_emitted, 2);
    assert_eq!(stats.connections.features_dropped, 1);
    assert_eq!(stats.outputs.len(), 2);
    assert!(stats.total_output_size() > 0);

    assert!(paths.stations_output.exists());
    assert!(paths.connections_output.exists());
}

#[test]
fn test_station_output_shape() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_network(&temp_dir);
    let output = config.paths.stations_output.clone();

    TransitProcessor::new(config).unwrap().process().unwrap();
    let stations = read_json(&output);

    assert_eq!(stations["type"], "FeatureCollection");
    assert_eq!(
        stations["crs"],
        json!({"type": "name", "properties": {"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}})
    );

    let features = stations["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(
        features[0],
        json!({
            "type": "Feature",
            "Name": "Oxford Circus",
            "geometry": {"type": "Point", "coordinates": [-0.1415, 51.5152]},
            "Station ID": "940GZZLUOXC",
            "Zone": "1",
            "Lines": "Central Line, Victoria Line, Bakerloo Line",
            "Number of Lines": 3
        })
    );
    assert_eq!(features[1]["Name"], "Stratford");
    assert_eq!(
        features[1]["Lines"],
        "Docklands Light Railway, Overground, Crossrail"
    );
    assert!(features[1].get("properties").is_none());
}

#[test]
fn test_connection_output_shape() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_network(&temp_dir);
    let output = config.paths.connections_output.clone();

    TransitProcessor::new(config).unwrap().process().unwrap();
    let connections = read_json(&output);

    assert!(connections.get("crs").is_none());
    let features = connections["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["Line"], "Central Line");
    assert_eq!(features[0]["start_sid"], "940GZZLUOXC");
    assert_eq!(features[0]["end_sid"], "940GZZLUTCR");
    assert_eq!(features[1]["Line"], "Jubilee Line");
    assert_eq!(features[1]["start_sid"], Value::Null);
    assert_eq!(features[1]["end_sid"], Value::Null);
    assert_eq!(features[0]["geometry"], features[1]["geometry"]);
}

#[test]
fn test_geometry_bytes_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_network(&temp_dir);
    let output = config.paths.stations_output.clone();

    TransitProcessor::new(config).unwrap().process().unwrap();
    let written = fs::read_to_string(output).unwrap();

    let geometry = r#"{"type":"Point","coordinates":[-0.1415,51.5152]}"#;
    assert!(STATIONS_JSON.contains(geometry));
    assert!(written.contains(geometry));
}

#[test]
fn test_repeat_runs_are_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_network(&temp_dir);
    let paths = config.paths.clone();
    let processor = TransitProcessor::new(config).unwrap();

    processor.process().unwrap();
    let first_stations = fs::read(&paths.stations_output).unwrap();
    let first_connections = fs::read(&paths.connections_output).unwrap();

    processor.process().unwrap();
    assert_eq!(fs::read(&paths.stations_output).unwrap(), first_stations);
    assert_eq!(fs::read(&paths.connections_output).unwrap(), first_connections);
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_network(&temp_dir).with_dry_run();
    let paths = config.paths.clone();

    let stats = TransitProcessor::new(config).unwrap().process().unwrap();

    assert!(stats.dry_run);
    assert!(stats.outputs.is_empty());
    assert_eq!(stats.stations.records_emitted, 2);
    assert!(!paths.stations_output.exists());
    assert!(!paths.connections_output.exists());
}
