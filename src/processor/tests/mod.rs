//! Tests for the processor module
//!
//! Runs complete passes over small transit datasets written to a temporary
//! directory.

pub mod basic_processing;

use crate::config::{Config, PathsConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub(crate) const STATIONS_JSON: &str = r#"{"type":"FeatureCollection","features":[
{"type":"Feature","geometry":{"type":"Point","coordinates":[-0.1415,51.5152]},"properties":{"id":"940GZZLUOXC","name":"Oxford Circus","zone":"1","lines":[{"name":"Central"},{"name":"Bogus"},{"name":"Victoria"},{"name":"Bakerloo"}]}},
{"type":"Feature","geometry":{"type":"Point","coordinates":[-0.0754,51.3761]},"properties":{"id":"910GWCROYDN","name":"Wandle Park","zone":"4","lines":[{"name":"Tramlink"}]}},
{"type":"Feature","geometry":{"type":"Point","coordinates":[-0.0037,51.5416]},"properties":{"id":"940GZZDLSTD","name":"Stratford","zone":"2/3","lines":[{"name":"DLR"},{"name":"London Overground"},{"name":"Crossrail"}]}}
]}"#;

pub(crate) const LINES_JSON: &str = r#"{"type":"FeatureCollection","features":[
{"type":"Feature","geometry":{"type":"LineString","coordinates":[[-0.1415,51.5152],[-0.1337,51.5154]]},"properties":{"lines":[{"name":"Central","start_sid":"940GZZLUOXC","end_sid":"940GZZLUTCR"},{"name":"Jubilee"}]}},
{"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]},"properties":{"lines":[{"name":"Tramlink","start_sid":"T1","end_sid":"T2"}]}}
]}"#;

/// Write the sample datasets into `dir` and return a config pointing at them
pub(crate) fn create_test_network(dir: &TempDir) -> Config {
    let root = dir.path();
    fs::write(root.join("stations.json"), STATIONS_JSON).unwrap();
    fs::write(root.join("lines.json"), LINES_JSON).unwrap();
    config_for(root)
}

pub(crate) fn config_for(root: &Path) -> Config {
    Config::default().with_paths(PathsConfig {
        stations_input: root.join("stations.json"),
        lines_input: root.join("lines.json"),
        stations_output: root.join("out").join("stations.json"),
        connections_output: root.join("out").join("connections.json"),
    })
}
