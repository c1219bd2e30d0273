//! Application constants for the transit GeoJSON processor
//!
//! Default file locations, output schema names and the built-in line
//! catalog used when no configuration file overrides it.

// =============================================================================
// Default Paths
// =============================================================================

/// Raw station point features
pub const DEFAULT_STATIONS_INPUT: &str = "data/tfl_stations.json";

/// Raw track segment line features
pub const DEFAULT_LINES_INPUT: &str = "data/tfl_lines.json";

/// Normalized station output
pub const DEFAULT_STATIONS_OUTPUT: &str = "data/tfl_stations_new2.json";

/// Normalized per-line connection output
pub const DEFAULT_CONNECTIONS_OUTPUT: &str = "data/tfl_lines_new2.json";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "transit-geojson";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Output Schema
// =============================================================================

/// Coordinate reference system declared on the stations collection
pub const STATIONS_CRS: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// Separator between canonical names in a station's `Lines` attribute
pub const LINES_SEPARATOR: &str = ", ";

/// Dataset labels used in logs and errors
pub mod datasets {
    pub const STATIONS: &str = "stations";
    pub const LINES: &str = "lines";
}

// =============================================================================
// Built-in Line Catalog
// =============================================================================

/// Suffix appended to the canonical name of Underground lines
pub const LINE_SUFFIX: &str = " Line";

/// Lines rendered as `<name> Line`, in catalog order
pub const SUFFIX_LINES: &[&str] = &[
    "District",
    "Piccadilly",
    "Northern",
    "Hammersmith & City",
    "Circle",
    "Metropolitan",
    "Central",
    "Jubilee",
    "Bakerloo",
    "Waterloo & City",
    "Victoria",
];

/// Lines with a bespoke canonical name, as (raw, canonical)
pub const BESPOKE_LINES: &[(&str, &str)] = &[
    ("DLR", "Docklands Light Railway"),
    ("London Overground", "Overground"),
    ("Crossrail", "Crossrail"),
    ("Crossrail 2", "Crossrail 2"),
];
