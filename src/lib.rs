//! Transit GeoJSON Library
//!
//! Turns two raw GeoJSON datasets describing a city transit network into
//! simplified datasets for mapping:
//! - station points annotated with the recognized lines serving them
//! - track segments fanned out into one connection record per line
//!
//! Line names are matched against an explicit catalog and rewritten to
//! their canonical display form; unrecognized lines are dropped. Geometry
//! is carried through untouched.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod geojson;
pub mod models;
pub mod normalize;
pub mod processor;
pub mod transform;

pub use config::{Config, MalformedPolicy};
pub use error::{Result, TransitError};
pub use models::{Geometry, NormalizedConnection, NormalizedStation};
pub use normalize::{LineCatalog, LineMapping, LineNameNormalizer};
pub use processor::{ProcessingStats, TransitProcessor};
pub use transform::{FeatureTransformer, LineConnectionTransformer, StationTransformer};
