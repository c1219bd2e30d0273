//! GeoJSON feature collection reading and writing.
//!
//! Input features are kept as raw JSON text until a pass decodes them, so
//! a shape error can be reported against the feature's index and geometry
//! is never re-encoded. Output is written to a temporary file next to the
//! destination and renamed into place once fully serialized.

use crate::error::{Result, TransitError};
use crate::models::FeatureCollection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Deserialize)]
struct CollectionDocument {
    features: Vec<Box<RawValue>>,
}

/// A loaded input collection whose features are still undecoded
#[derive(Debug)]
pub struct RawCollection {
    path: PathBuf,
    features: Vec<Box<RawValue>>,
}

impl RawCollection {
    /// Parse a feature collection document held in memory
    pub fn from_json(path: impl Into<PathBuf>, contents: &str) -> Result<Self> {
        let path = path.into();
        let document: CollectionDocument =
            serde_json::from_str(contents).map_err(|e| TransitError::InvalidCollection {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            path,
            features: document.features,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Raw JSON text of each feature, in input order
    pub fn raw_features(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|feature| feature.get())
    }

    /// Decode every feature into `T`, yielding each result with its index
    pub fn decode<T: DeserializeOwned>(
        &self,
    ) -> impl Iterator<Item = (usize, serde_json::Result<T>)> + '_ {
        self.raw_features()
            .enumerate()
            .map(|(index, raw)| (index, serde_json::from_str(raw)))
    }
}

/// Read a feature collection from disk
pub fn read_feature_collection(path: &Path) -> Result<RawCollection> {
    let contents = fs::read_to_string(path).map_err(|source| TransitError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let collection = RawCollection::from_json(path, &contents)?;

    debug!(
        "Read {} features from {} ({} bytes)",
        collection.len(),
        path.display(),
        contents.len()
    );
    if let Some(sample) = collection.raw_features().next() {
        debug!("Sample feature from {}: {}", path.display(), sample);
    }

    Ok(collection)
}

/// Serialize a collection to `path`, replacing any existing file only once
/// the new content is completely written. Returns the number of bytes
/// written.
pub fn write_feature_collection<F: Serialize>(
    path: &Path,
    collection: &FeatureCollection<F>,
    pretty: bool,
) -> Result<u64> {
    let write_failure = |source: std::io::Error| TransitError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(write_failure)?;

    let temp = NamedTempFile::new_in(dir).map_err(write_failure)?;
    let mut writer = BufWriter::new(temp);

    let encoded = if pretty {
        serde_json::to_writer_pretty(&mut writer, collection)
    } else {
        serde_json::to_writer(&mut writer, collection)
    };
    encoded.map_err(|e| {
        if e.is_io() {
            write_failure(e.into())
        } else {
            TransitError::Serialization(e)
        }
    })?;
    writer.flush().map_err(write_failure)?;

    let temp = writer
        .into_inner()
        .map_err(|e| write_failure(e.into_error()))?;
    let file = temp.persist(path).map_err(|e| write_failure(e.error))?;
    let bytes = file.metadata().map_err(write_failure)?.len();

    debug!(
        "Wrote {} features ({} bytes) to {}",
        collection.len(),
        bytes,
        path.display()
    );
    Ok(bytes)
}
