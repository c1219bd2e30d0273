//! Feature transformers for the two batch passes
//!
//! Each pass decodes raw features from a [`RawCollection`], normalizes
//! their line memberships and produces zero or more output records per
//! feature. The decoding and malformed-feature policy are shared here;
//! the per-feature rules live in [`stations`] and [`connections`].

pub mod connections;
pub mod stations;

pub use connections::LineConnectionTransformer;
pub use stations::StationTransformer;

use crate::config::MalformedPolicy;
use crate::error::{Result, TransitError};
use crate::geojson::RawCollection;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Counters for one pass over an input collection
#[derive(Debug, Clone, Default)]
pub struct PassStats {
    /// Features present in the input
    pub features_read: usize,
    /// Output records produced
    pub records_emitted: usize,
    /// Well-formed features that produced no record (no recognized line)
    pub features_dropped: usize,
    /// Malformed features skipped under [`MalformedPolicy::Skip`]
    pub malformed_skipped: usize,
    pub elapsed: Duration,
}

/// Records and counters produced by one pass
#[derive(Debug, Clone)]
pub struct PassOutcome<R> {
    pub records: Vec<R>,
    pub stats: PassStats,
}

/// One normalization pass: raw feature in, zero or more records out
pub trait FeatureTransformer {
    /// Typed shape each raw feature must decode into
    type Raw: DeserializeOwned;
    /// Normalized output record
    type Record;

    /// Dataset label for logs and errors
    fn dataset(&self) -> &'static str;

    /// Append the records derived from `raw` to `out`, returning how many
    /// were added
    fn transform_feature(&self, raw: Self::Raw, out: &mut Vec<Self::Record>) -> usize;

    /// Transform already-decoded features, preserving input order
    fn transform<I>(&self, raws: I) -> Vec<Self::Record>
    where
        I: IntoIterator<Item = Self::Raw>,
    {
        let mut records = Vec::new();
        for raw in raws {
            self.transform_feature(raw, &mut records);
        }
        records
    }

    /// Decode and transform every feature of `collection`.
    ///
    /// Under [`MalformedPolicy::Abort`] the first feature that fails to
    /// decode ends the pass with [`TransitError::MalformedInput`].
    fn transform_collection(
        &self,
        collection: &RawCollection,
        policy: MalformedPolicy,
    ) -> Result<PassOutcome<Self::Record>> {
        let start_time = Instant::now();
        let mut records = Vec::with_capacity(collection.len());
        let mut stats = PassStats {
            features_read: collection.len(),
            ..Default::default()
        };

        for (index, decoded) in collection.decode::<Self::Raw>() {
            let raw = match decoded {
                Ok(raw) => raw,
                Err(e) => match policy {
                    MalformedPolicy::Abort => {
                        return Err(TransitError::malformed(self.dataset(), index, e.to_string()));
                    }
                    MalformedPolicy::Skip => {
                        warn!(
                            "Skipping malformed {} feature {}: {}",
                            self.dataset(),
                            index,
                            e
                        );
                        stats.malformed_skipped += 1;
                        continue;
                    }
                },
            };

            let emitted = self.transform_feature(raw, &mut records);
            if emitted == 0 {
                stats.features_dropped += 1;
            }
        }

        stats.records_emitted = records.len();
        stats.elapsed = start_time.elapsed();

        info!(
            "{} pass over {}: {} features -> {} records ({} without known lines, {} malformed skipped)",
            self.dataset(),
            collection.path().display(),
            stats.features_read,
            stats.records_emitted,
            stats.features_dropped,
            stats.malformed_skipped
        );

        Ok(PassOutcome { records, stats })
    }
}
