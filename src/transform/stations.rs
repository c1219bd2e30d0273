//! Station normalization
//!
//! Collapses a station's line memberships into a single display string and
//! a count. Stations served by no recognized line are dropped.

use super::FeatureTransformer;
use crate::constants::{LINES_SEPARATOR, datasets};
use crate::models::{FeatureTag, NormalizedStation, RawStationFeature};
use crate::normalize::LineNameNormalizer;
use tracing::debug;

pub struct StationTransformer<'a> {
    normalizer: &'a LineNameNormalizer,
}

impl<'a> StationTransformer<'a> {
    pub fn new(normalizer: &'a LineNameNormalizer) -> Self {
        Self { normalizer }
    }

    /// Normalize one station, or `None` when none of its lines is known
    pub fn normalize_station(&self, raw: RawStationFeature) -> Option<NormalizedStation> {
        let properties = raw.properties;
        let lines: Vec<&str> = properties
            .lines
            .iter()
            .filter_map(|membership| membership.name.as_text())
            .filter_map(|name| self.normalizer.normalize(&name))
            .collect();

        if lines.is_empty() {
            debug!(
                "Dropping station {} ({}): no known lines",
                properties.name.as_json(),
                properties.id.as_json()
            );
            return None;
        }

        Some(NormalizedStation {
            tag: FeatureTag::Feature,
            line_count: lines.len(),
            lines: lines.join(LINES_SEPARATOR),
            geometry: raw.geometry,
            name: properties.name,
            station_id: properties.id,
            zone: properties.zone,
        })
    }
}

impl FeatureTransformer for StationTransformer<'_> {
    type Raw = RawStationFeature;
    type Record = NormalizedStation;

    fn dataset(&self) -> &'static str {
        datasets::STATIONS
    }

    fn transform_feature(&self, raw: Self::Raw, out: &mut Vec<Self::Record>) -> usize {
        match self.normalize_station(raw) {
            Some(station) => {
                out.push(station);
                1
            }
            None => 0,
        }
    }
}
