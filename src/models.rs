//! Core data structures for transit network processing.
//!
//! Raw feature shapes as they arrive in the source GeoJSON, the
//! normalized records produced by the two passes, and the output
//! collection wrapper.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::sync::Arc;

use crate::constants::STATIONS_CRS;

/// Opaque geometry payload, kept as the exact JSON text of the input.
///
/// Cloning shares the payload, so every connection fanned out of one raw
/// segment points at the same geometry.
#[derive(Debug, Clone)]
pub struct Geometry(Arc<RawValue>);

impl Geometry {
    /// Wrap JSON text; fails if `json` is not a single valid JSON value
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        RawValue::from_string(json.to_string()).map(|raw| Self(Arc::from(raw)))
    }

    /// The JSON text exactly as it appeared in the input
    pub fn as_json(&self) -> &str {
        self.0.get()
    }

    /// True when both handles refer to the same payload
    pub fn shares_payload(&self, other: &Geometry) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        self.as_json() == other.as_json()
    }
}

impl Eq for Geometry {}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Box::<RawValue>::deserialize(deserializer).map(|raw| Self(Arc::from(raw)))
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Opaque attribute value copied verbatim from input to output.
///
/// Station names, ids, zones and endpoint sids are not validated beyond
/// being present; whatever JSON the source holds is written back out.
#[derive(Debug, Clone)]
pub struct Attribute(Box<RawValue>);

impl Attribute {
    /// Wrap JSON text; fails if `json` is not a single valid JSON value
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        RawValue::from_string(json.to_string()).map(Self)
    }

    /// Encode `text` as a JSON string attribute
    pub fn text(text: &str) -> serde_json::Result<Self> {
        serde_json::value::to_raw_value(text).map(Self)
    }

    /// The JSON text exactly as it appeared in the input
    pub fn as_json(&self) -> &str {
        self.0.get()
    }

    /// The decoded string, or `None` when the value is not a JSON string
    pub fn as_text(&self) -> Option<String> {
        serde_json::from_str(self.0.get()).ok()
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.as_json() == other.as_json()
    }
}

impl Eq for Attribute {}

impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Box::<RawValue>::deserialize(deserializer).map(Self)
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// One entry of a feature's `lines` array.
///
/// `name` must be present, but a non-string name simply matches no known
/// line. An explicit `null` sid reads the same as an omitted one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineMembership {
    pub name: Attribute,
    #[serde(default)]
    pub start_sid: Option<Attribute>,
    #[serde(default)]
    pub end_sid: Option<Attribute>,
}

#[cfg(test)]
impl LineMembership {
    pub(crate) fn named(name: &str) -> Self {
        Self {
            name: Attribute::text(name).unwrap(),
            start_sid: None,
            end_sid: None,
        }
    }

    pub(crate) fn between(name: &str, start_sid: &str, end_sid: &str) -> Self {
        Self {
            name: Attribute::text(name).unwrap(),
            start_sid: Some(Attribute::text(start_sid).unwrap()),
            end_sid: Some(Attribute::text(end_sid).unwrap()),
        }
    }
}

/// A raw GeoJSON feature with typed properties
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeature<P> {
    pub geometry: Geometry,
    pub properties: P,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationProperties {
    pub name: Attribute,
    pub id: Attribute,
    pub zone: Attribute,
    pub lines: Vec<LineMembership>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentProperties {
    pub lines: Vec<LineMembership>,
}

/// Station point feature from the raw stations dataset
pub type RawStationFeature = RawFeature<StationProperties>;

/// Track segment feature from the raw lines dataset
pub type RawLineFeature = RawFeature<SegmentProperties>;

/// GeoJSON `"type": "Feature"` tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

/// GeoJSON `"type": "FeatureCollection"` tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// Station summary record.
///
/// Attributes sit directly on the feature object rather than under
/// `properties`; downstream consumers read them from there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedStation {
    #[serde(rename = "type")]
    pub tag: FeatureTag,
    #[serde(rename = "Name")]
    pub name: Attribute,
    pub geometry: Geometry,
    #[serde(rename = "Station ID")]
    pub station_id: Attribute,
    #[serde(rename = "Zone")]
    pub zone: Attribute,
    #[serde(rename = "Lines")]
    pub lines: String,
    #[serde(rename = "Number of Lines")]
    pub line_count: usize,
}

/// One line's use of a track segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedConnection {
    #[serde(rename = "type")]
    pub tag: FeatureTag,
    pub geometry: Geometry,
    #[serde(rename = "Line")]
    pub line: String,
    pub start_sid: Option<Attribute>,
    pub end_sid: Option<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrsProperties {
    pub name: String,
}

/// Named coordinate reference system block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crs {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: CrsProperties,
}

impl Crs {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: "name".to_string(),
            properties: CrsProperties { name: name.into() },
        }
    }

    /// WGS84 longitude/latitude, declared on the stations output
    pub fn crs84() -> Self {
        Self::named(STATIONS_CRS)
    }
}

/// Output feature collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureCollection<F> {
    #[serde(rename = "type")]
    pub tag: CollectionTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<Crs>,
    pub features: Vec<F>,
}

impl<F> FeatureCollection<F> {
    pub fn new(features: Vec<F>) -> Self {
        Self {
            tag: CollectionTag::FeatureCollection,
            crs: None,
            features,
        }
    }

    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
