//! Per-line connection fan-out
//!
//! A track segment shared by several lines becomes one connection record
//! per recognized line, so that filtering connections by `Line` never has
//! to look inside a multi-line field. All records from one segment share
//! its geometry payload.

use super::FeatureTransformer;
use crate::constants::datasets;
use crate::models::{FeatureTag, NormalizedConnection, RawLineFeature};
use crate::normalize::LineNameNormalizer;
use tracing::debug;

pub struct LineConnectionTransformer<'a> {
    normalizer: &'a LineNameNormalizer,
}

impl<'a> LineConnectionTransformer<'a> {
    pub fn new(normalizer: &'a LineNameNormalizer) -> Self {
        Self { normalizer }
    }

    /// One connection per recognized membership of `raw`, in membership
    /// order. Endpoint ids stay `None` when the membership omits them and
    /// are otherwise copied verbatim.
    pub fn fan_out(&self, raw: RawLineFeature) -> Vec<NormalizedConnection> {
        let geometry = raw.geometry;

        let connections: Vec<NormalizedConnection> = raw
            .properties
            .lines
            .into_iter()
            .filter_map(|membership| {
                let name = membership.name.as_text()?;
                let line = self.normalizer.normalize(&name)?;
                Some(NormalizedConnection {
                    tag: FeatureTag::Feature,
                    geometry: geometry.clone(),
                    line: line.to_string(),
                    start_sid: membership.start_sid,
                    end_sid: membership.end_sid,
                })
            })
            .collect();

        if connections.is_empty() {
            debug!("Dropping segment with no known lines");
        }
        connections
    }
}

impl FeatureTransformer for LineConnectionTransformer<'_> {
    type Raw = RawLineFeature;
    type Record = NormalizedConnection;

    fn dataset(&self) -> &'static str {
        datasets::LINES
    }

    fn transform_feature(&self, raw: Self::Raw, out: &mut Vec<Self::Record>) -> usize {
        let connections = self.fan_out(raw);
        let emitted = connections.len();
        out.extend(connections);
        emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MalformedPolicy;
    use crate::error::TransitError;
    use crate::geojson::RawCollection;
    use crate::models::{Attribute, Geometry, LineMembership, SegmentProperties};

    const SEGMENT: &str = r#"{"type":"LineString","coordinates":[[-0.1,51.5],[-0.2,51.6]]}"#;

    fn segment(lines: Vec<LineMembership>) -> RawLineFeature {
        RawLineFeature {
            geometry: Geometry::from_json(SEGMENT).unwrap(),
            properties: SegmentProperties { lines },
        }
    }

    #[test]
    fn test_shared_track_fans_out_per_line() {
        let normalizer = LineNameNormalizer::default();
        let transformer = LineConnectionTransformer::new(&normalizer);

        let connections = transformer.fan_out(segment(vec![
            LineMembership::between("Central", "A", "B"),
            LineMembership::named("Jubilee"),
        ]));

        assert_eq!(connections.len(), 2);

        assert_eq!(connections[0].line, "Central Line");
        assert_eq!(connections[0].start_sid.as_ref().map(Attribute::as_json), Some(r#""A""#));
        assert_eq!(connections[0].end_sid.as_ref().map(Attribute::as_json), Some(r#""B""#));

        assert_eq!(connections[1].line, "Jubilee Line");
        assert_eq!(connections[1].start_sid, None);
        assert_eq!(connections[1].end_sid, None);

        assert!(connections[0].geometry.shares_payload(&connections[1].geometry));
        assert_eq!(connections[0].geometry.as_json(), SEGMENT);
    }

    #[test]
    fn test_unknown_memberships_are_not_emitted() {
        let normalizer = LineNameNormalizer::default();
        let transformer = LineConnectionTransformer::new(&normalizer);

        let connections = transformer.fan_out(segment(vec![
            LineMembership::between("Tramlink", "T1", "T2"),
            LineMembership::between("DLR", "D1", "D2"),
            LineMembership::named("central"),
        ]));

        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].line, "Docklands Light Railway");
        assert_eq!(connections[0].start_sid.as_ref().map(Attribute::as_json), Some(r#""D1""#));
    }

    #[test]
    fn test_segment_without_known_lines_contributes_nothing() {
        let normalizer = LineNameNormalizer::default();
        let transformer = LineConnectionTransformer::new(&normalizer);

        let records = transformer.transform(vec![
            segment(vec![LineMembership::named("Emirates Air Line")]),
            segment(Vec::new()),
            segment(vec![LineMembership::named("London Overground")]),
        ]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, "Overground");
    }

    #[test]
    fn test_only_one_endpoint_present() {
        let normalizer = LineNameNormalizer::default();
        let transformer = LineConnectionTransformer::new(&normalizer);
        let collection = RawCollection::from_json(
            "lines.json",
            r#"{"features":[{"geometry":null,"properties":{"lines":[
                {"name":"Circle","start_sid":"S"},
                {"name":"District","end_sid":"E","otend_sid":"X"}
            ]}}]}"#,
        )
        .unwrap();

        let outcome = transformer
            .transform_collection(&collection, MalformedPolicy::Abort)
            .unwrap();

        let records = outcome.records;
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].start_sid.as_ref().and_then(Attribute::as_text).as_deref(),
            Some("S")
        );
        assert_eq!(records[0].end_sid, None);
        assert_eq!(records[1].start_sid, None);
        assert_eq!(
            records[1].end_sid.as_ref().and_then(Attribute::as_text).as_deref(),
            Some("E")
        );
        assert_eq!(outcome.stats.features_dropped, 0);
    }

    #[test]
    fn test_membership_without_name_is_malformed() {
        let normalizer = LineNameNormalizer::default();
        let transformer = LineConnectionTransformer::new(&normalizer);
        let collection = RawCollection::from_json(
            "lines.json",
            r#"{"features":[
                {"geometry":null,"properties":{"lines":[{"name":"Circle"}]}},
                {"geometry":null,"properties":{"lines":[{"start_sid":"S"}]}},
                {"geometry":null,"properties":{}}
            ]}"#,
        )
        .unwrap();

        let err = transformer
            .transform_collection(&collection, MalformedPolicy::Abort)
            .unwrap_err();
        assert!(matches!(
            err,
            TransitError::MalformedInput { index: 1, .. }
        ));

        let outcome = transformer
            .transform_collection(&collection, MalformedPolicy::Skip)
            .unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.stats.malformed_skipped, 2);
        assert_eq!(outcome.stats.features_read, 3);
    }

    #[test]
    fn test_numeric_sids_and_null_names() {
        let normalizer = LineNameNormalizer::default();
        let transformer = LineConnectionTransformer::new(&normalizer);
        let collection = RawCollection::from_json(
            "lines.json",
            r#"{"features":[{"geometry":[[0,0],[1,1]],"properties":{"lines":[
                {"name":null,"start_sid":1,"end_sid":2},
                {"name":"Central","start_sid":101,"end_sid":null}
            ]}}]}"#,
        )
        .unwrap();

        let outcome = transformer
            .transform_collection(&collection, MalformedPolicy::Abort)
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
        let connection = &outcome.records[0];
        assert_eq!(connection.line, "Central Line");
        assert_eq!(
            serde_json::to_string(connection).unwrap(),
            r#"{"type":"Feature","geometry":[[0,0],[1,1]],"Line":"Central Line","start_sid":101,"end_sid":null}"#
        );
    }
}
