//! `GeoJSON` export of a ramp's transitions for visual inspection

use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use itertools::Itertools;
use serde_json::json;

use crate::{Error, Key, Ramp, Transition};

impl Ramp {
    /// One `LineString` feature per transition, drawn from back to front point.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .transitions()
            .sorted_unstable_by_key(|(key, _)| **key)
            .map(|(key, transition)| self.transition_feature(key, transition))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    fn transition_feature(&self, key: &Key, transition: &Transition) -> Result<Feature, Error> {
        let line = LineString::from(vec![transition.back_point, transition.front_point]);
        let geometry = Geometry::new(GeoJsonValue::from(&line));

        let reachable_exits = transition.enter_index().map(|enter| {
            (0..self.exits().len())
                .filter(|&exit| self.weight(enter as usize, exit).is_some())
                .count()
        });

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "feature_id": key.feature_id,
                "segment_index": key.segment_index,
                "one_way": transition.is_one_way(),
                "forward_is_enter": transition.forward_is_enter,
                "enter_index": transition.enter_index(),
                "exit_index": transition.exit_index(),
                "cross_id": transition.cross_id,
                "reachable_exits": reachable_exits,
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}
