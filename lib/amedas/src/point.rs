use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObservationPoint {
    pub kj_name: String,
    #[serde(default)]
    pub kn_name: Option<String>,
    #[serde(default)]
    pub en_name: Option<String>,
    #[serde(rename = "type", default)]
    pub station_type: Option<String>,
    #[serde(default)]
    pub elems: Option<String>,
    #[serde(default)]
    pub lat: Option<[f64; 2]>,
    #[serde(default)]
    pub lon: Option<[f64; 2]>,
    #[serde(default)]
    pub alt: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ObservationPoint {
    pub fn latitude(&self) -> Option<f64> {
        self.lat.map(to_degrees)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.lon.map(to_degrees)
    }
}

fn to_degrees([degrees, minutes]: [f64; 2]) -> f64 {
    degrees + minutes / 60.0
}
