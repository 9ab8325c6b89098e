use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

// readings come as `[value, quality flag]`
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub time: NaiveDateTime,
    pub fields: BTreeMap<String, Value>,
}

impl Observation {
    pub(crate) fn from_station(time: NaiveDateTime, station: Map<String, Value>) -> Observation {
        let fields = station
            .into_iter()
            .map(|(key, value)| match value {
                Value::Array(values) => (key, values.into_iter().next().unwrap_or(Value::Null)),
                value => (key, value),
            })
            .collect();

        Observation { time, fields }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.fields.get(name)?.as_f64()
    }

    pub fn temp(&self) -> Option<f64> {
        self.get_f64("temp")
    }

    pub fn humidity(&self) -> Option<f64> {
        self.get_f64("humidity")
    }
}
