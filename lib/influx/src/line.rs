use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    measurement: String,
    tags: Vec<(String, String)>,
    fields: Vec<(String, f64)>,
    timestamp: Option<i64>,
}

impl Line {
    pub fn new(measurement: impl Into<String>) -> Line {
        Line {
            measurement: measurement.into(),
            tags: vec![],
            fields: vec![],
            timestamp: None,
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Line {
        self.tags.push((key.into(), value.into()));
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: f64) -> Line {
        self.fields.push((key.into(), value));
        self
    }

    pub fn timestamp(mut self, nanos: i64) -> Line {
        self.timestamp = Some(nanos);
        self
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape_measurement(&self.measurement))?;

        for (key, value) in &self.tags {
            write!(f, ",{}={}", escape_tag(key), escape_tag(value))?;
        }

        for (index, (key, value)) in self.fields.iter().enumerate() {
            let separator = if index == 0 { ' ' } else { ',' };
            write!(f, "{separator}{}={value:?}", escape_tag(key))?;
        }

        if let Some(timestamp) = self.timestamp {
            write!(f, " {timestamp}")?;
        }

        Ok(())
    }
}

pub fn escape_measurement(value: &str) -> String {
    escape(value, &['\\', ' ', ','])
}

pub fn escape_tag(value: &str) -> String {
    escape(value, &['\\', ' ', ',', '='])
}

fn escape(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

pub fn to_nanos<Tz: TimeZone>(time: &DateTime<Tz>) -> Result<i64, Error> {
    time.timestamp_nanos_opt()
        .ok_or_else(|| Error::TimestampOutOfRange(time.naive_utc()))
}

pub fn naive_to_nanos(time: NaiveDateTime) -> Result<i64, Error> {
    to_nanos(&time.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_escape_tag() {
        assert_eq!(escape_tag("a b,c=d"), r"a\ b\,c\=d");
        assert_eq!(escape_tag(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn test_escape_measurement() {
        assert_eq!(escape_measurement("living room,1=2"), r"living\ room\,1=2");
    }

    #[test]
    fn test_line() {
        let line = Line::new("sensor")
            .tag("sensor_id", "Hall way")
            .field("temp_c", 21.5)
            .field("humidity", 60.0)
            .timestamp(1_700_000_000_000_000_000);

        assert_eq!(
            line.to_string(),
            r"sensor,sensor_id=Hall\ way temp_c=21.5,humidity=60.0 1700000000000000000"
        );
    }

    #[test]
    fn test_line_without_timestamp() {
        let line = Line::new("amedas").field("temp_c", -3.25);
        assert_eq!(line.to_string(), "amedas temp_c=-3.25");
    }

    #[test]
    fn test_to_nanos() {
        let time = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(to_nanos(&time).unwrap(), 1_704_164_645_000_000_000);

        let jst = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let local = time.with_timezone(&jst);
        assert_eq!(to_nanos(&local).unwrap(), 1_704_164_645_000_000_000);
    }

    #[test]
    fn test_naive_is_utc() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 250)
            .unwrap();
        assert_eq!(naive_to_nanos(naive).unwrap(), 1_704_164_645_250_000_000);
    }

    #[test]
    fn test_out_of_range() {
        let naive = NaiveDate::from_ymd_opt(2300, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(
            naive_to_nanos(naive),
            Err(Error::TimestampOutOfRange(_))
        ));
    }
}
