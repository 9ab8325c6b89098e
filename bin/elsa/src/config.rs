use std::time::Duration;

use crate::{Error, Result};

const DEFAULT_INFLUX_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub switchbot_token: String,
    pub influx_url: String,
    pub influx_db: String,
    pub influx_username: Option<String>,
    pub influx_password: Option<String>,
    pub influx_timeout: Duration,
    pub amedas_station: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let optional = |name: &'static str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &'static str| optional(name).ok_or(Error::MissingVariable(name));

        let influx_timeout = match optional("INFLUXDB_TIMEOUT_SECS") {
            Some(value) => value
                .parse()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .filter(|timeout| !timeout.is_zero())
                .ok_or(Error::InvalidVariable("INFLUXDB_TIMEOUT_SECS", value))?,
            None => DEFAULT_INFLUX_TIMEOUT,
        };

        Ok(Config {
            switchbot_token: required("SWITCHBOT_TOKEN")?,
            influx_url: required("INFLUXDB_URL")?,
            influx_db: required("INFLUXDB_DB")?,
            influx_username: optional("INFLUXDB_ADMIN_USER"),
            influx_password: optional("INFLUXDB_ADMIN_PASSWORD"),
            influx_timeout,
            amedas_station: optional("AMEDAS_LOCATION_ID"),
        })
    }
}
