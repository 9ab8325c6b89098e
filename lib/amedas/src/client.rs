use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use log::{debug, trace};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{Error, Observation, ObservationPoint, Result, TIME_ZONE};

pub const BASE_URL: &str = "https://www.jma.go.jp/bosai/amedas";

pub const INTERVALS: [u32; 4] = [10, 20, 30, 60];

const RETENTION_DAYS: u64 = 10;

const PAUSE: Duration = Duration::from_millis(100);
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    station_id: String,
    interval: u32,
    http: reqwest::Client,
}

impl Client {
    pub fn new(station_id: impl Into<String>, interval: u32) -> Result<Client> {
        Self::with_base_url(BASE_URL, station_id, interval)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        station_id: impl Into<String>,
        interval: u32,
    ) -> Result<Client> {
        if !INTERVALS.contains(&interval) {
            return Err(Error::InvalidInterval(interval));
        }

        let http = reqwest::Client::builder().timeout(TIMEOUT).build()?;

        Ok(Client {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            station_id: station_id.into(),
            interval,
            http,
        })
    }

    pub async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Observation>> {
        let today = Utc::now().with_timezone(&TIME_ZONE).date_naive();
        validate_range(start, end, today)?;

        let mut observations = vec![];

        for (index, time) in instants(start, end, self.interval).into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(PAUSE).await;
            }
            observations.push(self.fetch_one(time).await?);
        }

        debug!(
            "fetched {} observations from {start} to {end}",
            observations.len()
        );

        Ok(observations)
    }

    // `time` is JST
    pub async fn fetch_one(&self, time: NaiveDateTime) -> Result<Observation> {
        if time.minute() % 10 != 0 || time.second() != 0 || time.nanosecond() != 0 {
            return Err(Error::UnalignedTime(time));
        }

        let url = format!(
            "{}/data/map/{}.json",
            self.base_url,
            time.format("%Y%m%d%H%M%S")
        );

        let stations = self.get::<HashMap<String, Map<String, Value>>>(&url).await;
        let mut stations = match stations {
            Err(Error::UnexpectedStatus(404, _)) => return Err(Error::NotFound(time)),
            result => result?,
        };

        let station = stations
            .remove(&self.station_id)
            .ok_or_else(|| Error::UnknownStation(self.station_id.clone()))?;

        Ok(Observation::from_station(time, station))
    }

    pub async fn get_observation_points(&self) -> Result<BTreeMap<String, ObservationPoint>> {
        let url = format!("{}/const/amedastable.json", self.base_url);
        self.get(&url).await
    }

    pub async fn station_name(&self) -> Result<String> {
        let mut points = self.get_observation_points().await?;

        points
            .remove(&self.station_id)
            .map(|point| point.kj_name)
            .ok_or_else(|| Error::UnknownStation(self.station_id.clone()))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        trace!("GET {url}");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn validate_range(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<()> {
    if start > end {
        return Err(Error::InvalidRange(start, end));
    }

    let earliest = today - Days::new(RETENTION_DAYS);
    if start < earliest {
        return Err(Error::RangeTooOld(start, earliest));
    }

    Ok(())
}

fn instants(start: NaiveDate, end: NaiveDate, interval: u32) -> impl Iterator<Item = NaiveDateTime> {
    start
        .iter_days()
        .take_while(move |day| *day <= end)
        .flat_map(move |day| {
            (0..24).flat_map(move |hour| {
                (0..60).step_by(interval as usize).filter_map(move |minute| {
                    NaiveTime::from_hms_opt(hour, minute, 0).map(|time| day.and_time(time))
                })
            })
        })
}
