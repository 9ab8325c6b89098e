use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    Json(serde_json::Error),
    InvalidInterval(u32),
    InvalidRange(NaiveDate, NaiveDate),
    RangeTooOld(NaiveDate, NaiveDate),
    UnalignedTime(NaiveDateTime),
    NotFound(NaiveDateTime),
    UnexpectedStatus(u16, String),
    UnknownStation(String),
}

impl Error {
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "http error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::InvalidInterval(interval) => write!(
                f,
                "invalid interval {interval}, expected one of 10, 20, 30 or 60 minutes"
            ),
            Self::InvalidRange(start, end) => {
                write!(f, "start date {start} is after end date {end}")
            }
            Self::RangeTooOld(start, earliest) => write!(
                f,
                "start date {start} is too old, data is kept since {earliest}"
            ),
            Self::UnalignedTime(time) => {
                write!(f, "time {time} is not aligned to 10 minutes")
            }
            Self::NotFound(time) => write!(f, "no data published for {time}"),
            Self::UnexpectedStatus(status, body) => {
                write!(f, "unexpected http status {status}: {body}")
            }
            Self::UnknownStation(id) => write!(f, "unknown station {id}"),
        }
    }
}

impl std::error::Error for Error {}
