use std::fmt;

use chrono::NaiveDateTime;

#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    Write {
        status: u16,
        body: String,
        line: String,
    },
    TimestampOutOfRange(NaiveDateTime),
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

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "http error: {err}"),
            Self::Write { status, body, line } => {
                write!(f, "write failed: {status} {body} (line={line})")
            }
            Self::TimestampOutOfRange(time) => {
                write!(f, "timestamp {time} can't be represented in nanoseconds")
            }
        }
    }
}

impl std::error::Error for Error {}
