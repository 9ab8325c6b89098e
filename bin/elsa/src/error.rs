use std::fmt;

#[derive(Debug)]
pub enum Error {
    SwitchBot(switchbot::Error),
    Amedas(amedas::Error),
    Influx(influx::Error),
    Io(std::io::Error),
    Rounding(chrono::RoundingError),
    MissingVariable(&'static str),
    InvalidVariable(&'static str, String),
    MissingField(&'static str),
    NoDevices,
}

impl Error {
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::SwitchBot(err) => err.is_connectivity(),
            Self::Amedas(err) => err.is_connectivity(),
            Self::Influx(err) => err.is_connectivity(),
            _ => false,
        }
    }
}

impl From<switchbot::Error> for Error {
    fn from(err: switchbot::Error) -> Self {
        Self::SwitchBot(err)
    }
}

impl From<amedas::Error> for Error {
    fn from(err: amedas::Error) -> Self {
        Self::Amedas(err)
    }
}

impl From<influx::Error> for Error {
    fn from(err: influx::Error) -> Self {
        Self::Influx(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<chrono::RoundingError> for Error {
    fn from(err: chrono::RoundingError) -> Self {
        Self::Rounding(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchBot(err) => write!(f, "switchbot error: {err}"),
            Self::Amedas(err) => write!(f, "amedas error: {err}"),
            Self::Influx(err) => write!(f, "influx error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Rounding(err) => write!(f, "rounding error: {err}"),
            Self::MissingVariable(name) => write!(f, "set ENV variable {name}"),
            Self::InvalidVariable(name, value) => {
                write!(f, "invalid value {value:?} for ENV variable {name}")
            }
            Self::MissingField(field) => write!(f, "observation has no {field}"),
            Self::NoDevices => write!(f, "no devices found"),
        }
    }
}

impl std::error::Error for Error {}
