mod client;
mod error;
mod observation;
mod point;

pub use client::{Client, BASE_URL, INTERVALS};
pub use error::Error;
pub use observation::Observation;
pub use point::ObservationPoint;

pub const TIME_ZONE: chrono_tz::Tz = chrono_tz::Asia::Tokyo;

pub type Result<T> = std::result::Result<T, Error>;
