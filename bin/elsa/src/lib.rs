mod config;
mod context;
mod error;
mod scheduler;
mod tasks;

pub use config::Config;
pub use context::{Context, Station};
pub use error::Error;
pub use scheduler::{Outcome, Scheduler, Task};
pub use tasks::{weather_target, DeviceTask, WeatherTask, POLL_PERIOD};

pub type Result<T> = std::result::Result<T, Error>;
