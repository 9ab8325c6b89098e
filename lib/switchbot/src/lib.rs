mod client;
mod devices;

pub use client::{Client, Error, BASE_URL};
pub use devices::{Device, DeviceStatus};

pub type Result<T> = std::result::Result<T, Error>;
