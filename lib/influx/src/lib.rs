mod error;
mod line;
mod writer;

pub use error::Error;
pub use line::{escape_measurement, escape_tag, naive_to_nanos, to_nanos, Line};
pub use writer::{Session, Writer};

pub type Result<T> = std::result::Result<T, Error>;
