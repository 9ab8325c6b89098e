#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    Json(serde_json::Error),
    UnexpectedStatus(u16, String),
    Vendor { status_code: i64, message: String },
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

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "HTTP error: {err}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
            Self::UnexpectedStatus(status, body) => {
                write!(f, "Unexpected HTTP status {status}: {body}")
            }
            Self::Vendor {
                status_code,
                message,
            } => write!(f, "SwitchBot error {status_code}: {message}"),
        }
    }
}

impl std::error::Error for Error {}
