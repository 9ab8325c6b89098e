mod error;

pub use error::Error;

use std::time::Duration;

use log::{debug, trace};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::devices::{Device, DeviceList, DeviceStatus, Envelope};

pub const BASE_URL: &str = "https://api.switch-bot.com/v1.0";

const SUCCESS: i64 = 100;
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct Client {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        Self::with_base_url(BASE_URL, token)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(TIMEOUT).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http,
        })
    }

    pub async fn get_devices(&self) -> Result<Vec<Device>, Error> {
        let list: DeviceList = self.get("devices").await?;
        debug!("got {} devices", list.device_list.len());

        Ok(list.device_list)
    }

    pub async fn get_device_status(&self, device_id: &str) -> Result<DeviceStatus, Error> {
        self.get(&format!("devices/{device_id}/status")).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = format!("{}/{path}", self.base_url);
        trace!("GET {url}");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.token)
            .header(CONTENT_TYPE, "application/json; charset=utf8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus(status.as_u16(), body));
        }

        let envelope: Envelope = response.json().await?;
        trace!("response: {envelope:?}");

        if envelope.status_code != SUCCESS {
            return Err(Error::Vendor {
                status_code: envelope.status_code,
                message: envelope.message,
            });
        }

        Ok(serde_json::from_value(envelope.body)?)
    }
}
