use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    pub device_name: String,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub hub_device_id: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct DeviceStatus {
    pub temperature: f64,
    pub humidity: f64,
    #[serde(default)]
    pub battery: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope {
    pub status_code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub body: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeviceList {
    pub device_list: Vec<Device>,
}
