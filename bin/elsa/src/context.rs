use influx::Writer;
use log::info;
use switchbot::Device;

use crate::{Config, Error, Result};

const AMEDAS_INTERVAL: u32 = 10;

pub struct Station {
    pub client: amedas::Client,
    pub name: String,
}

pub struct Context {
    pub switchbot: switchbot::Client,
    pub devices: Vec<Device>,
    pub station: Option<Station>,
    pub writer: Writer,
}

impl Context {
    pub async fn connect(config: &Config) -> Result<Context> {
        let switchbot = switchbot::Client::new(&config.switchbot_token)?;

        let devices = switchbot.get_devices().await?;
        if devices.is_empty() {
            return Err(Error::NoDevices);
        }

        info!("found devices:");
        for device in &devices {
            info!("- {} (ID: {})", device.device_name, device.device_id);
        }

        let station = match &config.amedas_station {
            Some(station_id) => Some(Self::resolve_station(station_id).await?),
            None => None,
        };

        let writer = Writer::new(&config.influx_url, &config.influx_db)
            .with_credentials(
                config.influx_username.clone(),
                config.influx_password.clone(),
            )
            .with_timeout(config.influx_timeout);

        Ok(Context {
            switchbot,
            devices,
            station,
            writer,
        })
    }

    async fn resolve_station(station_id: &str) -> Result<Station> {
        let client = amedas::Client::new(station_id, AMEDAS_INTERVAL)?;
        let name = client.station_name().await?;

        info!("AMeDAS station: {station_id} ({name})");

        Ok(Station { client, name })
    }
}
