use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use log::info;

use crate::{Context, Error, Result, Task};

pub const POLL_PERIOD: Duration = Duration::from_secs(10 * 60);

const SENSOR_MEASUREMENT: &str = "sensor";
const SENSOR_TAG: &str = "sensor_id";

const AMEDAS_MEASUREMENT: &str = "amedas";
const AMEDAS_TAG: &str = "location_id";

pub struct DeviceTask {
    context: Arc<Context>,
}

impl DeviceTask {
    pub fn new(context: Arc<Context>) -> DeviceTask {
        DeviceTask { context }
    }
}

#[async_trait]
impl Task for DeviceTask {
    fn name(&self) -> &str {
        "switchbot"
    }

    async fn run(&self) -> Result<()> {
        let context = &self.context;
        let session = context.writer.session()?;

        for device in &context.devices {
            let status = context
                .switchbot
                .get_device_status(&device.device_id)
                .await?;

            info!(
                "device {} ({}): temperature {}, humidity {}, battery {:?}",
                device.device_name,
                device.device_id,
                status.temperature,
                status.humidity,
                status.battery
            );

            session
                .write(
                    SENSOR_MEASUREMENT,
                    SENSOR_TAG,
                    &device.device_name,
                    status.temperature,
                    status.humidity,
                    None,
                )
                .await?;
        }

        Ok(())
    }
}

pub struct WeatherTask {
    context: Arc<Context>,
}

impl WeatherTask {
    pub fn new(context: Arc<Context>) -> WeatherTask {
        WeatherTask { context }
    }

    async fn run_at(&self, now: DateTime<Utc>) -> Result<()> {
        let Some(station) = &self.context.station else {
            return Ok(());
        };

        let target = weather_target(now)?;
        let local = target.with_timezone(&amedas::TIME_ZONE).naive_local();

        let observation = station.client.fetch_one(local).await?;
        let temp_c = observation.temp().ok_or(Error::MissingField("temp"))?;
        let humidity = observation
            .humidity()
            .ok_or(Error::MissingField("humidity"))?;

        info!("amedas {local}: temp_c {temp_c:.2}, humidity {humidity:.2}");

        self.context
            .writer
            .session()?
            .write(
                AMEDAS_MEASUREMENT,
                AMEDAS_TAG,
                &station.name,
                temp_c,
                humidity,
                Some(target),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Task for WeatherTask {
    fn name(&self) -> &str {
        "amedas"
    }

    async fn run(&self) -> Result<()> {
        self.run_at(Utc::now()).await
    }
}

// AMeDAS publishes with a delay
pub fn weather_target(now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let target = (now - TimeDelta::minutes(30)).duration_trunc(TimeDelta::minutes(10))?;
    Ok(target)
}
