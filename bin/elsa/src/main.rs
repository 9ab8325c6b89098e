use std::sync::Arc;

use elsa::{Config, Context, DeviceTask, Result, Scheduler, WeatherTask, POLL_PERIOD};

use log::{debug, info};
use tokio::signal::unix::{signal, SignalKind};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    pretty_env_logger::init_timed();

    info!("elsa version {VERSION}");

    match dotenv {
        Ok(path) => debug!("loaded {}", path.display()),
        Err(err) => debug!("no .env loaded: {err}"),
    }

    let config = Config::from_env()?;
    let context = Arc::new(Context::connect(&config).await?);

    let mut scheduler = Scheduler::new();
    scheduler.every(POLL_PERIOD, DeviceTask::new(context.clone()));

    if context.station.is_some() {
        scheduler.every(POLL_PERIOD, WeatherTask::new(context));
    }

    info!("polling {} tasks every {:?}", scheduler.len(), POLL_PERIOD);

    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = scheduler.run() => result,
        _ = sigterm.recv() => {
            info!("got SIGTERM, exiting...");
            Ok(())
        }
    }
}
