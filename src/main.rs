use fare_service::config::Config;
use fare_service::error::Error;
use fare_service::server::start;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env().map_err(|err| {
        tracing::error!("invalid configuration: {}", err);
        err
    })?;

    start(config).await.map_err(|err| {
        tracing::error!("service stopped: {}", err);
        err
    })
}
