use pixelgate_api::{server, setup_routes, telemetry, AppState};
use pixelgate_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Loads .env first so RUST_LOG and LOG_FORMAT from it apply
    let config = Config::from_env()?;
    telemetry::init_telemetry();

    let state = AppState::from_config(config.clone()).await?;
    let router = setup_routes(state);

    server::start_server(&config, router).await?;

    Ok(())
}
