use std::net::SocketAddr;
use std::path::PathBuf;

use allocation_engine::api::{AppState, create_router};
use allocation_engine::config::ConfigLoader;
use allocation_engine::telemetry;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "allocation-engine",
    about = "Serve the shift allocation engine over HTTP",
    version
)]
struct Cli {
    /// Directory holding facility.yaml, roles.yaml, shifts.yaml and planning.yaml
    #[arg(long, default_value = "./config/srs7")]
    config_dir: PathBuf,
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;

    let loader = ConfigLoader::load(&cli.config_dir)?;
    info!(
        facility = %loader.facility().code,
        roles = loader.catalog().roles().len(),
        shifts = loader.config().shifts().len(),
        config_dir = %cli.config_dir.display(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(address = %cli.bind, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
