use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use media_gateway::{config::Config, web::WebServer};

#[derive(Parser)]
#[command(name = "media-gateway")]
#[command(version)]
#[command(about = "Resolves media page links into downloads and relays the files")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port (overrides PORT and the config file)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        "media_gateway=trace,tower_http=debug".to_string()
    } else {
        format!("media_gateway={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting media-gateway v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;

    if let Ok(port) = std::env::var("PORT") {
        match port.parse::<u16>() {
            Ok(port) => config.web.port = port,
            Err(_) => warn!("Ignoring invalid PORT value '{}'", port),
        }
    }
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let server = WebServer::new(config)?;
    info!("Listening on http://{}:{}", server.host(), server.port());

    server.serve().await?;
    info!("Shut down cleanly");
    Ok(())
}
