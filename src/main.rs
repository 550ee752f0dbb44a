use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstack_relay::config::{ConfigState, ListenerConfig};
use bookstack_relay::http::HttpServer;
use bookstack_relay::lifecycle::{signals, Shutdown};

#[derive(Parser)]
#[command(name = "bookstack-relay")]
#[command(about = "Credential-isolating relay for the BookStack API", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "relay.toml")]
    config: PathBuf,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstack_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("bookstack-relay v{} starting", env!("CARGO_PKG_VERSION"));

    let config = ConfigState::load(&cli.config);

    let bind_address = cli.bind.unwrap_or_else(|| match &config {
        ConfigState::Loaded(c) => c.listener.bind_address.clone(),
        ConfigState::Missing { .. } => ListenerConfig::default().bind_address,
    });

    if let ConfigState::Loaded(c) = &config {
        // The base URL is the one non-secret upstream value; tokens stay out
        // of every log field.
        tracing::info!(
            bind_address = %bind_address,
            upstream = %c.upstream.bookstack_url,
            allowed_origins = ?c.allowed_origins,
            "Configuration loaded"
        );
    }

    let listener = TcpListener::bind(&bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
