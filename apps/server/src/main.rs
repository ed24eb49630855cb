mod console;

use anyhow::Context;
use chamapay_config::load as load_config;
use chamapay_gateway::{build_router, GatewayState};
use chamapay_runtime::{telemetry, BackendServices};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use crate::console::Console;

#[derive(Parser)]
#[command(name = "chamapay")]
#[command(about = "ChamaPay reminder bot and admin dashboard (console by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP and WebSocket server
    Serve,
    /// Start interactive console (default)
    Console,
    /// Write the contribution report for the initial roster
    Report {
        /// Output path; defaults to the configured file name
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;
    let services =
        BackendServices::initialise(&config).context("failed to initialise backend services")?;

    let result = match cli.command.unwrap_or(Commands::Console) {
        Commands::Serve => run_server(&services).await,
        Commands::Console => Console::new(services.clone()).run().await,
        Commands::Report { output } => {
            let path = console::write_report(&services, output).await?;
            println!("{path}");
            Ok(())
        }
    };

    services.shutdown().await;
    result
}

async fn run_server(services: &BackendServices) -> anyhow::Result<()> {
    info!("starting ChamaPay backend");

    let app = build_router(GatewayState::from_services(services));

    let http = &services.config.http;
    let address = format!("{}:{}", http.address, http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(chamapay_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}
