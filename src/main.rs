use clap::Parser;
use std::sync::Arc;
use teleagent::application::{SessionOrchestrator, TrunkService};
use teleagent::config::Config;
use teleagent::infrastructure::dispatcher::ProcessDispatcher;
use teleagent::interface::api::{build_router, init_metrics, AppState};
use teleagent::interface::cli::{place_call, Cli, Commands};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        None | Some(Commands::Serve) => serve(config).await,
        Some(Commands::Call {
            phone,
            api_key,
            api_secret,
            server,
            wait,
        }) => {
            let mut client = config.client;
            if let Some(server) = server {
                client.server_url = server;
            }

            let session = place_call(client, &phone, &api_key, &api_secret, wait).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Starting TeleAgent API");
    info!("Configuration loaded: {:?}", config);

    // Initialize metrics exporter
    let prometheus_handle = init_metrics()?;

    let dispatcher = Arc::new(ProcessDispatcher::from_config(&config.dispatcher));
    info!(
        "Dispatcher: {} {:?} (timeout {}s)",
        config.dispatcher.program, config.dispatcher.args, config.dispatcher.timeout_secs
    );

    let state = AppState {
        orchestrator: Arc::new(SessionOrchestrator::new(
            dispatcher.clone(),
            config.dispatcher.timeout(),
        )),
        trunk_service: Arc::new(TrunkService::new(dispatcher, config.dispatcher.timeout())),
    };
    let app = build_router(state, prometheus_handle);

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("REST API server listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
    }
}
