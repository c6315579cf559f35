//! CLI entrypoint for aida
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use aida_application::{ConversationRelay, RunAgentUseCase, ToolExecutorPort};
use aida_domain::AgentPromptTemplate;
use aida_infrastructure::{
    ConfigLoader, FileConfig, FileLoggingConfig, HttpCatalogClient, InMemorySessionStore,
    OpenAiGateway, inventory_tools,
};
use aida_presentation::{AppState, ChatArgs, ChatClient, ChatRepl, Cli, Command, ServeArgs, build_router};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args, cli.verbose).await,
        Command::Chat(args) => chat(args, cli.verbose).await,
    }
}

async fn serve(args: ServeArgs, verbose: u8) -> Result<()> {
    // === Configuration ===
    let mut config = if args.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(args.config.as_ref())?
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if args.show_config {
        ConfigLoader::print_config_sources(args.config.as_ref());
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        let details: Vec<String> = issues.iter().map(|e| format!("  - {}", e)).collect();
        bail!("Invalid configuration:\n{}", details.join("\n"));
    }

    let _guard = init_logging(&config.logging, verbose);

    info!("Starting aida");

    // === Dependency Injection ===
    let relay = Arc::new(build_relay(&config)?);

    let shutdown = CancellationToken::new();
    if let Some(ttl) = relay.params().session_ttl {
        spawn_session_sweeper(relay.clone(), ttl, shutdown.clone());
    }

    let app = build_router(AppState::new(relay), &config.server.cors_origins);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr = %addr, "aida server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    shutdown.cancel();
    info!("aida server stopped");
    Ok(())
}

fn build_relay(config: &FileConfig) -> Result<ConversationRelay> {
    let catalog = Arc::new(
        HttpCatalogClient::from_config(&config.catalog).context("failed to build catalog client")?,
    );
    let tools = Arc::new(inventory_tools(catalog));
    let system_prompt = AgentPromptTemplate::assistant_system(tools.tool_spec());

    let gateway = Arc::new(OpenAiGateway::from_config(&config.llm)?);
    let agent = RunAgentUseCase::new(gateway, tools);

    Ok(ConversationRelay::new(
        Arc::new(InMemorySessionStore::new()),
        agent,
        system_prompt,
        config.relay.to_params(),
    ))
}

fn spawn_session_sweeper(
    relay: Arc<ConversationRelay>,
    ttl: std::time::Duration,
    shutdown: CancellationToken,
) {
    // Sweep several times per TTL, at most once a minute.
    let period = (ttl / 4).clamp(std::time::Duration::from_secs(1), std::time::Duration::from_secs(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    relay.evict_idle_sessions().await;
                }
            }
        }
    });
}

async fn chat(args: ChatArgs, verbose: u8) -> Result<()> {
    let _guard = init_logging(&FileLoggingConfig::default(), verbose);

    let client = ChatClient::new(&args.url).context("failed to build HTTP client")?;
    let mut repl = ChatRepl::new(client).with_progress(!args.quiet);
    repl.run().await?;
    Ok(())
}

/// Initialize logging from RUST_LOG, falling back to the verbosity level.
///
/// When `logging.directory` is set, logs also go to a daily rolling file;
/// the returned guard must be held until exit so buffered lines get flushed.
fn init_logging(logging: &FileLoggingConfig, verbose: u8) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let (file_layer, guard) = match logging.directory.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "aida.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let (json_layer, text_layer) = if logging.json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (
            None,
            Some(fmt::layer().with_target(false).with_writer(std::io::stderr)),
        )
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init();
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }

    guard
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
