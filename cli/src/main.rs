use anyhow::{Context, Result};
use application::rag_service::RagService;
use clap::Parser;
use infrastructure::config::Config;
use infrastructure::gemini_client::GeminiClient;
use infrastructure::ollama_client::OllamaClient;
use infrastructure::search::VectorIndex;
use shared::logging::{enable_error_backtraces, init_tracing};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Answers customer questions over HTTP from a pre-built vector index.
#[derive(Parser, Debug)]
#[command(name = "rag_server")]
#[command(about = "Persona-styled question answering over a pre-built vector index", long_about = None)]
struct Cli {
    /// Directory holding the pre-built index (overrides RAG_INDEX_DIR)
    #[arg(long)]
    index_dir: Option<PathBuf>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    // Set before the runtime spawns its workers.
    enable_error_backtraces();
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(Cli::parse()))
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(index_dir) = cli.index_dir {
        config.index_dir = index_dir;
    }
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    init_tracing(config.environment);
    info!(?config, "Configuration loaded");

    let index = VectorIndex::load(&config.index_dir).with_context(|| {
        format!(
            "failed to load vector index from {}",
            config.index_dir.display()
        )
    })?;
    let embedder = OllamaClient::new(&config.ollama_base_url, &config.embedding_model);
    let model = GeminiClient::new(
        &config.gemini_base_url,
        &config.llm_model,
        &config.google_api_key,
    );
    info!(
        embedding_model = embedder.model(),
        llm_model = model.model(),
        "Model clients ready"
    );

    let service = Arc::new(RagService::new(embedder, index, model));
    let app = presentation::http::router(service);

    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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
