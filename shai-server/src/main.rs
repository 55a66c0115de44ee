mod config;

use std::net::SocketAddr;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use config::{HistoryBackendKind, ServerConfig};
use shai_core::Data;
use shai_history::{HistoryStore, StorageService};
use shai_llm::LlmService;
use shai_utils::env::env_bool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the .env file
    dotenvy::dotenv().ok();

    init_tracing(env_bool("DEBUG", false));

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    let config = ServerConfig::from_env();

    let storage = build_storage(&config);
    if storage.is_redis_enabled() {
        if let Err(err) = storage.ping().await {
            warn!(
                ?err,
                "Redis ping failed; history operations will degrade until it is reachable."
            );
        } else {
            info!("Redis health check passed.");
        }
    }
    let history = HistoryStore::new(storage);

    let llm = LlmService::from_env()?;
    if !llm.using_local() && !llm.claude_configured() {
        warn!("CLAUDE_API_KEY is not set; /generate will answer with fallback lines.");
    }

    let data = Data::new(history, llm);

    let mut app = shai_api::router(data, config.web_dir.as_deref());
    if config.cors_enabled {
        info!("CORS enabled for all origins");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }
    let app = app.layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("ShAI listening on http://{}", addr);
    for route in shai_api::ROUTES {
        info!("  {:<6} {:<16} - {}", route.method, route.path, route.desc);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ShAI stopped.");
    Ok(())
}

fn init_tracing(debug: bool) {
    let max_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(move |metadata| {
        if *metadata.level() > max_level {
            return false;
        }

        let target = metadata.target();
        !(target.starts_with("hyper") || target.starts_with("h2"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();
}

fn build_storage(config: &ServerConfig) -> StorageService {
    let prefix = config.history_key_prefix.clone();

    match config.history_backend_kind() {
        Some(HistoryBackendKind::Memory) => {
            info!(key_prefix = %prefix, "History kept in memory (set HISTORY_BACKEND=file or redis to persist).");
            StorageService::memory(prefix)
        }
        Some(HistoryBackendKind::File) => {
            match StorageService::file(&config.history_dir, prefix.clone()) {
                Ok(storage) => {
                    info!(history_dir = %config.history_dir.display(), key_prefix = %prefix, "File history enabled.");
                    storage
                }
                Err(err) => {
                    warn!(?err, history_dir = %config.history_dir.display(), "Failed to initialize file history; continuing with in-memory history.");
                    StorageService::memory(prefix)
                }
            }
        }
        Some(HistoryBackendKind::Redis) => match config.redis_url.as_deref() {
            Some(redis_url) => match StorageService::redis(redis_url, prefix.clone()) {
                Ok(storage) => {
                    info!(key_prefix = %prefix, "Redis history enabled.");
                    storage
                }
                Err(err) => {
                    warn!(?err, key_prefix = %prefix, "Failed to initialize Redis history; continuing with in-memory history.");
                    StorageService::memory(prefix)
                }
            },
            None => {
                warn!(key_prefix = %prefix, "HISTORY_BACKEND=redis but REDIS_URL is missing; continuing with in-memory history.");
                StorageService::memory(prefix)
            }
        },
        None => {
            warn!(backend = %config.history_backend, "Unknown HISTORY_BACKEND; continuing with in-memory history.");
            StorageService::memory(prefix)
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(?err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
