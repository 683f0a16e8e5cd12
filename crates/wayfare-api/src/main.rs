//! Wayfare API server
//!
//! HTTP surface for the inclusive travel agent: profile CRUD, chat with
//! user-context injection, and session management, forwarding turns to the
//! configured agent executor.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_agents::{AgentExecutor, GenaiExecutor, ScriptedExecutor};
use wayfare_common::{LlmConfig, SmtpConfig, StorageConfig};
use wayfare_context::{ContextBuilder, SessionRegistry};
use wayfare_profile::{ProfileService, SurrealConfig};

mod api;

use api::AppState;

/// Command-line arguments for the Wayfare API server
#[derive(Parser, Debug)]
#[clap(name = "wayfare-api", about = "HTTP API server for the Wayfare inclusive travel agent")]
struct Args {
    /// Host to bind to
    #[clap(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[clap(short, long, default_value = "8080")]
    port: u16,

    /// Path to the data directory
    #[clap(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Run without an LLM backend (deterministic scripted responses)
    #[clap(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let args = Args::parse();

    // Setup tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Wayfare API server...");
    info!("Data directory: {:?}", args.data_dir);

    // Ensure data directory exists
    std::fs::create_dir_all(&args.data_dir)?;

    // Configuration is read once at startup
    let storage = StorageConfig::from_env(&args.data_dir);
    let llm_config = LlmConfig::from_env()?;
    let smtp = SmtpConfig::from_env();

    // Profile storage: SurrealDB primary, in-memory fallback on failure
    let surreal_config = SurrealConfig::File {
        path: storage
            .path
            .clone()
            .unwrap_or_else(|| args.data_dir.join("profiles.db")),
        namespace: storage.namespace.clone(),
        database: storage.database.clone(),
    };
    let profiles = Arc::new(ProfileService::with_surreal(surreal_config).await);
    if profiles.is_degraded() {
        warn!("Profile storage started degraded; records will not survive a restart");
    }

    let sessions = Arc::new(SessionRegistry::new());
    let context = Arc::new(ContextBuilder::new(profiles.clone()));

    let executor: Arc<dyn AgentExecutor> = if args.offline {
        warn!("Running offline with the scripted executor");
        Arc::new(ScriptedExecutor)
    } else {
        info!("Using model: {}", llm_config.model);
        Arc::new(GenaiExecutor::new(&llm_config))
    };

    if smtp.enabled {
        info!("Email notifications enabled via {}:{}", smtp.server, smtp.port);
    }

    let state = Arc::new(AppState {
        profiles,
        sessions,
        context,
        executor,
        smtp,
    });

    // Build Axum app with routes from api modules
    let app = Router::new()
        .merge(api::info::info_routes(state.clone()))
        .merge(api::users::user_routes(state.clone()))
        .merge(api::chat::chat_routes(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", args.host, args.port);
    info!("Binding to address: {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
