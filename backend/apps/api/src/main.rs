//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use account::middleware::{AccountMiddlewareState, require_admin, require_user};
use account::{AccountConfig, PgAccountRepository, account_admin_router, account_router, registration_router};
use axum::{
    Router,
    http::{Method, header},
    middleware,
};
use billing::{BillingConfig, PgBillingRepository, billing_admin_router, billing_router};
use learning::{LearningConfig, PgLearningRepository, learning_admin_router, learning_router};
use mentoring::{PgMentoringRepository, mentoring_admin_router, mentoring_router};
use platform::identity::{FirebaseIdentityVerifier, IdentityConfig};
use platform::llm::LlmClient;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,account=info,learning=info,billing=info,mentoring=info,platform=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // External services
    let verifier = FirebaseIdentityVerifier::new(IdentityConfig::from_env()?)?;
    let llm = LlmClient::from_env();
    if !llm.is_available() {
        tracing::warn!("LLM_API_KEY not set, weakness analysis will use the fallback report");
    }

    let account_config = AccountConfig::from_env();
    let learning_config = LearningConfig::from_env();
    let billing_config = BillingConfig::from_env();

    let accounts = PgAccountRepository::new(pool.clone());
    let learning_repo = PgLearningRepository::new(pool.clone());
    let billing_repo = PgBillingRepository::new(pool.clone());
    let mentoring_repo = PgMentoringRepository::new(pool.clone());

    let auth = AccountMiddlewareState::new(accounts.clone(), verifier, account_config.clone());

    // Signed-in users
    let user_api = Router::new()
        .merge(account_router(accounts.clone(), account_config.clone()))
        .merge(learning_router(
            learning_repo.clone(),
            accounts.clone(),
            llm.clone(),
            learning_config.clone(),
        ))
        .merge(billing_router(billing_repo.clone(), billing_config.clone()))
        .merge(mentoring_router(mentoring_repo.clone()))
        .layer(middleware::from_fn_with_state(
            auth.clone(),
            require_user::<PgAccountRepository, FirebaseIdentityVerifier>,
        ));

    // Operators
    let admin_api = Router::new()
        .merge(account_admin_router(accounts.clone(), account_config))
        .merge(learning_admin_router(
            learning_repo,
            accounts,
            llm,
            learning_config,
        ))
        .merge(billing_admin_router(billing_repo, billing_config))
        .merge(mentoring_admin_router(mentoring_repo))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            auth.clone(),
            require_user::<PgAccountRepository, FirebaseIdentityVerifier>,
        ));

    let api = Router::new()
        .merge(registration_router(auth))
        .merge(user_api)
        .nest("/admin", admin_api);

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors(&config));

    // Start server
    let addr = config.addr();
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn cors(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.allowed_origins())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
