use recipehub::config::{self, auth::AuthConfig, jwt::JwtConfig, upload::UploadConfig};
use recipehub::migration::Migrator;
use recipehub::storage::{LocalBlobStore, SharedBlobStore};
use recipehub::utils::jwt::TokenService;
use recipehub::{create_app, AppServices};
use sea_orm_migration::MigratorTrait;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipehub=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration before doing anything else
    let (jwt_config, upload_config) = validate_config()?;
    let tokens = TokenService::new(&jwt_config);

    tracing::info!("Starting RecipeHub API v{}...", env!("CARGO_PKG_VERSION"));

    let db = config::database::get_database().await?;
    tracing::info!("Database connected successfully");

    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let blobs: SharedBlobStore = Arc::new(LocalBlobStore::from_config(&upload_config));
    let services = AppServices {
        db,
        tokens,
        auth: AuthConfig::from_env(),
        blobs,
    };
    let app = create_app(services, &upload_config.upload_dir);

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("OpenAPI document at http://{}/api-docs/openapi.json", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Validate all required configuration at startup (fail-fast).
fn validate_config() -> anyhow::Result<(JwtConfig, UploadConfig)> {
    let jwt_config = JwtConfig::from_env()?;

    // DATABASE_URL is checked here for an early error; the connection happens later
    if env::var("DATABASE_URL").is_err() {
        return Err(anyhow::anyhow!(
            "DATABASE_URL environment variable must be set"
        ));
    }

    let upload_config = UploadConfig::from_env();
    std::fs::create_dir_all(&upload_config.upload_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create upload directory '{}': {}",
            upload_config.upload_dir,
            e
        )
    })?;

    Ok((jwt_config, upload_config))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
