use std::sync::Arc;

use backend::shared::config::{load_config, resolve_path};
use backend::shared::data::db;
use backend::shared::state::AppState;
use backend::shared::storage::{ImageStore, LocalImageStore};
use backend::system::auth::admin::AdminAuth;
use backend::{routes, system};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    system::tracing::initialize(&config.logging)?;
    tracing::info!("Configuration loaded from {}", source);

    let db_path = resolve_path(&config.database.path)?;
    let conn = db::connect(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let upload_dir = resolve_path(&config.storage.upload_dir)?;
    let images = Arc::new(LocalImageStore::new(upload_dir, &config.storage.public_path));
    images.ensure_ready().await?;
    tracing::info!(
        "Serving uploaded images from {} at {}",
        images.root().display(),
        images.public_path()
    );

    let auth = AdminAuth::from_config(&config)?;
    let state = AppState::new(conn, images.clone(), auth);
    let app = routes::configure_routes(state, &images);

    let host = config.server.host.as_str();
    let port = config.server.port;
    tracing::info!("Attempting to bind server to http://{}:{}", host, port);
    let listener = match TcpListener::bind((host, port)).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}:{}", host, port);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to {}:{}. Error: {}", host, port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
