use clients_app::mirror::{spawn_mirror, SheetMirror};
use clients_app::{load_data, router, AppState, ClientStore, Config};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&config.data_path).await;
    let store = ClientStore::new(config.data_path.clone(), data);

    match &config.mirror_url {
        Some(url) => {
            info!(%url, "spreadsheet mirror enabled");
            spawn_mirror(SheetMirror::new(url.clone())?, store.subscribe());
        }
        None => info!("APP_MIRROR_URL not set, spreadsheet mirror disabled"),
    }

    if config.access_token.is_some() {
        info!("api access requires a bearer token");
    }

    let state = AppState::new(store, config.access_token.clone());
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
