//! Inventory service binary: loads config, opens the database pool, serves HTTP until
//! Ctrl-C/SIGTERM, then closes the pool.

use axum::Router;
use inventory_service::{config, db, logging, AppState, PgItemStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = config::load()?;
    let _log_guard = logging::init(&config.logging)?;

    let database_url = config::database_url()?;
    let pool = db::connect(&database_url, &config.database).await?;
    db::ensure_items_table(&pool).await?;

    let state = AppState::new(PgItemStore::new(pool.clone(), config.associations.clone()));
    let app = inventory_service::app(state, &config);

    let served = serve(app, &config.listen_addr()).await;
    db::close(pool).await;
    served?;
    Ok(())
}

async fn serve(app: Router, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
