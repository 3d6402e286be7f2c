//! HTTP server initialization and runtime setup.
//!
//! Opens the store, binds the listener and drives connections until a
//! shutdown signal arrives, then drains open connections and flushes the
//! store.

use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::SledLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder;
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// How long open connections may keep running after a shutdown signal.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - `sled` store at `config.db_path`
/// - Router with tracing and timeout layers
/// - HTTP/1 + HTTP/2 listener with the idle timeout
///
/// The store is flushed and released once the server has stopped.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened
/// - Server bind fails
/// - The final flush fails
pub async fn run(config: Config) -> Result<()> {
    let repository = SledLinkRepository::open(&config.db_path, config.collection_name.clone())
        .with_context(|| format!("Failed to open store at '{}'", config.db_path))?;
    tracing::info!(
        "Opened store at {} (collection '{}')",
        config.db_path,
        repository.collection()
    );

    let repository: Arc<dyn LinkRepository> = Arc::new(repository);
    let state = AppState::new(repository.clone(), config.id_length_bytes);

    let timeouts = config.timeouts();
    let app = app_router(state, timeouts);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    serve(listener, app, timeouts.idle, shutdown_signal()).await;

    repository
        .flush()
        .await
        .context("Failed to flush store on shutdown")?;
    tracing::info!("Store flushed, bye");

    Ok(())
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// Each accepted connection runs on its own task. `idle_timeout` bounds how
/// long a connection may sit before its first byte and between requests;
/// HTTP/2 peers that stop answering keep-alive pings within it are dropped. After
/// `shutdown`, no new connections are accepted and in-flight ones get
/// [`SHUTDOWN_GRACE_PERIOD`] to finish.
pub async fn serve<F>(listener: TcpListener, app: Router, idle_timeout: Duration, shutdown: F)
where
    F: Future<Output = ()> + Send,
{
    let mut builder = Builder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(idle_timeout);
    builder
        .http2()
        .timer(TokioTimer::new())
        .keep_alive_interval(idle_timeout)
        .keep_alive_timeout(idle_timeout);

    let graceful = GracefulShutdown::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let builder = builder.clone();
                let service = TowerToHyperService::new(app.clone());
                let watcher = graceful.watcher();

                tokio::spawn(async move {
                    // hyper only arms the header timeout once a request head is being read
                    if tokio::time::timeout(idle_timeout, stream.readable()).await.is_err() {
                        tracing::debug!(%peer, "Closing connection idle since accept");
                        return;
                    }

                    let connection = builder
                        .serve_connection_with_upgrades(TokioIo::new(stream), service)
                        .into_owned();
                    if let Err(e) = watcher.watch(connection).await {
                        tracing::debug!(%peer, "Connection closed with error: {}", e);
                    }
                });
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, no longer accepting connections");
                drop(listener);
                break;
            }
        }
    }

    tokio::select! {
        _ = graceful.shutdown() => {
            tracing::info!("All connections closed");
        }
        _ = tokio::time::sleep(SHUTDOWN_GRACE_PERIOD) => {
            tracing::warn!("Grace period elapsed, dropping remaining connections");
        }
    }
}

/// Resolves on Ctrl+C, or on SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
}
