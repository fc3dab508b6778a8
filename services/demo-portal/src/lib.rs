//! Demo Portal - status and message board front-end
//!
//! Polls the DevOps demo backend for health, message count and messages,
//! renders them, and forwards new messages from the page form.

pub mod api;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod page;
pub mod poller;
pub mod render;
pub mod schedule;
pub mod state;

pub use config::{load_config, Config};
pub use error::{PortalError, Result};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::BackendApi;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::poller::ClientPoller;
use crate::schedule::{standard_jobs, Scheduler};

/// Run the portal until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    run_until(config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    })
    .await
}

/// Run the portal until `shutdown` resolves
pub async fn run_until<F>(config: Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    run_with_client(config, http, shutdown).await
}

/// Run the portal against the given HTTP client until `shutdown` resolves
pub async fn run_with_client<F>(
    config: Config,
    http: Arc<dyn HttpClient>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    config.validate()?;

    let base_url = config.backend.base_url();
    tracing::info!(
        "Using backend {} (host '{}')",
        base_url,
        config.backend.host
    );

    // The page is the only output, so a port that cannot be bound is fatal
    let page_listener = if config.page.enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.page.port));
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind portal to port {}: {}", config.page.port, e);
            e
        })?;
        Some(listener)
    } else {
        tracing::info!("Page server disabled");
        None
    };

    let cancel = CancellationToken::new();
    let poller = Arc::new(ClientPoller::new(
        BackendApi::new(base_url, http),
        state::new_state_handle(),
    ));

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        shutdown.await;
        cancel_for_signal.cancel();
    });

    if let Some(listener) = page_listener {
        let router = page::build_router(Arc::clone(&poller));
        let cancel_for_page = cancel.clone();
        if let Ok(addr) = listener.local_addr() {
            tracing::info!("Portal listening on http://{}", addr);
        }

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    cancel_for_page.cancelled().await;
                })
                .await
            {
                tracing::error!("Page server failed: {}", e);
            }
            tracing::debug!("Page server stopped");
        });
    }

    let mut scheduler = Scheduler::new(cancel.clone());
    for (job, interval) in standard_jobs(Arc::clone(&poller), &config.schedule) {
        scheduler.start(job, interval);
    }
    tracing::info!("Demo portal started");

    cancel.cancelled().await;
    scheduler.join().await;
    tracing::info!("Demo portal stopped");

    Ok(())
}
