use std::future::Future;

use crate::Result;

/// Service whose lifetime is managed by a [`Host`].
pub trait HostedService {
    /// Called once when the host starts.
    fn start(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Called once when the host shuts down after a successful start.
    fn stop(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Runs one hosted service until a shutdown future resolves.
#[derive(Debug, Default)]
pub struct Host;

impl Host {
    pub fn new() -> Self {
        Self
    }

    /// Starts `service`, waits for `shutdown`, then stops it.
    ///
    /// If `start` fails, the error is returned and `stop` is not called. The
    /// shutdown future is not polled until startup has completed.
    pub async fn run<S, F>(&self, service: &mut S, shutdown: F) -> Result<()>
    where
        S: HostedService,
        F: Future<Output = ()>,
    {
        service.start().await?;
        tracing::info!("application started, press Ctrl+C to shut down");

        shutdown.await;
        tracing::info!("application is shutting down");

        service.stop().await
    }
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
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
