use std::fmt;
use std::io::Write;

use crate::{ApiClient, Configuration, Endpoint, HostedService, ResponseMode, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerState {
    Starting,
    Running,
    Stopped,
}

/// Hosted service that performs a single API call on start.
pub struct BackgroundRunner<W> {
    client: ApiClient,
    config: Configuration,
    message_key: String,
    endpoint: Endpoint,
    mode: ResponseMode,
    out: W,
    state: RunnerState,
}

impl<W> fmt::Debug for BackgroundRunner<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundRunner")
            .field("client", &self.client)
            .field("message_key", &self.message_key)
            .field("endpoint", &self.endpoint)
            .field("mode", &self.mode)
            .field("state", &self.state)
            .finish()
    }
}

impl<W: Write + Send> BackgroundRunner<W> {
    pub fn new(
        client: ApiClient,
        config: Configuration,
        message_key: impl Into<String>,
        out: W,
    ) -> Self {
        Self {
            client,
            config,
            message_key: message_key.into(),
            endpoint: Endpoint::People,
            mode: ResponseMode::Record,
            out,
            state: RunnerState::Starting,
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_mode(mut self, mode: ResponseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<W: Write + Send> HostedService for BackgroundRunner<W> {
    async fn start(&mut self) -> Result<()> {
        let message = self.config.get_or_empty(&self.message_key).to_owned();
        tracing::info!("sending {message}");

        self.client
            .report(self.endpoint, self.mode, &mut self.out)
            .await?;
        self.client.run(&message, &mut self.out)?;

        self.state = RunnerState::Running;
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.state = RunnerState::Stopped;
        Ok(())
    }
}
