//! `swapi-host` runs a single background call against the Star Wars API.
//!
//! The pieces are wired explicitly by the binary:
//! - [`RetryPolicy`] exponential backoff for transient failures and 404s
//! - [`ApiClient::report`] GET an [`Endpoint`] and print it raw or as a [`Person`]
//! - [`BackgroundRunner`] the [`HostedService`] driven by [`Host::run`]

mod client;
pub mod config;
mod endpoint;
mod error;
mod host;
pub mod logging;
mod record;
mod retry;
mod runner;

pub use client::ApiClient;
pub use config::{Configuration, Settings};
pub use endpoint::{Endpoint, ResponseMode};
pub use error::ApiError;
pub use host::{shutdown_signal, Host, HostedService};
pub use record::Person;
pub use retry::RetryPolicy;
pub use runner::{BackgroundRunner, RunnerState};

pub type Result<T> = std::result::Result<T, ApiError>;
