//! Layered configuration read from the command line and the environment.
//!
//! Sources are applied in order and a later source overrides an earlier one,
//! so environment variables win over command-line arguments. Keys compare
//! case-insensitively.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::{Endpoint, ResponseMode};

/// Key the runner reads its message from unless `MessageKey` says otherwise.
pub const DEFAULT_MESSAGE_KEY: &str = "PROCESSOR_IDENTIFIER";
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/";
pub const DEFAULT_LOG_FILE: &str = "test.log";

#[derive(Clone, Debug, Default)]
pub struct Configuration {
    values: HashMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the process configuration: command-line arguments (without the
    /// program name) followed by environment variables.
    ///
    /// Arguments and variables that are not valid Unicode are converted
    /// lossily.
    pub fn from_process() -> Self {
        Self::new()
            .with_command_line(std::env::args_os().skip(1).map(lossy))
            .with_environment(
                std::env::vars_os().map(|(key, value)| (lossy(key), lossy(value))),
            )
    }

    /// Adds arguments of the forms `--Key=value`, `--Key value`, `-Key value`,
    /// `/Key=value`, `/Key value` and `Key=value`.
    ///
    /// A switch without a value is ignored.
    pub fn with_command_line<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into).peekable();
        while let Some(arg) = args.next() {
            let (prefixed, rest) = match arg.strip_prefix("--") {
                Some(rest) => (true, rest),
                None => match arg.strip_prefix('-').or_else(|| arg.strip_prefix('/')) {
                    Some(rest) => (true, rest),
                    None => (false, arg.as_str()),
                },
            };

            if let Some((key, value)) = rest.split_once('=') {
                self.set(key, value);
                continue;
            }

            if !prefixed {
                tracing::debug!(argument = %arg, "ignoring positional argument");
                continue;
            }

            let key = rest.to_owned();
            match args.next_if(|next| !is_switch(next)) {
                Some(value) => self.set(&key, value),
                None => tracing::debug!(switch = %key, "ignoring switch without a value"),
            }
        }
        self
    }

    /// Adds `(name, value)` pairs such as those yielded by [`std::env::vars`].
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            self.set(key.as_ref(), value);
        }
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let key = normalize_key(key);
        if key.is_empty() {
            return;
        }
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize_key(key)).map(String::as_str)
    }

    /// Returns the value for `key`, or an empty string when it is not set.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }
}

fn lossy(value: OsString) -> String {
    value
        .into_string()
        .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

fn is_switch(arg: &str) -> bool {
    arg.starts_with('-')
}

fn non_blank<'a>(config: &'a Configuration, key: &str) -> Option<&'a str> {
    config.get(key).map(str::trim).filter(|value| !value.is_empty())
}

/// Host settings resolved from a [`Configuration`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub endpoint: Endpoint,
    pub response_mode: ResponseMode,
    pub message_key: String,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            endpoint: Endpoint::People,
            response_mode: ResponseMode::Record,
            message_key: DEFAULT_MESSAGE_KEY.to_owned(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Reads `ApiBaseUrl`, `Endpoint`, `ResponseMode`, `MessageKey` and
    /// `LogFile`, falling back to defaults for absent or blank values.
    pub fn from_configuration(config: &Configuration) -> Result<Self, String> {
        let defaults = Self::default();
        let endpoint = match non_blank(config, "Endpoint") {
            Some(value) => value.parse()?,
            None => defaults.endpoint,
        };
        let response_mode = match non_blank(config, "ResponseMode") {
            Some(value) => value.parse()?,
            None => defaults.response_mode,
        };

        Ok(Self {
            base_url: non_blank(config, "ApiBaseUrl").map_or(defaults.base_url, str::to_owned),
            endpoint,
            response_mode,
            message_key: non_blank(config, "MessageKey").map_or(defaults.message_key, str::to_owned),
            log_file: non_blank(config, "LogFile").map_or(defaults.log_file, PathBuf::from),
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API base url: {}", self.base_url);
        tracing::info!("  Endpoint: {} ({})", self.endpoint, self.endpoint.path());
        tracing::info!("  Response mode: {:?}", self.response_mode);
        tracing::info!("  Message key: {}", self.message_key);
        tracing::info!("  Log file: {}", self.log_file.display());
    }
}

/// Result of loading a `.env` file into the process environment.
#[derive(Debug)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    Missing,
    Invalid(dotenvy::Error),
}

impl DotenvStatus {
    /// Loads `.env` from the current directory or its ancestors.
    pub fn load() -> Self {
        Self::from_result(dotenvy::dotenv())
    }

    pub fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => DotenvStatus::Loaded(path),
            Err(err) if err.not_found() => DotenvStatus::Missing,
            Err(err) => DotenvStatus::Invalid(err),
        }
    }

    /// Reports the outcome; a missing file is not logged.
    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => {
                tracing::info!("loaded environment from {}", path.display())
            }
            DotenvStatus::Missing => {}
            DotenvStatus::Invalid(err) => tracing::warn!("ignoring unreadable .env file: {err}"),
        }
    }
}
