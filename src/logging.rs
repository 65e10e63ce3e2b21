use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the file sink alive; buffered lines are flushed when it is dropped.
#[must_use = "dropping the guard stops the file sink"]
pub struct LogGuard {
    _file: WorkerGuard,
    path: PathBuf,
}

impl LogGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Installs the global subscriber writing to the console and to `log_file`.
///
/// The level comes from `RUST_LOG` and defaults to `info`. The file layer has
/// no ANSI colouring. Fails when the log directory cannot be created or a
/// global subscriber is already installed.
pub fn init_logging(log_file: &Path) -> io::Result<LogGuard> {
    let (dir, file_name) = split_log_path(log_file)?;
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer().with_target(true);
    let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!("logging to console and {}", log_file.display());
    Ok(LogGuard {
        _file: guard,
        path: log_file.to_path_buf(),
    })
}

/// Splits a log path into its directory (current directory when absent) and
/// file name.
fn split_log_path(log_file: &Path) -> io::Result<(PathBuf, &OsStr)> {
    let file_name = log_file.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log path '{}' has no file name", log_file.display()),
        )
    })?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
