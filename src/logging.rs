// File-based logging via tracing. Writes to ~/.local/share/photopoet/photopoet.log,
// since the terminal itself belongs to the TUI.

use std::path::PathBuf;

use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("photopoet")
}

pub fn init() -> anyhow::Result<()> {
    let data_dir = log_dir();
    std::fs::create_dir_all(&data_dir)?;

    let file_appender = rolling::never(&data_dir, "photopoet.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(EnvFilter::from_default_env().add_directive("photopoet=debug".parse()?))
        .init();

    // The guard must outlive the program; leak it so the file writer stays open.
    std::mem::forget(guard);
    Ok(())
}
