use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

/// Tên file log (xoay vòng theo ngày)
pub const LOG_FILE_NAME: &str = "rugcheck-proxy.log";

/// Thiết lập tracing: stderr luôn bật, file log khi có `log_dir`.
///
/// Giữ lại `WorkerGuard` trả về cho tới khi tắt process để log file được flush.
pub fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Không thể tạo thư mục log {}", dir.display()))?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(file_layer)
        .try_init()
        .context("Không thể khởi tạo tracing subscriber")?;

    Ok(guard)
}
