use anyhow::{Context, Result};
use rugcheck_proxy::{api, logger, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Tải cấu hình
    let config = Config::from_env().context("Không thể tải cấu hình từ biến môi trường")?;

    // Thiết lập logging
    let _guard = logger::init_logging(config.log_dir.as_deref())?;

    info!("Khởi động RugCheck Proxy...");
    api::serve(config).await?;

    info!("RugCheck Proxy đã tắt thành công");
    Ok(())
}
