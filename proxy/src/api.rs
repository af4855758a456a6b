use std::{future::Future, net::TcpListener, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::Config;
use crate::error::ReportError;
use crate::rugcheck::{ReportSummary, RugCheckClient};

/// Trạng thái trả về ở route gốc
pub const SERVICE_STATUS: &str = "RugCheck Proxy running";

pub struct AppState {
    pub config: Config,
    pub rugcheck: RugCheckClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rugcheck = RugCheckClient::from_config(&config);
        Self { config, rugcheck }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: SERVICE_STATUS.to_string(),
    })
}

async fn solana_check(
    State(state): State<Arc<AppState>>,
    address: Result<Path<String>, PathRejection>,
) -> Result<Json<ReportSummary>, ReportError> {
    // Địa chỉ không giải mã được (ví dụ %FF) vẫn trả về lỗi JSON 500
    let Path(address) = address.map_err(|rejection| {
        warn!("Không đọc được địa chỉ token: {}", rejection.body_text());
        ReportError::InvalidRequest(rejection.body_text())
    })?;

    let summary = state
        .rugcheck
        .fetch_report(&address)
        .await
        .and_then(|report| report.summary());

    match summary {
        Ok(summary) => {
            info!(token = %address, result = %summary.result, "Kiểm tra token thành công");
            Ok(Json(summary))
        }
        Err(e) => {
            warn!(token = %address, "Kiểm tra token thất bại: {}", e);
            Err(e)
        }
    }
}

// Định nghĩa router chính
pub fn get_routes(app_state: Arc<AppState>) -> Router {
    // CORS cho mọi origin
    let cors = CorsLayer::new()
        .allow_headers(Any)
        .allow_methods(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(root))
        .route("/solana/:address", get(solana_check))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors),
        )
        .with_state(app_state)
}

/// Chạy server trên listener có sẵn cho tới khi `shutdown` hoàn thành
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    app_state: Arc<AppState>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    listener.set_nonblocking(true)?;
    let addr = listener.local_addr()?;
    info!("API server starting on {}", addr);

    axum::Server::from_tcp(listener)?
        .serve(get_routes(app_state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("API server lỗi")?;

    Ok(())
}

/// Khởi động API server theo cấu hình, tắt khi nhận CTRL+C
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.listen_addr()?;
    let listener =
        TcpListener::bind(addr).with_context(|| format!("Không thể bind địa chỉ {}", addr))?;
    let app_state = Arc::new(AppState::new(config));

    serve_with_listener(listener, app_state, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Đã nhận tín hiệu tắt, đang dừng API server..."),
        Err(e) => error!("Không thể bắt tín hiệu CTRL+C: {}", e),
    }
}
