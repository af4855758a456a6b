use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rugcheck_common::NodeError;
use serde::Serialize;
use thiserror::Error;

/// Lỗi khi lấy và tóm tắt báo cáo RugCheck
#[derive(Debug, Error)]
pub enum ReportError {
    /// Lỗi mạng khi gọi upstream
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// Upstream trả về status lỗi hoặc body không phải JSON hợp lệ
    #[error("Upstream malformed response: {0}")]
    UpstreamMalformed(String),

    /// Không dựng được request upstream (URL gốc hoặc địa chỉ token không hợp lệ)
    #[error("Invalid upstream request: {0}")]
    InvalidRequest(String),

    /// Báo cáo hợp lệ nhưng thiếu trường bắt buộc
    #[error("{0}")]
    MissingField(#[from] NodeError),
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ReportError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            ReportError::UpstreamMalformed(err.to_string())
        } else {
            ReportError::UpstreamUnreachable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::UpstreamMalformed(format!("invalid JSON: {}", err))
    }
}

impl ReportError {
    /// Mọi loại lỗi đều trả về 500
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Cấu trúc lỗi API
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
