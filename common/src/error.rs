// Third party imports
use thiserror::Error;

/// Lỗi khi truy cập cây JSON
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// Trường bắt buộc không tồn tại trên node
    #[error("Missing field: {field}")]
    MissingField {
        /// Tên trường (hoặc đường dẫn có dấu chấm) bị thiếu
        field: String,
    },
}

impl NodeError {
    /// Tạo lỗi thiếu trường
    pub fn missing(field: impl Into<String>) -> Self {
        NodeError::MissingField { field: field.into() }
    }

    /// Tên trường bị thiếu
    pub fn field(&self) -> &str {
        match self {
            NodeError::MissingField { field } => field,
        }
    }
}

/// Kiểu kết quả chung
pub type NodeResult<T> = Result<T, NodeError>;
