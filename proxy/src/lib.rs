//! RugCheck proxy: chuyển tiếp địa chỉ token Solana tới RugCheck API,
//! rút gọn báo cáo và phân loại mức rủi ro.

pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod risk;
pub mod rugcheck;

pub use config::Config;
pub use error::ReportError;
pub use risk::{classify_risk, RiskTier};
pub use rugcheck::{build_summary, ReportFields, ReportSummary, RugCheckClient, RugCheckReport};
