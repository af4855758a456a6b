//! Thư viện dùng chung cho RugCheck proxy.
//!
//! Chứa [`Node`], cây điều hướng được bọc quanh JSON tuỳ ý của API upstream.

pub mod error;
pub mod node;

pub use error::{NodeError, NodeResult};
pub use node::Node;
