//! Notification entities.

pub mod model;
pub mod severity;

pub use model::{HistoryResponse, Notification};
pub use severity::Severity;
