//! # bellhop-entity
//!
//! Domain entity models for Shopfront Bellhop: notifications as served by
//! the admin backend, and the staff identity stored client-side.

pub mod notification;
pub mod staff;

pub use notification::{HistoryResponse, Notification, Severity};
pub use staff::{StaffSession, StaffUser};
