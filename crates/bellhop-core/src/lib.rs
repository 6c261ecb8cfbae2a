//! # bellhop-core
//!
//! Core crate for Shopfront Bellhop, the staff-dashboard notification feed
//! client. Contains configuration schemas, the durable local store port,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Bellhop crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
