//! Ports implemented by adapter crates.

pub mod store;

pub use store::LocalStore;
