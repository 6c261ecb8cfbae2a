//! # bellhop-transport
//!
//! Concrete adapters behind the feed ports: the reqwest history client,
//! the tokio-tungstenite live channel with internal reconnect, JSON-file
//! and in-memory local stores, and the logging alert sink.

pub mod alert;
pub mod http;
pub mod store;
pub mod ws;

pub use alert::LogAlertSink;
pub use http::HttpHistoryClient;
pub use store::{JsonFileStore, MemoryStore};
pub use ws::WsLiveChannel;
