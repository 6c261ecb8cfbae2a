//! # bellhop-feed
//!
//! The notification feed manager for the Shopfront staff dashboard. Owns
//! the ordered feed and unread count for the signed-in staff member, the
//! per-staff realtime preference, and the lifecycle of the single live
//! subscription. Storage, transport and alerting are injected through the
//! ports in [`traits`], so the manager itself never touches sockets or
//! files directly.

pub mod manager;
pub mod preference;
pub mod session;
pub mod signal;
pub mod state;
pub mod traits;

pub use manager::FeedManager;
pub use signal::ChangeSignal;
pub use state::{FeedPhase, FeedState};
pub use traits::{AlertSink, HistoryClient, LiveChannel, LiveSubscription};
