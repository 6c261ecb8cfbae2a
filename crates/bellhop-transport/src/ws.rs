//! Live channel over WebSocket with internal reconnect.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

use bellhop_core::config::backend::BackendConfig;
use bellhop_core::error::AppError;
use bellhop_core::result::AppResult;
use bellhop_entity::Notification;
use bellhop_feed::traits::{LiveChannel, LiveSubscription};

/// The only inbound event this client consumes.
const NOTIFICATION_EVENT: &str = "notification:new";

/// Wire envelope of a live frame.
#[derive(Debug, Deserialize)]
struct LiveEnvelope {
    event: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// WebSocket adapter for the live notification channel.
///
/// Owns reconnection: on transport loss it backs off exponentially and
/// redials with the same token. The feed manager never observes reconnects
/// and no history backfill is performed for the outage gap.
#[derive(Debug, Clone)]
pub struct WsLiveChannel {
    url: String,
    reconnect_initial: Duration,
    reconnect_max: Duration,
}

impl WsLiveChannel {
    /// Creates a channel factory from the backend configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        Ok(Self {
            url: ws_url(&config.base_url)?,
            reconnect_initial: Duration::from_millis(config.reconnect_initial_ms),
            reconnect_max: Duration::from_millis(config.reconnect_max_ms),
        })
    }
}

#[async_trait]
impl LiveChannel for WsLiveChannel {
    async fn subscribe(&self, token: &str) -> AppResult<LiveSubscription> {
        let (tx, rx) = mpsc::channel(64);
        let url = format!("{}?token={}", self.url, token);
        let initial = self.reconnect_initial;
        let max = self.reconnect_max;

        let task = tokio::spawn(async move {
            let mut delay = initial;
            loop {
                match connect_async(url.as_str()).await {
                    Ok((mut ws, _)) => {
                        debug!("Live channel connected");
                        delay = initial;
                        while let Some(frame) = ws.next().await {
                            match frame {
                                Ok(Message::Text(text)) => {
                                    if let Some(notification) = parse_event(text.as_str()) {
                                        if tx.send(notification).await.is_err() {
                                            // Subscriber dropped; stop redialing.
                                            return;
                                        }
                                    }
                                }
                                Ok(Message::Close(_)) => break,
                                Ok(_) => {}
                                Err(e) => {
                                    warn!(error = %e, "Live channel read error");
                                    break;
                                }
                            }
                        }
                        warn!("Live channel disconnected, reconnecting");
                    }
                    Err(e) => {
                        warn!(error = %e, "Live channel connect failed");
                    }
                }

                if tx.is_closed() {
                    return;
                }
                sleep(delay).await;
                delay = (delay * 2).min(max);
            }
        });

        Ok(LiveSubscription::new(rx, task))
    }
}

/// Maps the backend base URL onto its WebSocket endpoint.
fn ws_url(base_url: &str) -> AppResult<String> {
    let base = base_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("https://") {
        Ok(format!("wss://{rest}/ws"))
    } else if let Some(rest) = base.strip_prefix("http://") {
        Ok(format!("ws://{rest}/ws"))
    } else {
        Err(AppError::configuration(format!(
            "Unsupported base URL scheme: {base_url}"
        )))
    }
}

/// Parses one wire frame; everything but `notification:new` is ignored.
fn parse_event(text: &str) -> Option<Notification> {
    let envelope: LiveEnvelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!(error = %e, "Ignoring unparsable live frame");
            return None;
        }
    };

    if envelope.event != NOTIFICATION_EVENT {
        return None;
    }

    match envelope.data {
        Some(data) => match serde_json::from_value(data) {
            Ok(notification) => Some(notification),
            Err(e) => {
                warn!(error = %e, "Malformed notification payload");
                None
            }
        },
        None => None,
    }
}
