//! Where notifications come from.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::postgres::PgListener;

use crate::error::BridgeError;
use pgdemo_common::db::DbPool;

/// One NOTIFY delivered by the server. The payload is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub channel: String,
    pub payload: String,
}

impl NotificationMessage {
    pub fn new(channel: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            payload: payload.into(),
        }
    }
}

/// A long-lived, single-consumer feed of notifications.
#[async_trait]
pub trait NotificationSource: Send + 'static {
    /// Wait for the next notification.
    ///
    /// `Ok(None)` means the underlying connection is gone; the source will
    /// not produce anything further.
    async fn next_notification(&mut self) -> Result<Option<NotificationMessage>, BridgeError>;

    /// Release the connection. Called at most once, on shutdown.
    async fn close(&mut self) -> Result<(), BridgeError>;
}

/// [`NotificationSource`] backed by a `PgListener` on a dedicated pool.
pub struct PgNotificationSource {
    listener: Option<PgListener>,
    pool: DbPool,
}

impl PgNotificationSource {
    /// Take the single connection of `pool` and `LISTEN` on `channel`.
    pub async fn listen(pool: DbPool, channel: &str) -> Result<Self, BridgeError> {
        let mut listener = PgListener::connect_with(&pool)
            .await
            .map_err(BridgeError::ConnectionAcquisition)?;

        listener
            .listen(channel)
            .await
            .map_err(|source| BridgeError::ListenRegistration {
                channel: channel.to_string(),
                source,
            })?;

        tracing::info!(channel = %channel, "LISTEN registered");

        Ok(Self {
            listener: Some(listener),
            pool,
        })
    }
}

#[async_trait]
impl NotificationSource for PgNotificationSource {
    async fn next_notification(&mut self) -> Result<Option<NotificationMessage>, BridgeError> {
        let Some(listener) = self.listener.as_mut() else {
            return Ok(None);
        };

        // try_recv yields None on a dropped connection; it never reconnects.
        match listener.try_recv().await {
            Ok(Some(notification)) => Ok(Some(NotificationMessage::new(
                notification.channel(),
                notification.payload(),
            ))),
            Ok(None) => Ok(None),
            Err(e) => Err(BridgeError::ConnectionLost(e.to_string())),
        }
    }

    async fn close(&mut self) -> Result<(), BridgeError> {
        let unlisten = match self.listener.as_mut() {
            Some(listener) => listener.unlisten_all().await,
            None => Ok(()),
        };
        self.listener = None;
        self.pool.close().await;

        unlisten.map_err(|e| BridgeError::ConnectionLost(e.to_string()))
    }
}
