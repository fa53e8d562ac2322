//! LISTEN/NOTIFY bridge.
//!
//! One task owns the listening connection and pushes every notification into
//! a [`NotificationHub`]; HTTP streams subscribe to the hub. The hub is
//! created before the source is started, so it can be handed to the router
//! up front.
//!
//! There is no reconnection: if the listening connection drops, the hub is
//! marked failed and every attached stream receives a final error.

pub mod hub;
pub mod source;

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::ListenConfig;
use crate::error::BridgeError;
use pgdemo_common::config::DatabaseConfig;
use pgdemo_common::db::create_dedicated;

pub use hub::{HubMessage, HubStatus, NotificationHub, Subscription};
pub use source::{NotificationMessage, NotificationSource, PgNotificationSource};

/// Why the listen loop stopped.
#[derive(Debug, PartialEq, Eq)]
enum Exit {
    Shutdown,
    Lost(String),
}

/// Handle to the running listen task.
pub struct NotificationBridge {
    hub: NotificationHub,
    channel: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    close_timeout: Duration,
}

impl NotificationBridge {
    /// Open a dedicated connection, `LISTEN` on the configured channel and
    /// start forwarding notifications into `hub`.
    ///
    /// # Errors
    ///
    /// [`BridgeError::ConnectionAcquisition`] if the connection cannot be
    /// opened, [`BridgeError::ListenRegistration`] if `LISTEN` fails.
    pub async fn start(
        db_config: &DatabaseConfig,
        listen_config: &ListenConfig,
        hub: NotificationHub,
    ) -> Result<Self, BridgeError> {
        let pool = create_dedicated(db_config)
            .await
            .map_err(BridgeError::ConnectionAcquisition)?;

        let source = PgNotificationSource::listen(pool, &listen_config.notify_channel).await?;

        Ok(Self::spawn(
            source,
            hub,
            &listen_config.notify_channel,
            listen_config.close_timeout(),
        ))
    }

    /// Start forwarding from an already-registered source.
    pub fn spawn<S: NotificationSource>(
        source: S,
        hub: NotificationHub,
        channel: &str,
        close_timeout: Duration,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run(source, hub.clone(), shutdown_rx));

        tracing::info!(channel = %channel, "Notification bridge started");

        Self {
            hub,
            channel: channel.to_string(),
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
            close_timeout,
        }
    }

    /// The hub streams subscribe to.
    pub fn hub(&self) -> NotificationHub {
        self.hub.clone()
    }

    /// Channel this bridge listens on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Stop listening and release the connection.
    ///
    /// Close failures are logged, never retried; waiting for the task is
    /// bounded by the configured close timeout.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match tokio::time::timeout(self.close_timeout, task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "Notification task ended abnormally"),
                Err(_) => tracing::warn!(
                    timeout_secs = self.close_timeout.as_secs(),
                    "Timed out closing notification connection"
                ),
            }
        }

        tracing::info!(channel = %self.channel, "Notification bridge stopped");
    }
}

/// Forward notifications until shutdown or connection loss.
async fn run<S: NotificationSource>(
    mut source: S,
    hub: NotificationHub,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let exit = loop {
        tokio::select! {
            _ = &mut shutdown_rx => break Exit::Shutdown,
            next = source.next_notification() => match next {
                Ok(Some(message)) => {
                    hub.broadcast(message).await;
                }
                Ok(None) => break Exit::Lost("connection closed by server".to_string()),
                Err(e) => break Exit::Lost(e.to_string()),
            },
        }
    };

    match exit {
        Exit::Shutdown => {
            hub.close().await;
            if let Err(e) = source.close().await {
                tracing::warn!(error = %e, "Failed to close notification connection");
            }
        }
        Exit::Lost(reason) => {
            let err = BridgeError::ConnectionLost(reason);
            tracing::error!(error = %err, "Notification bridge stopped");
            hub.fail(&err.to_string()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Source fed by a test through a channel; dropping the sender
    /// simulates the server closing the connection.
    struct ChannelSource {
        rx: mpsc::UnboundedReceiver<Result<NotificationMessage, String>>,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl NotificationSource for ChannelSource {
        async fn next_notification(
            &mut self,
        ) -> Result<Option<NotificationMessage>, BridgeError> {
            match self.rx.recv().await {
                Some(Ok(message)) => Ok(Some(message)),
                Some(Err(reason)) => Err(BridgeError::ConnectionLost(reason)),
                None => Ok(None),
            }
        }

        async fn close(&mut self) -> Result<(), BridgeError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn channel_bridge() -> (
        NotificationBridge,
        mpsc::UnboundedSender<Result<NotificationMessage, String>>,
        Arc<AtomicBool>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let closed = Arc::new(AtomicBool::new(false));
        let source = ChannelSource {
            rx,
            closed: closed.clone(),
        };
        let bridge = NotificationBridge::spawn(
            source,
            NotificationHub::new(),
            "login_event_notification",
            Duration::from_secs(1),
        );
        (bridge, tx, closed)
    }

    fn note(payload: &str) -> Result<NotificationMessage, String> {
        Ok(NotificationMessage::new("login_event_notification", payload))
    }

    #[tokio::test]
    async fn test_forwards_notifications_in_order() {
        let (bridge, tx, _) = channel_bridge();
        let mut sub = bridge.hub().subscribe().await.unwrap();

        tx.send(note("alice")).unwrap();
        tx.send(note("bob")).unwrap();

        for expected in ["alice", "bob"] {
            match sub.recv().await {
                Some(HubMessage::Notification(m)) => assert_eq!(m.payload, expected),
                other => panic!("unexpected message: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_connection_loss_fails_attached_subscribers() {
        let (bridge, tx, closed) = channel_bridge();
        let hub = bridge.hub();
        let mut sub = hub.subscribe().await.unwrap();

        drop(tx);

        assert!(matches!(sub.recv().await, Some(HubMessage::Failed(_))));
        assert_eq!(sub.recv().await, None);
        assert!(matches!(hub.status().await, HubStatus::Failed(_)));
        assert!(!closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_source_error_is_reported_as_connection_lost() {
        let (bridge, tx, _) = channel_bridge();
        let hub = bridge.hub();
        let mut sub = hub.subscribe().await.unwrap();

        tx.send(Err("terminating connection".to_string())).unwrap();

        match sub.recv().await {
            Some(HubMessage::Failed(reason)) => {
                assert!(reason.contains("terminating connection"))
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_against_unreachable_database_fails_to_acquire() {
        let db_config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            acquire_timeout: 1,
            ..Default::default()
        };

        let result =
            NotificationBridge::start(&db_config, &ListenConfig::default(), NotificationHub::new())
                .await;

        assert!(matches!(
            result,
            Err(BridgeError::ConnectionAcquisition(_))
        ));
    }

    #[tokio::test]
    async fn test_shutdown_closes_source_and_ends_streams() {
        let (bridge, _tx, closed) = channel_bridge();
        let hub = bridge.hub();
        let mut sub = hub.subscribe().await.unwrap();

        bridge.shutdown().await;

        assert!(closed.load(Ordering::SeqCst));
        assert_eq!(sub.recv().await, None);
        assert_eq!(hub.status().await, HubStatus::Closed);
    }
}
