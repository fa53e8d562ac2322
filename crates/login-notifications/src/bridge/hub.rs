//! Fan-out hub for notification subscribers.
//!
//! Each subscriber owns an unbounded channel registered in a shared map.
//! Broadcasting holds the read lock for the whole send loop, so a
//! subscriber registering concurrently either receives a message in full or
//! not at all, and no subscriber is ever handed a message emitted before it
//! attached.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::source::NotificationMessage;
use crate::error::BridgeError;

/// What a subscriber receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubMessage {
    /// A notification from the database.
    Notification(NotificationMessage),
    /// The shared connection failed; this is the last message.
    Failed(String),
}

/// Lifecycle of the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubStatus {
    /// Accepting subscribers and delivering notifications.
    Open,
    /// Shut down; all subscriber streams have ended.
    Closed,
    /// The listening connection was lost.
    Failed(String),
}

impl HubStatus {
    /// Short name used in health output.
    pub fn as_str(&self) -> &'static str {
        match self {
            HubStatus::Open => "listening",
            HubStatus::Closed => "closed",
            HubStatus::Failed(_) => "connection_lost",
        }
    }
}

/// Sending half of one subscriber's queue.
pub type SubscriberSender = mpsc::UnboundedSender<HubMessage>;

/// An attached subscriber and when it attached.
#[derive(Debug, Clone)]
struct Subscriber {
    sender: SubscriberSender,
    connected_at: chrono::DateTime<chrono::Utc>,
}

/// Registry of attached subscribers.
#[derive(Clone)]
pub struct NotificationHub {
    subscribers: Arc<RwLock<HashMap<Uuid, Subscriber>>>,
    status: Arc<RwLock<HubStatus>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            status: Arc::new(RwLock::new(HubStatus::Open)),
        }
    }

    /// Attach a new subscriber.
    ///
    /// Fails once the hub is closed or its connection has been lost.
    pub async fn subscribe(&self) -> Result<Subscription, BridgeError> {
        // Hold the status lock while registering so that close/fail cannot
        // slip in between the check and the insert.
        let status = self.status.read().await;
        match &*status {
            HubStatus::Open => {}
            HubStatus::Closed => return Err(BridgeError::ShuttingDown),
            HubStatus::Failed(reason) => return Err(BridgeError::ConnectionLost(reason.clone())),
        }

        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        let subscriber = Subscriber {
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.subscribers.write().await.insert(id, subscriber);
        drop(status);

        tracing::info!(subscriber_id = %id, "Subscriber attached");

        Ok(Subscription {
            id,
            receiver: rx,
            hub: self.clone(),
        })
    }

    /// Detach a subscriber (on disconnect).
    pub async fn unsubscribe(&self, id: Uuid) {
        if let Some(subscriber) = self.subscribers.write().await.remove(&id) {
            let attached_for = chrono::Utc::now() - subscriber.connected_at;
            tracing::info!(
                subscriber_id = %id,
                attached_secs = attached_for.num_seconds(),
                "Subscriber detached"
            );
        }
    }

    /// Deliver a notification to every attached subscriber.
    ///
    /// Returns the number of subscribers that accepted it. Subscribers whose
    /// receiving side is gone are removed.
    pub async fn broadcast(&self, message: NotificationMessage) -> usize {
        let mut delivered = 0;
        let mut gone = Vec::new();

        {
            let subscribers = self.subscribers.read().await;
            for (id, subscriber) in subscribers.iter() {
                if subscriber
                    .sender
                    .send(HubMessage::Notification(message.clone()))
                    .is_ok()
                {
                    delivered += 1;
                } else {
                    gone.push(*id);
                }
            }
        }

        if !gone.is_empty() {
            let mut subscribers = self.subscribers.write().await;
            for id in gone {
                subscribers.remove(&id);
                tracing::debug!(error = %BridgeError::StreamDisconnect(id), "Pruned subscriber");
            }
        }

        tracing::debug!(
            channel = %message.channel,
            delivered,
            "Notification broadcast"
        );

        delivered
    }

    /// Close the hub after a clean shutdown; all subscriber streams end.
    pub async fn close(&self) {
        let mut status = self.status.write().await;
        if *status == HubStatus::Open {
            *status = HubStatus::Closed;
        }
        let dropped = self.subscribers.write().await.drain().count();
        tracing::info!(subscribers = dropped, "Notification hub closed");
    }

    /// Mark the hub failed and tell every subscriber why before ending
    /// their streams.
    pub async fn fail(&self, reason: &str) {
        let mut status = self.status.write().await;
        *status = HubStatus::Failed(reason.to_string());

        let mut subscribers = self.subscribers.write().await;
        for (_, subscriber) in subscribers.drain() {
            let _ = subscriber.sender.send(HubMessage::Failed(reason.to_string()));
        }
    }

    /// Current hub status.
    pub async fn status(&self) -> HubStatus {
        self.status.read().await.clone()
    }

    /// Number of attached subscribers.
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One attached subscriber's view of the hub.
///
/// Dropping it detaches the subscriber.
pub struct Subscription {
    id: Uuid,
    receiver: mpsc::UnboundedReceiver<HubMessage>,
    hub: NotificationHub,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the next message; `None` once the hub has let go.
    pub async fn recv(&mut self) -> Option<HubMessage> {
        self.receiver.recv().await
    }
}

impl Stream for Subscription {
    type Item = HubMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let hub = self.hub.clone();
        let id = self.id;
        // Without a runtime the entry is pruned by the next broadcast instead.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                hub.unsubscribe(id).await;
            });
        }
    }
}
