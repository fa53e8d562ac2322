//! Errors raised by the notification bridge.

use pgdemo_common::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Failures of the LISTEN/NOTIFY bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The dedicated listening connection could not be opened.
    #[error("Failed to acquire notification connection: {0}")]
    ConnectionAcquisition(#[source] sqlx::Error),

    /// The server rejected the LISTEN command.
    #[error("Failed to LISTEN on channel '{channel}': {source}")]
    ListenRegistration {
        channel: String,
        #[source]
        source: sqlx::Error,
    },

    /// One subscriber's transport went away.
    #[error("Subscriber {0} disconnected")]
    StreamDisconnect(Uuid),

    /// The shared listening connection failed after startup.
    #[error("Notification connection lost: {0}")]
    ConnectionLost(String),

    /// The bridge has been shut down.
    #[error("Notification bridge is shutting down")]
    ShuttingDown,
}

impl From<BridgeError> for AppError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::ConnectionLost(_) | BridgeError::ShuttingDown => {
                AppError::ServiceUnavailable(err.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
