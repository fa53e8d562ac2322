//! Server-Sent Events endpoint for login notifications.
//!
//! Each connected client gets its own hub subscription. Every notification
//! becomes one SSE event whose data is the raw payload. If the listening
//! connection is lost, the client receives a final `error` event and the
//! stream ends.
//!
//! SSE framing treats both `\r` and `\n` as line breaks and splits them into
//! separate `data:` lines, which a client rejoins with `\n`. Payloads
//! containing line breaks are therefore not delivered byte-exact; a lone
//! `\r` arrives as `\n`.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures::StreamExt;

use crate::bridge::HubMessage;
use crate::state::AppState;
use pgdemo_common::AppResult;

/// SSE endpoint handler
///
/// `GET /login-stream`
///
/// Returns `503` if the bridge is no longer listening.
pub async fn login_stream(State(state): State<AppState>) -> AppResult<Response> {
    let mut subscription = state.hub.subscribe().await?;
    let subscriber_id = subscription.id();

    let events = async_stream::stream! {
        while let Some(message) = subscription.next().await {
            match message {
                HubMessage::Notification(notification) => {
                    yield Ok::<_, Infallible>(Event::default().data(notification.payload));
                }
                HubMessage::Failed(reason) => {
                    tracing::warn!(subscriber_id = %subscriber_id, "Ending stream after connection loss");
                    yield Ok(Event::default().event("error").data(reason));
                    break;
                }
            }
        }
    };

    Ok(Sse::new(events)
        .keep_alive(KeepAlive::new().interval(state.keep_alive).text("ping"))
        .into_response())
}
