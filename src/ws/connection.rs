//! Per-connection read/write loop.
//!
//! Registers the socket with the hub, then multiplexes two directions until
//! either side goes away: client frames become [`crate::hub::HubEvent::Message`]s,
//! broadcasts from the outbound queue become text frames.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use super::messages::WsFrame;
use crate::hub::HubHandle;

/// Runs one chat connection to completion.
///
/// The connection is removed from the hub on every exit path.
pub async fn run_connection(socket: WebSocket, hub: HubHandle, user_name: String) {
    let (id, mut outbound) = match hub.connect(user_name).await {
        Ok(registered) => registered,
        Err(err) => {
            tracing::warn!(error = %err, "could not register ws connection");
            return;
        }
    };
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Frame from the client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => match WsFrame::decode(&text) {
                        Ok(WsFrame::Message(message)) => {
                            if hub.publish(id, message).await.is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            tracing::debug!(
                                connection_id = %id,
                                error = %err,
                                "ignoring undecodable frame"
                            );
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(connection_id = %id, error = %err, "ws read failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Broadcast from the hub
            next = outbound.recv() => {
                let Some(message) = next else {
                    // Hub dropped us.
                    break;
                };
                let json = match WsFrame::from(message).encode() {
                    Ok(json) => json,
                    Err(err) => {
                        tracing::warn!(
                            connection_id = %id,
                            error = %err,
                            "failed to encode broadcast"
                        );
                        continue;
                    }
                };
                if ws_tx.send(Message::text(json)).await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = hub.disconnect(id).await;
    tracing::debug!(connection_id = %id, "ws connection closed");
}
