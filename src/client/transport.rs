//! WebSocket client for the hub.
//!
//! [`ChatClient`] owns exactly one connection and the [`ChatSession`] it
//! feeds. There is no reconnect: once the socket closes the client stays
//! closed and sends become no-ops.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use super::session::{ChatSession, EchoPolicy};
use crate::domain::ChatMessage;
use crate::error::ChatError;
use crate::ws::messages::WsFrame;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A broadcast delivered by the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    /// The message as broadcast.
    pub message: ChatMessage,
    /// Whether the session appended it to the log.
    pub appended: bool,
}

/// Builds the WebSocket URL for `endpoint` with `userName` attached.
///
/// `http`/`https` endpoints are mapped to `ws`/`wss` and `/ws` is appended
/// to the endpoint's path.
///
/// # Errors
///
/// Returns [`ChatError::InvalidEndpoint`] if `endpoint` is not a URL, or
/// [`ChatError::InvalidConfig`] if its scheme cannot carry a WebSocket.
pub fn endpoint_url(endpoint: &str, user_name: &str) -> Result<Url, ChatError> {
    let mut url = Url::parse(endpoint)?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(ChatError::InvalidConfig {
                key: "CHAT_ENDPOINT",
                reason: format!("unsupported scheme {other:?}"),
            });
        }
    };
    if url.set_scheme(scheme).is_err() {
        return Err(ChatError::InvalidConfig {
            key: "CHAT_ENDPOINT",
            reason: format!("cannot switch {endpoint:?} to {scheme}"),
        });
    }

    let path = format!("{}/ws", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.query_pairs_mut()
        .clear()
        .append_pair("userName", user_name);
    Ok(url)
}

/// One chat session connected to a hub.
pub struct ChatClient {
    session: ChatSession,
    stream: Option<WsStream>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("session", &self.session)
            .field("connected", &self.stream.is_some())
            .finish()
    }
}

impl ChatClient {
    /// Opens a single WebSocket session tagged with `user_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or the handshake fails.
    pub async fn connect(
        endpoint: &str,
        user_name: impl Into<String>,
        policy: EchoPolicy,
    ) -> Result<Self, ChatError> {
        let session = ChatSession::new(user_name, policy);
        let url = endpoint_url(endpoint, session.user_name())?;
        let (stream, _response) = connect_async(url.as_str()).await?;
        tracing::info!(user = %session.user_name(), %url, "connected to hub");

        Ok(Self {
            session,
            stream: Some(stream),
        })
    }

    /// The local session state.
    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Whether the socket is still open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Sends `body` under this session's name.
    ///
    /// Returns the transmitted message, or `None` if `body` was empty or the
    /// connection is gone; neither case touches the log.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the socket fails. The socket is
    /// considered closed afterwards.
    pub async fn send(&mut self, body: &str) -> Result<Option<ChatMessage>, ChatError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(None);
        };
        let Some(message) = self.session.compose(body) else {
            return Ok(None);
        };

        let text = WsFrame::from(message.clone()).encode()?;
        if let Err(err) = stream.send(Message::text(text)).await {
            self.mark_closed();
            return Err(err.into());
        }
        Ok(Some(message))
    }

    /// Waits for the next broadcast and applies it to the session.
    ///
    /// Frames that are not chat messages are skipped. Returns `None` once
    /// the connection has closed.
    pub async fn next_message(&mut self) -> Option<Received> {
        loop {
            let frame = self.stream.as_mut()?.next().await;
            match frame {
                Some(Ok(Message::Text(text))) => match WsFrame::decode(&text) {
                    Ok(WsFrame::Message(message)) => {
                        let appended = self.session.on_broadcast(message.clone());
                        return Some(Received { message, appended });
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "ignoring undecodable frame");
                    }
                },
                Some(Ok(Message::Close(_))) | None => {
                    self.mark_closed();
                    return None;
                }
                Some(Err(err)) => {
                    tracing::debug!(error = %err, "ws read failed");
                    self.mark_closed();
                    return None;
                }
                Some(Ok(_)) => {}
            }
        }
    }

    /// Closes the connection. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the close handshake cannot be written.
    pub async fn close(&mut self) -> Result<(), ChatError> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        tracing::info!(user = %self.session.user_name(), "disconnected from hub");
        match stream.close(None).await {
            Ok(())
            | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn mark_closed(&mut self) {
        if self.stream.take().is_some() {
            tracing::info!(user = %self.session.user_name(), "disconnected from hub");
        }
    }
}
