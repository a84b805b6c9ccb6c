//! WebSocket connection handling.

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use std::io::ErrorKind;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::AppState;
use crate::error::TransportError;
use crate::session::{ServerMessage, Transport};

/// Outbound half of a WebSocket. The token is cancelled by the connection's
/// reader once the peer closes, which turns every later send into
/// [`TransportError::Closed`].
pub struct WsTransport {
    sink: SplitSink<WebSocket, Message>,
    closed: CancellationToken,
}

impl WsTransport {
    pub fn new(sink: SplitSink<WebSocket, Message>, closed: CancellationToken) -> Self {
        Self { sink, closed }
    }

    async fn close(mut self) {
        if let Err(err) = self.sink.close().await {
            tracing::trace!(error = %err, "close after peer left");
        }
    }

    fn classify(&self, err: axum::Error) -> TransportError {
        let inner = err.into_inner();
        if self.closed.is_cancelled() || is_peer_gone(&*inner) {
            return TransportError::Closed;
        }
        TransportError::Io(inner.to_string())
    }
}

/// Whether a send error, or anything in its source chain, means the peer has
/// already left.
fn is_peer_gone(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(current) = source {
        if let Some(ws) = current.downcast_ref::<tungstenite::Error>() {
            if matches!(
                ws,
                tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed
            ) {
                return true;
            }
        }
        if let Some(io) = current.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                ErrorKind::BrokenPipe
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::UnexpectedEof
                    | ErrorKind::NotConnected
            ) {
                return true;
            }
        }
        source = current.source();
    }
    false
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, message: &ServerMessage) -> Result<(), TransportError> {
        if self.closed.is_cancelled() {
            return Err(TransportError::Closed);
        }
        let text = serde_json::to_string(message)?;
        match self.sink.send(Message::Text(text.into())).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.classify(err)),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    fn close_signal(&self) -> Option<CancellationToken> {
        Some(self.closed.clone())
    }
}

pub(super) async fn upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| {
        let span = tracing::info_span!("connection", id = %Uuid::new_v4());
        serve_connection(socket, state).instrument(span)
    })
}

/// Read requests into a bounded queue and run them one session at a time.
async fn serve_connection(socket: WebSocket, state: AppState) {
    tracing::info!("new connection");

    let (sink, mut stream) = socket.split();
    let closed = CancellationToken::new();
    let (requests_tx, requests_rx) = mpsc::channel::<String>(state.queue_depth);

    let depth = state.queue_depth;
    let reader_closed = closed.clone();
    let reader = tokio::spawn(
        async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    // Never wait on a full queue: the reader must stay free to
                    // see the peer's close frame.
                    Ok(Message::Text(text)) => {
                        match requests_tx.try_send(text.as_str().to_owned()) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => {
                                tracing::warn!(depth, "request queue full, dropping request");
                            }
                            Err(TrySendError::Closed(_)) => break,
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(Message::Binary(_)) => tracing::debug!("ignoring binary frame"),
                    Ok(_) => {}
                    Err(err) => {
                        tracing::debug!(error = %err, "read failed");
                        break;
                    }
                }
            }
            reader_closed.cancel();
        }
        .in_current_span(),
    );

    let mut transport = WsTransport::new(sink, closed);
    let sessions = state.handler.serve_queue(requests_rx, &mut transport).await;

    reader.abort();
    transport.close().await;
    tracing::info!(sessions, "connection closed");
}
