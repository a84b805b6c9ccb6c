use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::message::ServerMessage;
use crate::error::TransportError;

/// Outbound half of a client connection.
#[async_trait]
pub trait Transport: Send {
    /// Deliver one message. Must return [`TransportError::Closed`] when the
    /// peer has gone away, and a different variant for any other fault.
    async fn send(&mut self, message: &ServerMessage) -> Result<(), TransportError>;

    /// Whether the peer is already known to be gone. Implementations without
    /// a close notification can rely on the default and let `send` report it.
    fn is_closed(&self) -> bool {
        false
    }

    /// Token cancelled when the peer goes away, so waits between sends can
    /// end early. `None` when the transport has no such notification.
    fn close_signal(&self) -> Option<CancellationToken> {
        None
    }
}

/// Transport backed by a bounded channel. A dropped receiver means closed.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::Sender<ServerMessage>,
}

impl ChannelTransport {
    pub fn new(tx: mpsc::Sender<ServerMessage>) -> Self {
        Self { tx }
    }

    /// Create a transport and the receiver observing it.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ServerMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&mut self, message: &ServerMessage) -> Result<(), TransportError> {
        self.tx
            .send(message.clone())
            .await
            .map_err(|_| TransportError::Closed)
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_transport_delivers() {
        let (mut transport, mut rx) = ChannelTransport::channel(4);
        let message = ServerMessage::Rejected { reason: "x".into() };
        transport.send(&message).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), message);
        assert!(!transport.is_closed());
    }

    #[tokio::test]
    async fn test_channel_transport_reports_closed() {
        let (mut transport, rx) = ChannelTransport::channel(4);
        drop(rx);
        assert!(transport.is_closed());
        let err = transport
            .send(&ServerMessage::Rejected { reason: "x".into() })
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::Closed);
    }
}
