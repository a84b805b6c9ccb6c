#![allow(unused)]

//! Shared fixtures for the end-to-end tests: a server on an ephemeral port
//! and a thin client over `tokio-tungstenite`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use sortstream::{InMemoryDatasets, ServerConfig, ServerMessage, SortServer};

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Start a server on an ephemeral port over in-memory datasets `f`, `i`, `p`.
pub async fn start_server(datasets: InMemoryDatasets) -> SocketAddr {
    let mut config = ServerConfig::default();
    config.host = "127.0.0.1".to_string();
    config.speeds.insert("0".to_string(), 0);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = SortServer::with_datasets(config, Arc::new(datasets));
    tokio::spawn(server.serve_on(listener));
    addr
}

pub struct WsClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let (ws, response) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
        assert_eq!(response.status().as_u16(), 101);
        Self { ws }
    }

    pub async fn send_text(&mut self, text: &str) {
        self.ws.send(Message::text(text)).await.unwrap();
    }

    /// Next text message, skipping control frames.
    pub async fn recv(&mut self) -> ServerMessage {
        tokio::time::timeout(TIMEOUT, async {
            loop {
                match self.ws.next().await {
                    Some(Ok(Message::Text(text))) => {
                        return serde_json::from_str(text.as_str()).unwrap()
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                    other => panic!("unexpected frame {other:?}"),
                }
            }
        })
        .await
        .expect("timed out waiting for a message")
    }

    /// Start the closing handshake.
    pub async fn send_close(&mut self) {
        self.ws.close(None).await.unwrap();
    }

    /// Half-close the TCP stream without a closing handshake, as a client
    /// that crashes would.
    pub async fn shutdown_write(&mut self) {
        self.ws.get_mut().shutdown().await.unwrap();
    }

    /// Read until the server ends the connection and count the step frames
    /// that were still delivered. Panics if the server keeps the connection
    /// open past [`TIMEOUT`].
    pub async fn drain_steps(&mut self) -> usize {
        tokio::time::timeout(TIMEOUT, async {
            let mut steps = 0;
            while let Some(frame) = self.ws.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if let Ok(ServerMessage::Step(_)) = serde_json::from_str(text.as_str()) {
                            steps += 1;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
            steps
        })
        .await
        .expect("server kept the connection open")
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}
