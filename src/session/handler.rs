//! Request handling for one connection.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::message::{ServerMessage, SessionRequest};
use super::playback::PlaybackSession;
use super::state::{Session, SessionState};
use super::transport::Transport;
use crate::config::{Catalog, ResolvedRequest};
use crate::dataset::DatasetSource;
use crate::error::SessionResult;

/// Turns raw request messages into playback sessions.
///
/// Cheap to clone; every connection gets its own copy over the same catalog
/// and dataset source.
#[derive(Clone)]
pub struct SessionHandler {
    catalog: Arc<Catalog>,
    datasets: Arc<dyn DatasetSource>,
}

impl SessionHandler {
    pub fn new(catalog: Arc<Catalog>, datasets: Arc<dyn DatasetSource>) -> Self {
        Self { catalog, datasets }
    }

    /// Run one session for `raw` and return its terminal state.
    ///
    /// A request that cannot be resolved is answered with a
    /// [`ServerMessage::Rejected`] and never streams anything.
    pub async fn handle<T>(&self, seq: u64, raw: &str, transport: &mut T) -> SessionState
    where
        T: Transport + ?Sized,
    {
        let mut session = Session::new(seq);
        session.enter(SessionState::Resolving);

        let (resolved, values) = match self.resolve(raw).await {
            Ok(ok) => ok,
            Err(err) => {
                let reason = err.to_string();
                tracing::info!(session = seq, reason = %reason, "request rejected");
                let reply = ServerMessage::Rejected {
                    reason: reason.clone(),
                };
                if let Err(send_err) = transport.send(&reply).await {
                    tracing::debug!(session = seq, error = %send_err, "could not report rejection");
                }
                return session.finish(SessionState::Rejected { reason });
            }
        };

        session.enter(SessionState::Streaming {
            algorithm: resolved.algorithm,
            dataset: resolved.dataset.clone(),
            len: values.len(),
        });
        tracing::info!(
            session = seq,
            algo = %resolved.algorithm,
            dataset = %resolved.dataset,
            len = values.len(),
            delay_ms = resolved.delay.as_millis() as u64,
            "streaming"
        );

        let steps = resolved.algorithm.steps(values);
        let outcome = PlaybackSession::new(resolved.delay)
            .run(steps, transport)
            .await;
        tracing::info!(session = seq, outcome = ?outcome, "session ended");
        session.finish(outcome.into())
    }

    async fn resolve(&self, raw: &str) -> SessionResult<(ResolvedRequest, Vec<f64>)> {
        let request: SessionRequest = serde_json::from_str(raw)?;
        let resolved = self.catalog.resolve(&request)?;
        let values = self.datasets.load(&resolved.dataset).await?;
        Ok((resolved, values))
    }

    /// Serve queued requests one session at a time until the queue closes or
    /// the transport becomes unusable. Returns the number of sessions run.
    ///
    /// Requests that arrive while a session is streaming wait in the queue.
    pub async fn serve_queue<T>(&self, mut requests: mpsc::Receiver<String>, transport: &mut T) -> u64
    where
        T: Transport + ?Sized,
    {
        let mut seq = 0u64;
        while let Some(raw) = requests.recv().await {
            if transport.is_closed() {
                break;
            }
            seq += 1;
            let state = self.handle(seq, &raw, transport).await;
            if !state.connection_usable() {
                break;
            }
        }
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::dataset::InMemoryDatasets;
    use crate::session::ChannelTransport;

    fn handler() -> SessionHandler {
        let mut config = ServerConfig::default();
        config.speeds.insert("0".to_string(), 0);
        let datasets = InMemoryDatasets::new()
            .with("f", vec![5.0, 3.0, 4.0, 1.0, 2.0])
            .with("i", vec![])
            .with("p", vec![2.0, 1.0]);
        SessionHandler::new(
            Arc::new(Catalog::from_config(&config)),
            Arc::new(datasets),
        )
    }

    async fn drain(mut rx: mpsc::Receiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        while let Some(message) = rx.recv().await {
            out.push(message);
        }
        out
    }

    #[tokio::test]
    async fn test_handle_streams_to_completion() {
        let (mut transport, rx) = ChannelTransport::channel(64);
        let state = handler()
            .handle(
                1,
                r#"{"algo":"insertionsort","file":"f","speed":"0"}"#,
                &mut transport,
            )
            .await;
        drop(transport);

        let messages = drain(rx).await;
        assert!(messages.len() >= 4);
        assert_eq!(
            state,
            SessionState::Completed {
                delivered: messages.len() as u64
            }
        );
        match messages.last().unwrap() {
            ServerMessage::Step(event) => assert_eq!(event.values, vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_rejects_unknown_algorithm() {
        let (mut transport, rx) = ChannelTransport::channel(4);
        let state = handler()
            .handle(1, r#"{"algo":"bogosort","file":"f","speed":"0"}"#, &mut transport)
            .await;
        drop(transport);

        assert!(matches!(state, SessionState::Rejected { ref reason } if reason.contains("bogosort")));
        let messages = drain(rx).await;
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], ServerMessage::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_handle_rejects_malformed_json() {
        let (mut transport, _rx) = ChannelTransport::channel(4);
        let state = handler().handle(1, "not json", &mut transport).await;
        assert!(matches!(state, SessionState::Rejected { ref reason } if reason.starts_with("Invalid request")));
    }

    #[tokio::test]
    async fn test_handle_empty_dataset_completes_silently() {
        let (mut transport, rx) = ChannelTransport::channel(4);
        let state = handler()
            .handle(1, r#"{"algo":"quicksort","file":"i","speed":"0"}"#, &mut transport)
            .await;
        drop(transport);
        assert_eq!(state, SessionState::Completed { delivered: 0 });
        assert!(drain(rx).await.is_empty());
    }

    #[tokio::test]
    async fn test_serve_queue_continues_after_rejection() {
        let (requests_tx, requests_rx) = mpsc::channel(4);
        requests_tx
            .send(r#"{"algo":"nope","file":"p","speed":"0"}"#.to_string())
            .await
            .unwrap();
        requests_tx
            .send(r#"{"algo":"bubblesort","file":"p","speed":"0"}"#.to_string())
            .await
            .unwrap();
        drop(requests_tx);

        let (mut transport, rx) = ChannelTransport::channel(16);
        let served = handler().serve_queue(requests_rx, &mut transport).await;
        drop(transport);

        assert_eq!(served, 2);
        let messages = drain(rx).await;
        assert!(matches!(messages[0], ServerMessage::Rejected { .. }));
        assert_eq!(
            messages[1],
            ServerMessage::Step(crate::sorting::ProgressEvent {
                step: 1,
                focus: vec![0, 1],
                values: vec![1.0, 2.0],
            })
        );
        assert_eq!(messages.len(), 2);
    }

    #[tokio::test]
    async fn test_serve_queue_runs_sessions_serially() {
        let (requests_tx, requests_rx) = mpsc::channel(4);
        for algo in ["mergesort", "heapsort"] {
            requests_tx
                .send(format!(r#"{{"algo":"{algo}","file":"f","speed":"0"}}"#))
                .await
                .unwrap();
        }
        drop(requests_tx);

        let (mut transport, rx) = ChannelTransport::channel(256);
        handler().serve_queue(requests_rx, &mut transport).await;
        drop(transport);

        // Step numbers restart exactly once: the second session never
        // interleaves with the first.
        let steps: Vec<u64> = drain(rx)
            .await
            .into_iter()
            .map(|m| match m {
                ServerMessage::Step(event) => event.step,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        let restarts = steps.windows(2).filter(|w| w[1] <= w[0]).count();
        assert_eq!(restarts, 1);
    }
}
