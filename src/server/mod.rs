//! WebSocket front end.
//!
//! Every connection upgraded on the configured route gets its own task; the
//! shared state is the read-only [`SessionHandler`].

mod ws;

pub use ws::WsTransport;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{Catalog, ServerConfig};
use crate::dataset::{CsvDatasetLoader, DatasetSource};
use crate::session::SessionHandler;

#[derive(Clone)]
pub(crate) struct AppState {
    handler: SessionHandler,
    queue_depth: usize,
}

/// The streaming server.
pub struct SortServer {
    config: ServerConfig,
    handler: SessionHandler,
}

impl SortServer {
    /// Server reading datasets from the files named in `config`.
    pub fn new(config: ServerConfig) -> Self {
        let loader = CsvDatasetLoader::from_config(&config.dataset);
        Self::with_datasets(config, Arc::new(loader))
    }

    /// Server with a custom dataset source. Dataset ids are still validated
    /// against `config.dataset.files`.
    pub fn with_datasets(config: ServerConfig, datasets: Arc<dyn DatasetSource>) -> Self {
        let catalog = Arc::new(Catalog::from_config(&config));
        let handler = SessionHandler::new(catalog, datasets);
        Self { config, handler }
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            handler: self.handler.clone(),
            queue_depth: self.config.request_queue_depth.max(1),
        };
        Router::new()
            .route(&self.config.route, get(ws::upgrade))
            .with_state(state)
    }

    /// Bind the configured address and serve until the process exits.
    pub async fn serve(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.listen_addr()).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(%addr, route = %self.config.route, "websocket server started");
        axum::serve(listener, self.router()).await
    }
}
