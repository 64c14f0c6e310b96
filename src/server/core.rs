//! Server core
//!
//! Binds the HTTP listener and wires the connector route to the
//! dispatcher. The core itself is stateless: every request is handled
//! independently with the shared read-only configuration.

use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::dispatcher::{FileRequest, dispatch};
use crate::error::handlers::handle_error;
use crate::server::config::ServerConfig;

// headroom for multipart framing on top of the configured payload limit
const UPLOAD_ENVELOPE_BYTES: usize = 1024 * 1024;

pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    pub async fn new() -> Self {
        let config = match ServerConfig::load() {
            Ok(config) => Arc::new(config),
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                panic!("Server startup failed: {}", e);
            }
        };

        if let Some(root) = config.active_root() {
            if let Err(e) = std::fs::create_dir_all(root) {
                warn!("Failed to create root directory {}: {}", root, e);
            } else {
                info!("Serving root directory: {}", root);
            }
        }

        let socket = config.bind_socket();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                panic!("Server startup failed on socket {}: {}", socket, e);
            }
        };

        Self { listener, config }
    }

    pub async fn start(self) {
        info!("Starting file manager server on {}", self.config.bind_socket());
        let app = router(Arc::clone(&self.config));
        if let Err(e) = axum::serve(self.listener, app).await {
            error!("Server terminated: {}", e);
        }
    }
}

/// Build the connector router. The widget calls a single endpoint with
/// `GET` for plain operations and `POST` for forms and uploads.
pub fn router(config: Arc<ServerConfig>) -> Router {
    let body_limit = if config.max_upload_size_kb == 0 {
        DefaultBodyLimit::disable()
    } else {
        DefaultBodyLimit::max(config.max_upload_size_kb as usize * 1000 + UPLOAD_ENVELOPE_BYTES)
    };

    Router::new()
        .route("/", get(connector).post(connector))
        .layer(body_limit)
        .with_state(config)
}

async fn connector(State(config): State<Arc<ServerConfig>>, req: Request) -> Response {
    let request = match FileRequest::from_http(req).await {
        Ok(request) => request,
        Err(response) => return response,
    };

    match dispatch(&config, &request) {
        Ok(response) => response.into_response(),
        Err(e) => {
            handle_error(&e);
            e.into_response()
        }
    }
}
