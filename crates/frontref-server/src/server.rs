//! Preview server implementation.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path as UrlPath, State,
    },
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::sync::{broadcast, RwLock};

use frontref_catalog::Catalog;
use frontref_site::{load_catalog, pages::stylesheet_name, PageRenderer};

use crate::reload::{reload_client_script, ReloadHub, ReloadMessage};
use crate::watcher::{FileWatcher, WatchEvent};

const RELOAD_SCRIPT_PATH: &str = "/__reload.js";

/// Configuration for the preview server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Catalog file; the builtin catalog is used when unset
    pub catalog: Option<PathBuf>,

    /// Directory served under `/assets`
    pub assets_dir: Option<PathBuf>,

    /// Externally supplied stylesheets, served under `/assets/<file name>`
    pub styles: Vec<String>,

    /// Site title
    pub title: String,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            assets_dir: None,
            styles: vec![],
            title: "Frontend Reference".to_string(),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Failed to load catalog: {0}")]
    CatalogError(String),
}

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    renderer: PageRenderer,
    hub: ReloadHub,
}

impl ServerState {
    fn new(config: DevServerConfig, catalog: Catalog) -> Self {
        let renderer = page_renderer(&config, catalog);
        Self {
            config,
            renderer,
            hub: ReloadHub::new(),
        }
    }
}

fn page_renderer(config: &DevServerConfig, catalog: Catalog) -> PageRenderer {
    let styles = config
        .styles
        .iter()
        .map(|s| stylesheet_name(s).to_string())
        .collect();

    PageRenderer::new(Arc::new(catalog), config.title.clone(), styles)
        .with_reload_script(RELOAD_SCRIPT_PATH)
}

type SharedState = Arc<RwLock<ServerState>>;

/// Preview server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new preview server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the preview server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let catalog = load_catalog(self.config.catalog.as_deref())
            .map_err(|e| ServerError::CatalogError(e.to_string()))?;

        let state = Arc::new(RwLock::new(ServerState::new(self.config.clone(), catalog)));

        // Set up file watcher
        let mut asset_paths: Vec<PathBuf> = self.config.styles.iter().map(PathBuf::from).collect();
        if let Some(dir) = &self.config.assets_dir {
            asset_paths.push(dir.clone());
        }

        let (watcher, mut rx) = FileWatcher::new(self.config.catalog.as_deref(), &asset_paths)
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state);

        tracing::info!("Starting preview server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/__reload", get(ws_handler))
        .route(RELOAD_SCRIPT_PATH, get(reload_script_handler))
        .route("/assets/{*path}", get(asset_handler))
        .fallback(get(page_handler))
        .with_state(state)
}

/// Handle file watch events.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    match event {
        WatchEvent::CatalogModified(path) => {
            tracing::info!("Catalog modified: {}", path.display());

            match Catalog::load(&path) {
                Ok(catalog) => {
                    let mut state = state.write().await;
                    state.renderer = page_renderer(&state.config, catalog);
                    state.hub.send(ReloadMessage::Reload);
                }
                Err(e) => {
                    tracing::warn!("Keeping previous catalog: {}", e);
                    let state = state.read().await;
                    state.hub.send(ReloadMessage::CatalogError {
                        message: e.to_string(),
                    });
                }
            }
        }

        WatchEvent::CatalogRemoved(path) => {
            tracing::warn!(
                "Catalog removed: {}, keeping previous catalog",
                path.display()
            );
        }

        WatchEvent::AssetModified(path) => {
            tracing::debug!("Asset modified: {}", path.display());
            state.read().await.hub.send(ReloadMessage::Reload);
        }
    }
}

/// Handler rendering catalog pages.
async fn page_handler(State(state): State<SharedState>, uri: Uri) -> Response {
    let state = state.read().await;

    let Some(page) = state.renderer.find_page(uri.path()) else {
        return (StatusCode::NOT_FOUND, Html("<h1>Not found</h1>".to_string())).into_response();
    };

    match state.renderer.render(&page) {
        Ok(rendered) => Html(rendered.html).into_response(),
        Err(e) => {
            tracing::warn!("Failed to render {}: {}", page.path, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render {}: {}", page.path, e),
            )
                .into_response()
        }
    }
}

/// Handler for stylesheets and the assets directory.
async fn asset_handler(
    State(state): State<SharedState>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    let state = state.read().await;

    let source = state
        .config
        .styles
        .iter()
        .find(|s| stylesheet_name(s) == path)
        .map(PathBuf::from)
        .or_else(|| {
            let dir = state.config.assets_dir.as_ref()?;
            is_safe_relative(Path::new(&path)).then(|| dir.join(&path))
        });

    let Some(source) = source else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&source).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&source))], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Only plain relative components, so requests cannot leave the assets directory.
fn is_safe_relative(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "css" => "text/css",
        "js" => "application/javascript",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "woff2" => "font/woff2",
        "html" => "text/html",
        _ => "application/octet-stream",
    }
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward reload messages to one connected page.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = state.read().await.hub.subscribe();

    let mut msg = ReloadMessage::Connected;
    loop {
        let Ok(json) = serde_json::to_string(&msg) else {
            break;
        };
        if socket.send(Message::Text(json.into())).await.is_err() {
            break;
        }

        match next_message(&mut rx).await {
            Some(next) => msg = next,
            None => break,
        }
    }
}

/// Next message for a page, or `None` once the hub is gone.
///
/// A page that fell behind gets a single reload instead of the missed
/// messages.
async fn next_message(rx: &mut broadcast::Receiver<ReloadMessage>) -> Option<ReloadMessage> {
    match rx.recv().await {
        Ok(msg) => Some(msg),
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
            tracing::debug!("Reload client lagged by {} messages", skipped);
            Some(ReloadMessage::Reload)
        }
        Err(broadcast::error::RecvError::Closed) => None,
    }
}

/// Handler for the reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        reload_client_script(),
    )
}
