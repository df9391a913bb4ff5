//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path as AxumPath, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tokio::sync::RwLock;

use vitrine_pages::{extract_meta, render_content, PageMeta};
use vitrine_static::assets::AssetPipeline;
use vitrine_static::{NavItem, PageContext, TemplateEngine};
use vitrine_tweet::FixtureProvider;

use crate::livereload::{livereload_client_script, ReloadHub, ReloadMessage};
use crate::watcher::{FileWatcher, WatchEvent};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory containing demo pages
    pub pages_dir: PathBuf,

    /// Directory containing tweet fixtures
    pub fixtures_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Site title
    pub site_title: String,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            fixtures_dir: PathBuf::from("fixtures"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            site_title: "vitrine demos".to_string(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    hub: ReloadHub,
    provider: Arc<FixtureProvider>,
    templates: TemplateEngine,
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .expect("Invalid address");

        let provider = Arc::new(FixtureProvider::new(&self.config.fixtures_dir));
        let state = Arc::new(RwLock::new(ServerState {
            config: self.config.clone(),
            hub: ReloadHub::new(),
            provider,
            templates: TemplateEngine::new(),
        }));

        let watch_paths = vec![
            self.config.pages_dir.clone(),
            self.config.fixtures_dir.clone(),
        ];

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = Router::new()
            .route("/", get(index_handler))
            .route("/{slug}", get(page_handler))
            .route("/assets/site.css", get(site_css_handler))
            .route("/assets/tweet-theme.css", get(widget_css_handler))
            .route("/__livereload", get(ws_handler))
            .route("/__livereload.js", get(reload_script_handler))
            .with_state(state);

        tracing::info!("Starting dev server at http://{}", addr);

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

/// Handle file watch events.
async fn handle_watch_event(state: &Arc<RwLock<ServerState>>, event: WatchEvent) {
    let state = state.read().await;

    match event {
        WatchEvent::PageChanged(path) => {
            tracing::info!("Page modified: {}", path.display());
            state.hub.send(ReloadMessage::Reload);
        }

        WatchEvent::FixtureChanged(path) => {
            tracing::info!("Fixture modified: {}", path.display());
            // Pages render on request, so dropping the cache is enough.
            state.provider.invalidate();
            state.hub.send(ReloadMessage::Reload);
        }

        WatchEvent::Created(_) | WatchEvent::Deleted(_) | WatchEvent::Modified(_) => {
            state.provider.invalidate();
            state.hub.send(ReloadMessage::Reload);
        }
    }
}

/// A demo page discovered on disk.
struct PageEntry {
    slug: String,
    source: String,
    meta: Option<PageMeta>,
}

/// Scan the pages directory, sorted by frontmatter order.
fn scan_pages(dir: &std::path::Path) -> Vec<PageEntry> {
    let mut pages = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return pages,
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(_) => continue,
        };
        let meta = extract_meta(&source).ok().and_then(|(meta, _)| meta);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index")
            .to_string();
        let slug = meta
            .as_ref()
            .and_then(|m| m.slug.clone())
            .unwrap_or(stem);

        pages.push(PageEntry { slug, source, meta });
    }

    pages.sort_by_key(|page| page.meta.as_ref().and_then(|m| m.order).unwrap_or(999));
    pages
}

/// Render the page for a slug, or None if no page matches.
fn render_slug(state: &ServerState, slug: &str) -> Option<Result<String, String>> {
    let pages = scan_pages(&state.config.pages_dir);
    let page = pages.iter().find(|page| page.slug == slug)?;

    let rendered = match render_content(&page.source, state.provider.as_ref()) {
        Ok(rendered) => rendered,
        Err(e) => return Some(Err(e.to_string())),
    };

    let nav: Vec<NavItem> = pages
        .iter()
        .filter(|page| page.meta.as_ref().map(|m| m.nav).unwrap_or(true))
        .map(|page| NavItem {
            title: page
                .meta
                .as_ref()
                .map(|m| m.title.clone())
                .unwrap_or_else(|| page.slug.clone()),
            path: if page.slug == "index" {
                "/".to_string()
            } else {
                format!("/{}", page.slug)
            },
            active: page.slug == slug,
        })
        .collect();

    let ctx = PageContext {
        title: page
            .meta
            .as_ref()
            .map(|m| m.title.clone())
            .unwrap_or_else(|| page.slug.clone()),
        site_title: state.config.site_title.clone(),
        description: page.meta.as_ref().and_then(|m| m.description.clone()),
        content: rendered.html,
        nav,
        base_url: "/".to_string(),
        styles: vec![
            "/assets/site.css".to_string(),
            "/assets/tweet-theme.css".to_string(),
        ],
        scripts: vec!["/__livereload.js".to_string()],
    };

    Some(
        state
            .templates
            .render_page(&ctx)
            .map_err(|e| e.to_string()),
    )
}

async fn index_handler(State(state): State<Arc<RwLock<ServerState>>>) -> impl IntoResponse {
    serve_slug(state, "index").await
}

async fn page_handler(
    AxumPath(slug): AxumPath<String>,
    State(state): State<Arc<RwLock<ServerState>>>,
) -> impl IntoResponse {
    serve_slug(state, &slug).await
}

async fn serve_slug(state: Arc<RwLock<ServerState>>, slug: &str) -> impl IntoResponse {
    let state = state.read().await;

    match render_slug(&state, slug) {
        Some(Ok(html)) => (StatusCode::OK, Html(html)),
        Some(Err(e)) => {
            tracing::warn!("Failed to render {}: {}", slug, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<h1>Render error</h1><pre>{}</pre>", e)),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Html(format!(
                r#"<h1>Not found</h1><p>No page named "{}". <a href="/">Back to the gallery</a>.</p>"#,
                slug
            )),
        ),
    }
}

async fn site_css_handler() -> impl IntoResponse {
    ([("content-type", "text/css")], AssetPipeline::site_css())
}

async fn widget_css_handler() -> impl IntoResponse {
    ([("content-type", "text/css")], AssetPipeline::widget_css())
}

/// Handler for the live-reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RwLock<ServerState>>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<RwLock<ServerState>>) {
    let mut rx = {
        let state = state.read().await;
        state.hub.subscribe()
    };

    let msg = serde_json::to_string(&ReloadMessage::Connected).unwrap();
    if socket.send(Message::Text(msg.into())).await.is_err() {
        return;
    }

    while let Ok(reload_msg) = rx.recv().await {
        let json = serde_json::to_string(&reload_msg).unwrap();
        if socket.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }
}

/// Handler for the live-reload client script.
async fn reload_script_handler(
    State(state): State<Arc<RwLock<ServerState>>>,
) -> impl IntoResponse {
    let state = state.read().await;
    let url = format!(
        "ws://{}:{}/__livereload",
        state.config.host, state.config.port
    );
    (
        [("content-type", "application/javascript")],
        livereload_client_script(&url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn state_for(temp: &std::path::Path) -> ServerState {
        let pages = temp.join("pages");
        let fixtures = temp.join("fixtures");
        fs::create_dir_all(&pages).unwrap();
        fs::create_dir_all(&fixtures).unwrap();
        fs::write(
            fixtures.join("standard.json"),
            r#"{
                "id_str": "standard",
                "text": "served fresh",
                "user": { "name": "Vitrine", "screen_name": "vitrine" }
            }"#,
        )
        .unwrap();

        let config = DevServerConfig {
            pages_dir: pages,
            fixtures_dir: fixtures.clone(),
            ..Default::default()
        };

        ServerState {
            provider: Arc::new(FixtureProvider::new(&fixtures)),
            hub: ReloadHub::new(),
            templates: TemplateEngine::new(),
            config,
        }
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
    }

    #[test]
    fn renders_pages_on_request() {
        let temp = tempdir().unwrap();
        let state = state_for(temp.path());
        fs::write(
            state.config.pages_dir.join("index.md"),
            "---\ntitle: Gallery\n---\n\n```tweet isolated\nstandard\n```\n",
        )
        .unwrap();

        let html = render_slug(&state, "index").unwrap().unwrap();

        assert!(html.contains("<template shadowrootmode=\"open\">"));
        assert!(html.contains("served fresh"));
        assert!(html.contains(r#"<script src="/__livereload.js"></script>"#));
    }

    #[test]
    fn unknown_slugs_are_none() {
        let temp = tempdir().unwrap();
        let state = state_for(temp.path());

        assert!(render_slug(&state, "missing").is_none());
    }

    #[test]
    fn fixture_edits_show_up_after_invalidation() {
        let temp = tempdir().unwrap();
        let state = state_for(temp.path());
        fs::write(
            state.config.pages_dir.join("index.md"),
            "```tweet\nstandard\n```\n",
        )
        .unwrap();

        let before = render_slug(&state, "index").unwrap().unwrap();
        assert!(before.contains("served fresh"));

        fs::write(
            state.config.fixtures_dir.join("standard.json"),
            r#"{
                "id_str": "standard",
                "text": "edited fixture",
                "user": { "name": "Vitrine", "screen_name": "vitrine" }
            }"#,
        )
        .unwrap();
        state.provider.invalidate();

        let after = render_slug(&state, "index").unwrap().unwrap();
        assert!(after.contains("edited fixture"));
    }
}
