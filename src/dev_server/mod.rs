//! Development and preview server
//!
//! Serves the built frontend and forwards API prefixes (by default `/api`)
//! to the backend, so browser-side calls stay same-origin.

pub mod proxy;

use std::path::Path;
use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use crate::config::DevServerConfig;
use crate::utils::errors::{ProjectHubError, Result};

pub use proxy::{ProxyRule, ProxyRules, ProxyState};

/// Which port a server instance binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    Dev,
    Preview,
}

/// Development server built from [`DevServerConfig`]
#[derive(Debug, Clone)]
pub struct DevServer {
    config: DevServerConfig,
    mode: ServeMode,
    state: ProxyState,
}

impl DevServer {
    pub fn new(config: DevServerConfig, mode: ServeMode) -> Result<Self> {
        let state = ProxyState::new(ProxyRules::from_config(&config.proxy))?;
        Ok(Self { config, mode, state })
    }

    pub fn port(&self) -> u16 {
        match self.mode {
            ServeMode::Dev => self.config.port,
            ServeMode::Preview => self.config.preview_port,
        }
    }

    /// Build the router
    ///
    /// A single fallback handles every request: paths covered by a proxy rule
    /// are forwarded, the rest are served from the build directory.
    pub fn router(&self) -> Router {
        let static_dir = Path::new(&self.config.static_dir);
        let assets = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

        Router::new()
            .fallback(dispatch)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .with_state(AppState {
                proxy: self.state.clone(),
                assets,
            })
    }

    /// Bind the configured host and port and serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.port());
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        if self.config.clear_screen {
            print!("\x1b[2J\x1b[H");
        }

        let addr = listener.local_addr()?;
        for rule in self.state.rules().iter() {
            info!(prefix = %rule.prefix, target = %rule.target, "Proxy rule active");
        }
        info!(mode = ?self.mode, static_dir = %self.config.static_dir, "ProjectHub dev server listening on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ProjectHubError::Io)
    }
}

#[derive(Clone)]
struct AppState {
    proxy: ProxyState,
    assets: ServeDir<ServeFile>,
}

async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let req = match state.proxy.dispatch(req).await {
        Ok(response) => return response,
        Err(req) => req,
    };

    match state.assets.oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_follows_mode() {
        let mut config = DevServerConfig::default();
        config.preview_port = 4173;

        let dev = DevServer::new(config.clone(), ServeMode::Dev).unwrap();
        let preview = DevServer::new(config, ServeMode::Preview).unwrap();
        assert_eq!(dev.port(), 3000);
        assert_eq!(preview.port(), 4173);
    }

    #[test]
    fn test_router_accepts_route_syntax_in_prefixes() {
        let mut config = DevServerConfig::default();
        config.proxy.insert("/api/:version".to_string(), "http://localhost:9000".to_string());
        config.proxy.insert("/files/*path".to_string(), "http://localhost:9001".to_string());
        config.proxy.insert("/{tenant}".to_string(), "http://localhost:9002".to_string());

        let server = DevServer::new(config, ServeMode::Dev).unwrap();
        let _router = server.router();
    }
}
