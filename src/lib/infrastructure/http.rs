//! HTTP Server

use std::{
    net::{Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::{Context, Result};
use axum::{extract::Request, Router};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use clap::Parser;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer};
use tracing::{debug, info, info_span};

use crate::domain::order_mail::OrderMailService;

use handlers::{panic_handler, v1};
use state::AppState;

mod errors;
mod handlers;
mod open_api;
mod state;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(long, env = "HTTP_PORT", default_value = "3000")]
    pub http_port: u16,

    /// PEM certificate, serves HTTPS when given together with `key_path`
    #[arg(long, env = "TLS_CERT_PATH", requires = "key_path")]
    pub cert_path: Option<String>,

    /// PEM private key
    #[arg(long, env = "TLS_KEY_PATH", requires = "cert_path")]
    pub key_path: Option<String>,
}

/// The application's HTTP(S) server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    address: SocketAddr,
    tls_config: Option<RustlsConfig>,
}

impl HttpServer {
    /// Returns a new server for `order_mail` bound to the port specified in `config`.
    pub async fn new(order_mail: impl OrderMailService, config: HttpServerConfig) -> Result<Self> {
        let tls_config = match (&config.cert_path, &config.key_path) {
            (Some(cert_path), Some(key_path)) => Some(
                RustlsConfig::from_pem_file(cert_path, key_path)
                    .await
                    .context("failed to load TLS config")?,
            ),
            _ => None,
        };

        Ok(Self {
            router: router(AppState::new(order_mail)),
            address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.http_port)),
            tls_config,
        })
    }

    /// Runs the server until a shutdown signal is received.
    #[mutants::skip]
    pub async fn run(self) -> Result<()> {
        let handle = Handle::new();

        tokio::spawn(shutdown_signal(handle.clone()));

        let service = self.router.into_make_service();

        match self.tls_config {
            Some(tls_config) => {
                info!("HTTPS server listening on {}", self.address);

                axum_server::bind_rustls(self.address, tls_config)
                    .handle(handle)
                    .serve(service)
                    .await
            }
            None => {
                info!("HTTP server listening on {}", self.address);

                axum_server::bind(self.address)
                    .handle(handle)
                    .serve(service)
                    .await
            }
        }
        .context("server error")?;

        info!("server stopped");

        Ok(())
    }
}

/// Create the application's router
pub fn router<S: OrderMailService>(state: AppState<S>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    Router::new()
        .nest("/api/v1", v1::router())
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::custom(panic_handler))
        .with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    debug!("shutting down gracefully");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
