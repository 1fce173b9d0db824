pub mod adapters;
mod app;
mod assets;
pub mod config;
pub mod i18n;
pub mod location;
pub mod outage;
pub mod ports;
pub mod push;
mod state;
mod templates;
pub mod types;

use std::net::SocketAddr;

pub use app::app;
pub use push::{VapidCredentials, generate_vapid_credentials};

pub async fn serve(addr: SocketAddr, config: config::AppConfig) {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app(config)).await.expect("server error");
}
