use std::{sync::OnceLock, time::Duration};

use reqwest::{
    Client,
    header::{CONNECTION, HeaderMap, HeaderValue},
};

/// Shared HTTP client so connections are reused across transcribers
///
/// The client carries no overall timeout. Each upload sets its own from
/// `TranscriptionConfig::timeout` when the request is built.
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| build_client().expect("Failed to build default HTTP client"))
        .clone()
}

fn build_client() -> reqwest::Result<Client> {
    let headers: HeaderMap = [(CONNECTION, HeaderValue::from_static("keep-alive"))].into_iter().collect();

    Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
}
