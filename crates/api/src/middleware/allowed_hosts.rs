//! Host header validation middleware.
//!
//! In debug mode every host is accepted. Otherwise the request Host
//! header, with any port stripped, must match one of the configured
//! allowed hosts or the request is rejected with 400.
//!
//! An entry of `*` matches any host, and an entry with a leading dot
//! such as `.example.com` matches the domain and all of its subdomains.
//! Entries are compared case-insensitively; they are otherwise taken
//! exactly as configured, including any stray whitespace.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::Config;

pub async fn allowed_hosts_middleware(
    State(config): State<Arc<Config>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if config.debug {
        return next.run(req).await;
    }

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(strip_port);

    let allowed = match host {
        Some(host) => host_is_allowed(host, &config.allowed_hosts),
        None => false,
    };

    if !allowed {
        tracing::warn!(
            host = host.unwrap_or("<missing>"),
            "Rejected request with disallowed Host header"
        );
        return (StatusCode::BAD_REQUEST, "Invalid Host header").into_response();
    }

    next.run(req).await
}

/// Strip a trailing `:port` from a host value. IPv6 literals keep their
/// brackets.
fn strip_port(host: &str) -> &str {
    if let Some(end) = host.rfind(']') {
        // [::1]:8000 -> [::1]
        return &host[..=end];
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

fn host_is_allowed(host: &str, allowed: &[String]) -> bool {
    let host = host.to_ascii_lowercase();
    allowed.iter().any(|entry| {
        let entry = entry.to_ascii_lowercase();
        if entry == "*" {
            return true;
        }
        if let Some(domain) = entry.strip_prefix('.') {
            return host == domain || host.ends_with(&entry);
        }
        host == entry
    })
}
