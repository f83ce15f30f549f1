//! Common test utilities for integration tests.
//!
//! Integration tests run the whole router against an in-memory SQLite
//! database, one pooled connection per test so the database lives as
//! long as the pool.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use portfolio_api::{app::create_app, config::Config};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;

/// Create an in-memory test database with the schema applied.
pub async fn create_test_pool() -> SqlitePool {
    let config = persistence::db::DatabaseConfig {
        engine: "sqlite".to_string(),
        name: ":memory:".to_string(),
        user: String::new(),
        password: String::new(),
        host: String::new(),
        port: String::new(),
        // One connection: every handle sees the same in-memory database.
        max_connections: 1,
    };
    let pool = persistence::db::create_pool(&config)
        .await
        .expect("Failed to create test pool");
    sqlx::migrate!("../persistence/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Build a configuration from explicit environment pairs.
pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let mut env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.entry("EMAIL_BACKEND".to_string())
        .or_insert_with(|| "console".to_string());
    Config::from_env_map(&env, PathBuf::from("/tmp/portfolio-test")).expect("test config")
}

/// Debug-mode configuration: host checks and HSTS off.
pub fn debug_config() -> Config {
    test_config(&[("DEBUG", "True")])
}

/// Production-mode configuration allowing `example.com`.
pub fn production_config() -> Config {
    test_config(&[("DEBUG", "False"), ("ALLOWED_HOSTS", "example.com")])
}

pub fn create_test_app(config: Config, pool: SqlitePool) -> Router {
    create_app(config, pool).expect("Failed to build app")
}

/// GET request with a localhost Host header.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("host", "localhost")
        .body(Body::empty())
        .unwrap()
}

/// JSON request with a localhost Host header.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("host", "localhost")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read and parse a JSON response body.
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}
