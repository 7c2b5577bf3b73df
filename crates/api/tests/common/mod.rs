//! Common test utilities for integration tests.
//!
//! The app is wired to an in-memory employee store, so these tests run
//! without a database.

// Helpers are shared across test binaries; not every binary uses all of them.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use employee_api::{
    app::create_app,
    config::{Config, LoggingConfig, SecurityConfig, ServerConfig},
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use persistence::db::DatabaseConfig;
use persistence::repositories::EmployeeRepository;
use persistence::store::InMemoryEmployeeStore;
use std::sync::Arc;
use tower::ServiceExt;

/// Test configuration. The database url is never dialed.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Use random port
            request_timeout_secs: 30,
            max_body_size: 1048576,
        },
        database: DatabaseConfig::with_url("postgres://unused@localhost:5432/unused"),
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            cors_origins: vec![],
            hsts_enabled: false,
        },
    }
}

/// Create the application over a fresh in-memory store.
pub fn create_test_app(config: Config) -> Router {
    let repository = EmployeeRepository::new(Arc::new(InMemoryEmployeeStore::new()));
    create_app(config, repository)
}

/// Test employee payload with fake but unique-looking data.
pub struct TestEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl TestEmployee {
    pub fn new() -> Self {
        Self {
            name: Name().fake(),
            email: SafeEmail().fake(),
            department: "TI".to_string(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = department.to_string();
        self
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "email": self.email,
            "department": self.department,
        })
    }
}

/// Create an employee via the API and return the response body.
pub async fn create_test_employee(app: &Router, employee: &TestEmployee) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/employee", employee.to_json()))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    parse_response_body(response).await
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    raw_request(method, uri, "application/json", serde_json::to_string(&body).unwrap())
}

/// Build a request with an arbitrary content type and raw body.
pub fn raw_request(
    method: Method,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    empty_request(Method::GET, uri)
}

/// Build a DELETE request.
pub fn delete_request(uri: &str) -> Request<Body> {
    empty_request(Method::DELETE, uri)
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Parse a response body as JSON.
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}
