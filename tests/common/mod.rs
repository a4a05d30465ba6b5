//! Shared helpers for integration tests.
//!
//! Every test app runs against its own in-memory SQLite database with
//! migrations applied and the in-process event bus.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use coffee_fiddle::config::{Config, MEMORY_PUBSUB_CAPACITY};
use coffee_fiddle::infra::{Database, EventBus, MemoryPubSub};
use coffee_fiddle::{create_router, AppState};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub pubsub: Arc<MemoryPubSub>,
}

pub async fn spawn_app() -> TestApp {
    let config = Config::for_tests();
    let database = Arc::new(
        Database::connect(&config)
            .await
            .expect("in-memory database should start"),
    );
    let pubsub = Arc::new(MemoryPubSub::new(MEMORY_PUBSUB_CAPACITY));
    let events = EventBus::new(pubsub.clone());

    let state = AppState::from_config(database, events, &config);
    let router = create_router(state.clone());

    TestApp {
        router,
        state,
        pubsub,
    }
}

impl TestApp {
    /// Send a request and return the status with the body parsed as JSON
    /// (`Value::Null` for empty or non-JSON bodies).
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(method, uri, body).await;
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    /// Run a GraphQL operation over HTTP POST /graphql.
    pub async fn graphql(&self, query: &str, variables: Value) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/graphql",
                Some(serde_json::json!({ "query": query, "variables": variables })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "graphql transport failed: {}", body);
        body
    }
}

/// Flavor names of a serialized coffee, sorted for order-insensitive checks.
pub fn flavor_names(coffee: &Value) -> Vec<String> {
    let mut names: Vec<String> = coffee["flavors"]
        .as_array()
        .expect("flavors should be an array")
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}
