//! Application route configuration.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQL, GraphQLSubscription};
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Json},
    routing::{get, post_service},
    Router,
};
use serde::Serialize;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::coffee_routes;
use super::middleware::request_logging;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::ROOT_GREETING;
use crate::graphql::AppSchema;

const GRAPHQL_PATH: &str = "/graphql";

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    // Non-GraphQL endpoints get per-request logging; GraphQL traffic is covered by TraceLayer
    let rest = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/coffees", coffee_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_logging));

    Router::new()
        .merge(rest)
        .merge(graphql_routes(state.schema.clone()))
        // Global middleware
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GraphQL over HTTP POST, subscriptions over WebSocket on the same path
fn graphql_routes(schema: AppSchema) -> Router<AppState> {
    Router::new()
        .route(
            GRAPHQL_PATH,
            post_service(GraphQL::new(schema.clone()))
                .get_service(GraphQLSubscription::new(schema)),
        )
        .route("/playground", get(playground))
}

/// GraphiQL IDE
async fn playground() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(GRAPHQL_PATH)
            .subscription_endpoint(GRAPHQL_PATH)
            .finish(),
    )
}

/// Root endpoint
async fn root() -> &'static str {
    ROOT_GREETING
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    pubsub: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn from_result<E: ToString>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Health check endpoint with database and pub/sub connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ServiceStatus::from_result(state.database.ping().await);
    let pubsub = ServiceStatus::from_result(state.events.ping().await);

    let all_healthy = database.is_healthy() && pubsub.is_healthy();
    if !all_healthy {
        tracing::warn!("Health check degraded");
    }

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database, pubsub },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
