//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::graphql::{build_schema, AppSchema};
use crate::infra::{Database, EventBus};
use crate::services::{CoffeeService, ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Coffee catalog service
    pub coffee_service: Arc<dyn CoffeeService>,
    /// Event bus, kept for health checks
    pub events: EventBus,
    /// Database connection
    pub database: Arc<Database>,
    /// GraphQL schema wired to the same services
    pub schema: AppSchema,
    /// Upper bound for a single request
    pub request_timeout: Duration,
}

impl AppState {
    /// Create application state from database connection, event bus and config.
    pub fn from_config(database: Arc<Database>, events: EventBus, config: &Config) -> Self {
        let services = Services::from_connection(database.get_connection(), events.clone(), config);
        Self::new(&services, events, database, config.request_timeout())
    }

    /// Create application state from an already built service container.
    pub fn new(
        services: &dyn ServiceContainer,
        events: EventBus,
        database: Arc<Database>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            coffee_service: services.coffees(),
            events,
            database,
            schema: build_schema(services),
            request_timeout,
        }
    }
}
