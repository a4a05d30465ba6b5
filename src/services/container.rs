//! Service Container - Centralized service access.
//!
//! Builds every service once from shared infrastructure and hands out
//! trait objects, so handlers and resolvers depend on abstractions only.

use std::sync::Arc;

use super::{CoffeeManager, CoffeeService, Greeter, GreetingService};
use crate::config::Config;
use crate::infra::{CoffeeStore, EventBus};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get coffee service
    fn coffees(&self) -> Arc<dyn CoffeeService>;

    /// Get greeting service
    fn greetings(&self) -> Arc<dyn GreetingService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    coffee_service: Arc<dyn CoffeeService>,
    greeting_service: Arc<dyn GreetingService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(
        coffee_service: Arc<dyn CoffeeService>,
        greeting_service: Arc<dyn GreetingService>,
    ) -> Self {
        Self {
            coffee_service,
            greeting_service,
        }
    }

    /// Create service container from database connection, event bus and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        events: EventBus,
        config: &Config,
    ) -> Self {
        let repo = Arc::new(CoffeeStore::new(db));
        let coffee_service: Arc<dyn CoffeeService> = Arc::new(CoffeeManager::new(repo));
        let greeting_service = Arc::new(Greeter::new(
            coffee_service.clone(),
            events,
            config.environment,
        ));

        Self {
            coffee_service,
            greeting_service,
        }
    }
}

impl ServiceContainer for Services {
    fn coffees(&self) -> Arc<dyn CoffeeService> {
        self.coffee_service.clone()
    }

    fn greetings(&self) -> Arc<dyn GreetingService> {
        self.greeting_service.clone()
    }
}
