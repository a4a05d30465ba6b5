//! Coffee Fiddle - a coffee catalog served over REST and GraphQL
//!
//! The catalog (coffees tagged with flavors) is exposed both as REST
//! endpoints and as GraphQL queries/mutations. A small greeting feature
//! demonstrates GraphQL subscriptions over a swappable pub/sub backend.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and rules
//! - **services**: Application use cases
//! - **infra**: Database, repositories and pub/sub backends
//! - **api**: HTTP handlers, middleware, and routes
//! - **graphql**: Schema, resolvers and subscriptions
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod graphql;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Coffee, Flavor};
pub use errors::{AppError, AppResult};
pub use infra::{Database, EventBus};
