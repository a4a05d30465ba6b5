//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Publish/subscribe event delivery (in-process or Redis)

pub mod db;
pub mod pubsub;
pub mod repositories;

pub use db::{Database, Migrator};
pub use pubsub::{EventBus, MemoryPubSub, PubSub, RedisPubSub};
pub use repositories::{CoffeeRepository, CoffeeStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockCoffeeRepository;
