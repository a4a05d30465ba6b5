//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod coffee_repository;
pub(crate) mod entities;

pub use coffee_repository::{CoffeeRepository, CoffeeStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use coffee_repository::MockCoffeeRepository;
