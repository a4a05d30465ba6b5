//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod coffee_service;
pub mod container;
mod greeting_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use coffee_service::{CoffeeManager, CoffeeService};
pub use greeting_service::{Greeter, GreetingService};

#[cfg(any(test, feature = "test-utils"))]
pub use coffee_service::MockCoffeeService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
