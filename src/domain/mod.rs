//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod coffee;
pub mod greeting;

pub use coffee::{
    normalize_flavor_names, Coffee, CoffeeChanges, CreateCoffee, Flavor, UpdateCoffee,
};
pub use greeting::{GreetingOutput, MessageInput};
