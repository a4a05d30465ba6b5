//! HTTP request handlers.

pub mod coffee_handler;

pub use coffee_handler::coffee_routes;
