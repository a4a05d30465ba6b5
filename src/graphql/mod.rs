//! GraphQL schema.
//!
//! Queries and mutations are served over HTTP POST, subscriptions over
//! WebSocket on the same path.

mod coffee;
mod greeting;

use async_graphql::{MergedObject, Schema};

use crate::services::ServiceContainer;

pub use coffee::{CoffeeMutation, CoffeeQuery};
pub use greeting::{GreetingQuery, GreetingSubscription};

#[derive(MergedObject, Default)]
pub struct QueryRoot(CoffeeQuery, GreetingQuery);

pub type AppSchema = Schema<QueryRoot, CoffeeMutation, GreetingSubscription>;

/// Build the schema with every service available to resolvers.
pub fn build_schema(services: &dyn ServiceContainer) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        CoffeeMutation::default(),
        GreetingSubscription::default(),
    )
    .data(services.coffees())
    .data(services.greetings())
    .finish()
}
