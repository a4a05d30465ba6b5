//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for exploring the REST side of the service.
//! The GraphQL schema is browsable in the playground instead.

use utoipa::OpenApi;

use crate::api::handlers::coffee_handler;
use crate::domain::{Coffee, CreateCoffee, Flavor, UpdateCoffee};

/// OpenAPI documentation for Coffee Fiddle
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coffee Fiddle",
        version = "0.1.0",
        description = "Coffee catalog served over REST and GraphQL",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        coffee_handler::list_coffees,
        coffee_handler::get_coffee,
        coffee_handler::create_coffee,
        coffee_handler::update_coffee,
        coffee_handler::delete_coffee,
    ),
    components(
        schemas(Coffee, Flavor, CreateCoffee, UpdateCoffee)
    ),
    tags(
        (name = "Coffees", description = "Coffee catalog operations")
    )
)]
pub struct ApiDoc;
