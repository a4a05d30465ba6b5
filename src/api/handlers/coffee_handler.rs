//! Coffee catalog handlers.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;

use crate::api::extractors::{Protocol, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Coffee, CreateCoffee, UpdateCoffee};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, Created, PaginationParams};

type CoffeeId = WithRejection<Path<i32>, AppError>;

/// Create coffee routes
pub fn coffee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_coffees).post(create_coffee))
        .route(
            "/{id}",
            get(get_coffee).patch(update_coffee).delete(delete_coffee),
        )
}

/// List coffees
#[utoipa::path(
    get,
    path = "/coffees",
    tag = "Coffees",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of coffees ordered by id", body = [Coffee]),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_coffees(
    State(state): State<AppState>,
    Protocol(protocol): Protocol,
    WithRejection(Query(pagination), _): WithRejection<Query<PaginationParams>, AppError>,
) -> AppResult<ApiResponse<Vec<Coffee>>> {
    tracing::debug!(%protocol, ?pagination, "Listing coffees");

    let coffees = state.coffee_service.find_all(pagination).await?;
    Ok(ApiResponse::new(coffees))
}

/// Get coffee by ID
#[utoipa::path(
    get,
    path = "/coffees/{id}",
    tag = "Coffees",
    params(("id" = i32, Path, description = "Coffee ID")),
    responses(
        (status = 200, description = "Coffee found", body = Coffee),
        (status = 404, description = "Coffee not found")
    )
)]
pub async fn get_coffee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): CoffeeId,
) -> AppResult<ApiResponse<Coffee>> {
    let coffee = state.coffee_service.find_one(id).await?;
    Ok(ApiResponse::new(coffee))
}

/// Create a coffee
#[utoipa::path(
    post,
    path = "/coffees",
    tag = "Coffees",
    request_body = CreateCoffee,
    responses(
        (status = 201, description = "Coffee created", body = Coffee),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_coffee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCoffee>,
) -> AppResult<Created<Coffee>> {
    let coffee = state.coffee_service.create(payload).await?;
    tracing::info!(coffee_id = coffee.id, "Coffee created");
    Ok(Created(coffee))
}

/// Update a coffee
///
/// Supplied flavors are merged into the existing ones.
#[utoipa::path(
    patch,
    path = "/coffees/{id}",
    tag = "Coffees",
    params(("id" = i32, Path, description = "Coffee ID")),
    request_body = UpdateCoffee,
    responses(
        (status = 200, description = "Coffee updated", body = Coffee),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Coffee not found")
    )
)]
pub async fn update_coffee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): CoffeeId,
    ValidatedJson(payload): ValidatedJson<UpdateCoffee>,
) -> AppResult<ApiResponse<Coffee>> {
    let coffee = state.coffee_service.update(id, payload).await?;
    Ok(ApiResponse::new(coffee))
}

/// Delete a coffee
#[utoipa::path(
    delete,
    path = "/coffees/{id}",
    tag = "Coffees",
    params(("id" = i32, Path, description = "Coffee ID")),
    responses(
        (status = 200, description = "Coffee deleted, returns the removed record", body = Coffee),
        (status = 404, description = "Coffee not found")
    )
)]
pub async fn delete_coffee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): CoffeeId,
) -> AppResult<ApiResponse<Coffee>> {
    let coffee = state.coffee_service.remove(id).await?;
    tracing::info!(coffee_id = id, "Coffee deleted");
    Ok(ApiResponse::new(coffee))
}
