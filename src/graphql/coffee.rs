//! Coffee CRUD over GraphQL.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};
use validator::Validate;

use crate::domain::{Coffee, CreateCoffee, UpdateCoffee};
use crate::errors::AppError;
use crate::services::CoffeeService;
use crate::types::PaginationParams;

fn coffees<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn CoffeeService>> {
    ctx.data::<Arc<dyn CoffeeService>>()
}

fn validated<T: Validate>(input: T) -> Result<T> {
    input
        .validate()
        .map_err(|e| AppError::from(e).extend())?;
    Ok(input)
}

#[derive(Default)]
pub struct CoffeeQuery;

#[Object]
impl CoffeeQuery {
    /// Coffees ordered by id
    async fn coffees(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(minimum = 0))] limit: Option<i32>,
        #[graphql(validator(minimum = 0))] offset: Option<i32>,
    ) -> Result<Vec<Coffee>> {
        let pagination = PaginationParams {
            limit: limit.map(|v| v as u64),
            offset: offset.map(|v| v as u64),
        };
        coffees(ctx)?
            .find_all(pagination)
            .await
            .map_err(|e| e.extend())
    }

    async fn coffee(&self, ctx: &Context<'_>, id: i32) -> Result<Coffee> {
        coffees(ctx)?.find_one(id).await.map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct CoffeeMutation;

#[Object]
impl CoffeeMutation {
    async fn create_coffee(
        &self,
        ctx: &Context<'_>,
        create_coffee_input: CreateCoffee,
    ) -> Result<Coffee> {
        let input = validated(create_coffee_input)?;
        coffees(ctx)?.create(input).await.map_err(|e| e.extend())
    }

    /// Supplied flavors are added to the existing ones
    async fn update_coffee(
        &self,
        ctx: &Context<'_>,
        id: i32,
        update_coffee_input: UpdateCoffee,
    ) -> Result<Coffee> {
        let input = validated(update_coffee_input)?;
        coffees(ctx)?.update(id, input).await.map_err(|e| e.extend())
    }

    /// Returns the coffee as it was before removal
    async fn remove_coffee(&self, ctx: &Context<'_>, id: i32) -> Result<Coffee> {
        coffees(ctx)?.remove(id).await.map_err(|e| e.extend())
    }
}
