//! Coffee service - CRUD use cases for the coffee catalog.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{normalize_flavor_names, Coffee, CoffeeChanges, CreateCoffee, UpdateCoffee};
use crate::errors::{AppResult, OptionExt};
use crate::infra::CoffeeRepository;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const COFFEE: &str = "Coffee";

/// Coffee service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CoffeeService: Send + Sync {
    /// List coffees
    async fn find_all(&self, pagination: PaginationParams) -> AppResult<Vec<Coffee>>;

    /// Get coffee by ID
    async fn find_one(&self, id: i32) -> AppResult<Coffee>;

    /// Create a coffee, upserting its flavors
    async fn create(&self, input: CreateCoffee) -> AppResult<Coffee>;

    /// Partially update a coffee; supplied flavors are merged into the existing ones
    async fn update(&self, id: i32, input: UpdateCoffee) -> AppResult<Coffee>;

    /// Delete a coffee, returning the removed record
    async fn remove(&self, id: i32) -> AppResult<Coffee>;
}

/// Concrete implementation of CoffeeService.
pub struct CoffeeManager {
    repo: Arc<dyn CoffeeRepository>,
}

impl CoffeeManager {
    pub fn new(repo: Arc<dyn CoffeeRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CoffeeService for CoffeeManager {
    async fn find_all(&self, pagination: PaginationParams) -> AppResult<Vec<Coffee>> {
        self.repo.list(pagination).await
    }

    async fn find_one(&self, id: i32) -> AppResult<Coffee> {
        self.repo.find_by_id(id).await?.ok_or_not_found(COFFEE, id)
    }

    async fn create(&self, input: CreateCoffee) -> AppResult<Coffee> {
        let flavors = normalize_flavor_names(&input.flavors);
        self.repo.create(input.name, input.brand, flavors).await
    }

    async fn update(&self, id: i32, input: UpdateCoffee) -> AppResult<Coffee> {
        // Merging happens in the repository transaction, against the stored links
        let changes = CoffeeChanges {
            name: input.name,
            brand: input.brand,
            flavors: input.flavors.map(normalize_flavor_names),
        };

        self.repo.update(id, changes).await?.ok_or_not_found(COFFEE, id)
    }

    async fn remove(&self, id: i32) -> AppResult<Coffee> {
        self.repo.delete(id).await?.ok_or_not_found(COFFEE, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Flavor;
    use crate::errors::AppError;
    use crate::infra::MockCoffeeRepository;
    use mockall::predicate::{always, eq};

    fn coffee(id: i32, flavors: &[&str]) -> Coffee {
        Coffee {
            id,
            name: "Shipwreck Roast".to_string(),
            brand: "Buddy Brew".to_string(),
            flavors: flavors
                .iter()
                .enumerate()
                .map(|(i, name)| Flavor {
                    id: i as i32 + 1,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn find_one_not_found_uses_template() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_find_by_id().with(eq(9)).returning(|_| Ok(None));

        let service = CoffeeManager::new(Arc::new(repo));
        let err = service.find_one(9).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Coffee with ID #9 was not found");
    }

    #[tokio::test]
    async fn create_deduplicates_flavor_names() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_create()
            .withf(|name, brand, flavors| {
                name == "Shipwreck Roast"
                    && brand == "Buddy Brew"
                    && flavors == &vec!["chocolate".to_string(), "vanilla".to_string()]
            })
            .returning(|_, _, _| Ok(coffee(1, &["chocolate", "vanilla"])));

        let service = CoffeeManager::new(Arc::new(repo));
        let created = service
            .create(CreateCoffee {
                name: "Shipwreck Roast".to_string(),
                brand: "Buddy Brew".to_string(),
                flavors: names(&["chocolate", "vanilla", "chocolate"]),
            })
            .await
            .unwrap();

        assert_eq!(created.flavors.len(), 2);
    }

    #[tokio::test]
    async fn update_hands_only_incoming_flavors_to_repository() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_find_by_id().never();
        repo.expect_update()
            .withf(|id, changes| {
                *id == 1
                    && changes.name.is_none()
                    && changes.flavors == Some(vec!["yes".to_string(), "vanilla".to_string()])
            })
            .returning(|id, _| Ok(Some(coffee(id, &["chocolate", "vanilla", "yes"]))));

        let service = CoffeeManager::new(Arc::new(repo));
        let updated = service
            .update(
                1,
                UpdateCoffee {
                    flavors: Some(names(&[" yes", "vanilla", "yes"])),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.flavor_names(), names(&["chocolate", "vanilla", "yes"]));
    }

    #[tokio::test]
    async fn update_without_flavors_passes_none() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_update()
            .withf(|_, changes| changes.flavors.is_none() && changes.brand.as_deref() == Some("X"))
            .returning(|id, _| Ok(Some(coffee(id, &[]))));

        let service = CoffeeManager::new(Arc::new(repo));
        let result = service
            .update(
                3,
                UpdateCoffee {
                    brand: Some("X".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_unknown_coffee_fails() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_update().with(eq(4), always()).returning(|_, _| Ok(None));

        let service = CoffeeManager::new(Arc::new(repo));
        let err = service
            .update(
                4,
                UpdateCoffee {
                    flavors: Some(names(&["a"])),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Coffee with ID #4 was not found");
    }

    #[tokio::test]
    async fn remove_returns_deleted_coffee() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_delete()
            .with(eq(2))
            .returning(|id| Ok(Some(coffee(id, &["chocolate"]))));
        repo.expect_delete().with(eq(5)).returning(|_| Ok(None));

        let service = CoffeeManager::new(Arc::new(repo));
        assert_eq!(service.remove(2).await.unwrap().id, 2);
        assert!(matches!(service.remove(5).await, Err(AppError::NotFound(_))));
    }
}
