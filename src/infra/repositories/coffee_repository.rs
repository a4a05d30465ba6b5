//! Coffee repository backed by SeaORM.
//!
//! Coffees and flavors live in separate tables joined through
//! `coffee_flavors`. Writes touching more than one table run in a
//! single transaction.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use super::entities::coffee::{self, Entity as CoffeeEntity};
use super::entities::coffee_flavor::{self, Entity as CoffeeFlavorEntity};
use super::entities::flavor::{self, Entity as FlavorEntity};
use crate::domain::{Coffee, CoffeeChanges};
use crate::errors::AppResult;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Coffee repository trait for dependency injection.
///
/// Lookups return `None` for unknown ids; turning that into a
/// not-found failure is left to the service layer.
///
/// Flavors on a returned coffee are ordered by flavor id, i.e. by when
/// each flavor was first created anywhere in the catalog, not by the
/// order names were supplied.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CoffeeRepository: Send + Sync {
    /// List coffees ordered by id, with their flavors
    async fn list(&self, pagination: PaginationParams) -> AppResult<Vec<Coffee>>;

    /// Find a coffee by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Coffee>>;

    /// Insert a coffee, creating any flavor that does not exist yet
    async fn create(&self, name: String, brand: String, flavors: Vec<String>) -> AppResult<Coffee>;

    /// Apply changes; `changes.flavors` links additional flavors, never unlinks one
    async fn update(&self, id: i32, changes: CoffeeChanges) -> AppResult<Option<Coffee>>;

    /// Delete a coffee and return it as it was before deletion
    async fn delete(&self, id: i32) -> AppResult<Option<Coffee>>;
}

/// Concrete implementation of CoffeeRepository
pub struct CoffeeStore {
    db: DatabaseConnection,
}

impl CoffeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Commit on success, roll back (and log rollback failures) otherwise.
    async fn finish<T>(txn: DatabaseTransaction, result: Result<T, DbErr>) -> AppResult<T> {
        match result {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e.into())
            }
        }
    }

    async fn insert_rows(
        txn: &DatabaseTransaction,
        name: String,
        brand: String,
        flavors: &[String],
    ) -> Result<Coffee, DbErr> {
        let model = coffee::ActiveModel {
            name: Set(name),
            brand: Set(brand),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        attach_flavors(txn, model.id, flavors).await?;
        load_flavors(txn, model).await
    }

    async fn update_rows(
        txn: &DatabaseTransaction,
        id: i32,
        changes: CoffeeChanges,
    ) -> Result<Option<Coffee>, DbErr> {
        let Some(model) = CoffeeEntity::find_by_id(id).one(txn).await? else {
            return Ok(None);
        };

        let model = if changes.name.is_some() || changes.brand.is_some() {
            let mut active: coffee::ActiveModel = model.into();
            if let Some(name) = changes.name {
                active.name = Set(name);
            }
            if let Some(brand) = changes.brand {
                active.brand = Set(brand);
            }
            active.update(txn).await?
        } else {
            model
        };

        if let Some(flavors) = changes.flavors {
            attach_flavors(txn, id, &flavors).await?;
        }

        load_flavors(txn, model).await.map(Some)
    }

    async fn delete_rows(txn: &DatabaseTransaction, id: i32) -> Result<Option<Coffee>, DbErr> {
        let Some(model) = CoffeeEntity::find_by_id(id).one(txn).await? else {
            return Ok(None);
        };
        let coffee = load_flavors(txn, model).await?;

        CoffeeFlavorEntity::delete_many()
            .filter(coffee_flavor::Column::CoffeeId.eq(id))
            .exec(txn)
            .await?;
        CoffeeEntity::delete_by_id(id).exec(txn).await?;

        Ok(Some(coffee))
    }
}

#[async_trait]
impl CoffeeRepository for CoffeeStore {
    async fn list(&self, pagination: PaginationParams) -> AppResult<Vec<Coffee>> {
        let coffees = CoffeeEntity::find()
            .order_by_asc(coffee::Column::Id)
            .offset(pagination.offset())
            .limit(pagination.limit())
            .all(&self.db)
            .await?;

        let flavors = coffees
            .load_many_to_many(FlavorEntity, CoffeeFlavorEntity, &self.db)
            .await?;

        Ok(coffees
            .into_iter()
            .zip(flavors)
            .map(|(model, mut flavors)| {
                flavors.sort_by_key(|f| f.id);
                model.into_domain(flavors)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Coffee>> {
        match CoffeeEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(load_flavors(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, name: String, brand: String, flavors: Vec<String>) -> AppResult<Coffee> {
        let txn = self.db.begin().await?;
        let result = Self::insert_rows(&txn, name, brand, &flavors).await;
        let coffee = Self::finish(txn, result).await?;

        tracing::debug!(coffee_id = coffee.id, "Coffee created");
        Ok(coffee)
    }

    async fn update(&self, id: i32, changes: CoffeeChanges) -> AppResult<Option<Coffee>> {
        let txn = self.db.begin().await?;
        let result = Self::update_rows(&txn, id, changes).await;
        Self::finish(txn, result).await
    }

    async fn delete(&self, id: i32) -> AppResult<Option<Coffee>> {
        let txn = self.db.begin().await?;
        let result = Self::delete_rows(&txn, id).await;
        Self::finish(txn, result).await
    }
}

/// Fetch the flavors linked to `model` and build the domain entity.
async fn load_flavors<C: ConnectionTrait>(conn: &C, model: coffee::Model) -> Result<Coffee, DbErr> {
    let flavors = model
        .find_related(FlavorEntity)
        .order_by_asc(flavor::Column::Id)
        .all(conn)
        .await?;
    Ok(model.into_domain(flavors))
}

/// Find a flavor by name, creating it when missing.
async fn preload_flavor<C: ConnectionTrait>(conn: &C, name: &str) -> Result<flavor::Model, DbErr> {
    if let Some(existing) = FlavorEntity::find()
        .filter(flavor::Column::Name.eq(name))
        .one(conn)
        .await?
    {
        return Ok(existing);
    }

    flavor::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Link `coffee_id` to every named flavor. Links that already exist,
/// including ones committed concurrently, are kept as they are.
async fn attach_flavors<C: ConnectionTrait>(
    conn: &C,
    coffee_id: i32,
    names: &[String],
) -> Result<(), DbErr> {
    for name in names {
        let flavor = preload_flavor(conn, name).await?;
        let inserted = CoffeeFlavorEntity::insert(coffee_flavor::ActiveModel {
            coffee_id: Set(coffee_id),
            flavor_id: Set(flavor.id),
        })
        .on_conflict(
            OnConflict::columns([coffee_flavor::Column::CoffeeId, coffee_flavor::Column::FlavorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await;

        match inserted {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::infra::Database;

    async fn store() -> CoffeeStore {
        let db = Database::connect(&Config::for_tests()).await.unwrap();
        CoffeeStore::new(db.get_connection())
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn create_reuses_existing_flavors() {
        let store = store().await;

        let first = store
            .create("A".into(), "X".into(), names(&["chocolate", "vanilla"]))
            .await
            .unwrap();
        let second = store
            .create("B".into(), "Y".into(), names(&["vanilla", "caramel"]))
            .await
            .unwrap();

        let vanilla_first = first.flavors.iter().find(|f| f.name == "vanilla").unwrap();
        let vanilla_second = second.flavors.iter().find(|f| f.name == "vanilla").unwrap();
        assert_eq!(vanilla_first.id, vanilla_second.id);
        assert_eq!(FlavorEntity::find().all(&store.db).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_adds_links_and_fields() {
        let store = store().await;
        let coffee = store
            .create("A".into(), "X".into(), names(&["chocolate"]))
            .await
            .unwrap();

        let updated = store
            .update(
                coffee.id,
                CoffeeChanges {
                    brand: Some("Z".into()),
                    flavors: Some(names(&["yes", "chocolate"])),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.brand, "Z");
        assert_eq!(updated.flavor_names(), names(&["chocolate", "yes"]));
        assert_eq!(CoffeeFlavorEntity::find().all(&store.db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_updates_keep_every_added_flavor() {
        let store = store().await;
        let coffee = store
            .create("A".into(), "X".into(), names(&["base"]))
            .await
            .unwrap();

        let add = |name: &str| CoffeeChanges {
            flavors: Some(names(&[name])),
            ..Default::default()
        };
        let (left, right) = tokio::join!(
            store.update(coffee.id, add("x")),
            store.update(coffee.id, add("y")),
        );
        left.unwrap().unwrap();
        right.unwrap().unwrap();

        let mut stored = store.find_by_id(coffee.id).await.unwrap().unwrap().flavor_names();
        stored.sort();
        assert_eq!(stored, names(&["base", "x", "y"]));
    }

    #[tokio::test]
    async fn flavors_are_ordered_by_flavor_id() {
        let store = store().await;
        store
            .create("A".into(), "X".into(), names(&["vanilla"]))
            .await
            .unwrap();

        let second = store
            .create("B".into(), "X".into(), names(&["chocolate", "vanilla"]))
            .await
            .unwrap();

        assert_eq!(second.flavor_names(), names(&["vanilla", "chocolate"]));
    }

    #[tokio::test]
    async fn unknown_ids_yield_none() {
        let store = store().await;
        assert!(store.find_by_id(42).await.unwrap().is_none());
        assert!(store.update(42, CoffeeChanges::default()).await.unwrap().is_none());
        assert!(store.delete(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_keeps_flavors_but_drops_links() {
        let store = store().await;
        let coffee = store
            .create("A".into(), "X".into(), names(&["chocolate"]))
            .await
            .unwrap();

        let deleted = store.delete(coffee.id).await.unwrap().unwrap();
        assert_eq!(deleted, coffee);
        assert!(store.find_by_id(coffee.id).await.unwrap().is_none());
        assert_eq!(CoffeeFlavorEntity::find().all(&store.db).await.unwrap().len(), 0);
        assert_eq!(FlavorEntity::find().all(&store.db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_paginates_coffees_not_rows() {
        let store = store().await;
        for i in 0..3 {
            store
                .create(format!("C{}", i), "X".into(), names(&["a", "b", "c"]))
                .await
                .unwrap();
        }

        let page = store
            .list(PaginationParams {
                limit: Some(2),
                offset: Some(1),
            })
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "C1");
        assert_eq!(page[1].name, "C2");
        assert!(page.iter().all(|c| c.flavors.len() == 3));
    }
}
