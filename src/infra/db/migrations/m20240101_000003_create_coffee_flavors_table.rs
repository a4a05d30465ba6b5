//! Migration: Create the coffee <-> flavor join table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_coffees_table::Coffees;
use super::m20240101_000002_create_flavors_table::Flavors;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoffeeFlavors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CoffeeFlavors::CoffeeId).integer().not_null())
                    .col(ColumnDef::new(CoffeeFlavors::FlavorId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_coffee_flavors")
                            .col(CoffeeFlavors::CoffeeId)
                            .col(CoffeeFlavors::FlavorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coffee_flavors_coffee_id")
                            .from(CoffeeFlavors::Table, CoffeeFlavors::CoffeeId)
                            .to(Coffees::Table, Coffees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coffee_flavors_flavor_id")
                            .from(CoffeeFlavors::Table, CoffeeFlavors::FlavorId)
                            .to(Flavors::Table, Flavors::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookups (coffees carrying a flavor)
        manager
            .create_index(
                Index::create()
                    .name("idx_coffee_flavors_flavor_id")
                    .table(CoffeeFlavors::Table)
                    .col(CoffeeFlavors::FlavorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CoffeeFlavors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CoffeeFlavors {
    Table,
    CoffeeId,
    FlavorId,
}
