//! Coffee database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Coffee, Flavor};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "coffees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub brand: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coffee_flavor::Entity")]
    CoffeeFlavor,
}

impl Related<super::coffee_flavor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoffeeFlavor.def()
    }
}

impl Related<super::flavor::Entity> for Entity {
    fn to() -> RelationDef {
        super::coffee_flavor::Relation::Flavor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coffee_flavor::Relation::Coffee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain entity from the row and its loaded flavors
    pub fn into_domain(self, flavors: Vec<super::flavor::Model>) -> Coffee {
        Coffee {
            id: self.id,
            name: self.name,
            brand: self.brand,
            flavors: flavors.into_iter().map(Flavor::from).collect(),
        }
    }
}
