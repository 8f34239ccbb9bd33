//! Product catalog table.

use sea_orm::entity::prelude::*;

use crate::domain::{Category, Product};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Product {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let category = Category::parse(&model.category).ok_or_else(|| {
            AppError::internal(format!(
                "product {} has unknown category {:?}",
                model.id, model.category
            ))
        })?;
        Ok(Product {
            id: model.id,
            name: model.name,
            price: model.price,
            category,
            description: model.description,
            image: model.image,
            created_date: model.created_date,
        })
    }
}
