//! Group entity for SeaORM.

use sea_orm::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Group.
impl From<Model> for yatube_core::domain::Group {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            description: model.description,
        }
    }
}

/// Conversion from a not-yet-persisted group; the id stays unset so the
/// database sequence assigns it.
impl From<yatube_core::domain::NewGroup> for ActiveModel {
    fn from(group: yatube_core::domain::NewGroup) -> Self {
        Self {
            id: NotSet,
            title: Set(group.title),
            slug: Set(group.slug),
            description: Set(group.description),
        }
    }
}
