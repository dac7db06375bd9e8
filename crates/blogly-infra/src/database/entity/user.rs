//! User entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use blogly_core::domain::UserFields;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub first_name: String,
    #[sea_orm(column_type = "Text")]
    pub last_name: String,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Overwrite every editable column.
    pub fn apply(&mut self, fields: &UserFields) {
        self.first_name = Set(fields.first_name().to_owned());
        self.last_name = Set(fields.last_name().to_owned());
        self.image_url = Set(fields.image_url().to_owned());
    }
}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for blogly_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            image_url: model.image_url,
        }
    }
}

/// New row from validated fields; the id is assigned by the store.
impl From<&UserFields> for ActiveModel {
    fn from(fields: &UserFields) -> Self {
        let mut model = Self {
            id: NotSet,
            first_name: NotSet,
            last_name: NotSet,
            image_url: NotSet,
        };
        model.apply(fields);
        model
    }
}
