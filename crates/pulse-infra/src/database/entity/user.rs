//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_name: String,
    // Uniqueness is checked at registration, not by the schema.
    #[sea_orm(indexed)]
    pub email: String,
    pub password_hash: String,
    pub session_secret: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for pulse_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name,
            email: model.email,
            password_hash: model.password_hash,
            session_secret: model.session_secret,
            created_at: model.created_at.into(),
        }
    }
}

impl From<pulse_core::domain::User> for ActiveModel {
    fn from(user: pulse_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            user_name: Set(user.user_name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            session_secret: Set(user.session_secret),
            created_at: Set(user.created_at.into()),
        }
    }
}
