use sea_orm::{
    ActiveModelTrait,
    ActiveValue,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
};
use chrono::Utc;
use uuid::Uuid;

use crate::db::entity::user;
use crate::error::{ AppError, Result };

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a user. A unique-index violation on `email` is reported as
    /// `AppError::UserExists` so concurrent registrations cannot both win.
    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String
    ) -> Result<user::Model> {
        let user = user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name),
            email: ActiveValue::Set(email),
            password_hash: ActiveValue::Set(password_hash),
            created_at: ActiveValue::Set(Utc::now()),
        };

        user.insert(&self.db).await.map_err(|e| {
            match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => AppError::UserExists,
                _ => AppError::Database(e),
            }
        })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let user = user::Entity
            ::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db).await?;
        Ok(user)
    }
}
