use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::db::entity::alert;
use crate::error::Result;

pub struct AlertRepository {
    db: DatabaseConnection,
}

impl AlertRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, alert: alert::ActiveModel) -> Result<alert::Model> {
        let alert = alert.insert(&self.db).await?;
        Ok(alert)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<alert::Model>> {
        let alert = alert::Entity::find_by_id(id).one(&self.db).await?;
        Ok(alert)
    }

    /// All alerts owned by a user, oldest first
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<alert::Model>> {
        let alerts = alert::Entity
            ::find()
            .filter(alert::Column::UserId.eq(user_id))
            .order_by_asc(alert::Column::CreatedAt)
            .all(&self.db).await?;
        Ok(alerts)
    }

    pub async fn update(&self, alert: alert::ActiveModel) -> Result<alert::Model> {
        let alert = alert.update(&self.db).await?;
        Ok(alert)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = alert::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
