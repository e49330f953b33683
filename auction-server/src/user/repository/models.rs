#[cfg(test)]
use mockall::automock;
use {
    crate::{
        kernel::db::DB,
        user::entities,
    },
    axum::async_trait,
    sqlx::prelude::FromRow,
    std::fmt::Debug,
    tracing::instrument,
    uuid::Uuid,
};

#[derive(Clone, FromRow, Debug)]
pub struct User {
    pub id:   Uuid,
    pub name: String,
}

impl From<User> for entities::User {
    fn from(user: User) -> Self {
        Self {
            id:   user.id,
            name: user.name,
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn get_user(&self, user_id: entities::UserId) -> anyhow::Result<Option<entities::User>>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_get_user",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_user",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_user(&self, user_id: entities::UserId) -> anyhow::Result<Option<entities::User>> {
        let user: Option<User> = sqlx::query_as("SELECT id, name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self)
            .await
            .inspect_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(user_id = %user_id, "DB: Failed to fetch user: {}", e);
            })?;
        Ok(user.map(entities::User::from))
    }
}
