use {
    super::Service,
    crate::{
        api::RestError,
        user::entities,
    },
};

pub struct GetUserByIdInput {
    pub user_id: entities::UserId,
}

impl Service {
    pub async fn get_user_by_id(
        &self,
        input: GetUserByIdInput,
    ) -> Result<entities::User, RestError> {
        self.repo
            .get_user_by_id(input.user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, user_id = %input.user_id, "Failed to get user");
                RestError::TemporarilyUnavailable
            })?
            .ok_or(RestError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::user::repository::MockDatabase,
        anyhow::anyhow,
        mockall::predicate::eq,
        uuid::Uuid,
    };

    #[tokio::test]
    async fn test_get_user_by_id() {
        let user = entities::User {
            id:   Uuid::new_v4(),
            name: "Ada".to_string(),
        };
        let mut db = MockDatabase::default();
        db.expect_get_user().with(eq(user.id)).times(1).returning({
            let user = user.clone();
            move |_| Ok(Some(user.clone()))
        });
        let service = Service::new(db);

        let result = service
            .get_user_by_id(GetUserByIdInput { user_id: user.id })
            .await
            .unwrap();
        assert_eq!(result, user);
    }

    #[tokio::test]
    async fn test_get_user_by_id_not_found() {
        let mut db = MockDatabase::default();
        db.expect_get_user().times(1).returning(|_| Ok(None));
        let service = Service::new(db);

        let result = service
            .get_user_by_id(GetUserByIdInput {
                user_id: Uuid::new_v4(),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::UserNotFound);
    }

    #[tokio::test]
    async fn test_get_user_by_id_store_failure() {
        let mut db = MockDatabase::default();
        db.expect_get_user()
            .times(1)
            .returning(|_| Err(anyhow!("connection refused")));
        let service = Service::new(db);

        let result = service
            .get_user_by_id(GetUserByIdInput {
                user_id: Uuid::new_v4(),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::TemporarilyUnavailable);
    }
}
