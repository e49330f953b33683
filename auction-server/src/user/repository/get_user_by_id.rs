use {
    super::Repository,
    crate::user::entities,
};

impl Repository {
    pub async fn get_user_by_id(
        &self,
        user_id: entities::UserId,
    ) -> anyhow::Result<Option<entities::User>> {
        self.db.get_user(user_id).await
    }
}
