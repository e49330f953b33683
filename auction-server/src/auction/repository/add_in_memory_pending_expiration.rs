use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn add_in_memory_pending_expiration(
        &self,
        pending_expiration: entities::PendingExpiration,
    ) {
        self.in_memory_store
            .pending_expirations
            .lock()
            .await
            .insert(pending_expiration.auction_id, pending_expiration);
    }
}
