use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn mark_in_memory_pending_expiration_stuck(&self, auction_id: entities::AuctionId) {
        if let Some(pending_expiration) = self
            .in_memory_store
            .pending_expirations
            .lock()
            .await
            .get_mut(&auction_id)
        {
            pending_expiration.state = entities::ExpirationState::Stuck;
        }
    }
}
