use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_in_memory_pending_expiration(
        &self,
        auction_id: entities::AuctionId,
    ) -> Option<entities::PendingExpiration> {
        self.in_memory_store
            .pending_expirations
            .lock()
            .await
            .get(&auction_id)
            .copied()
    }
}
