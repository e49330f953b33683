use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Returns the removed entry. The caller that gets `Some` owns the release of the slot.
    pub async fn remove_in_memory_pending_expiration(
        &self,
        auction_id: entities::AuctionId,
    ) -> Option<entities::PendingExpiration> {
        self.in_memory_store
            .pending_expirations
            .lock()
            .await
            .remove(&auction_id)
    }
}
