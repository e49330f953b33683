use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_auction_by_id(
        &self,
        auction_id: entities::AuctionId,
    ) -> anyhow::Result<Option<entities::Auction>> {
        self.db.get_auction(auction_id).await
    }
}
