use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub async fn get_auctions_by_status(
        &self,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<Vec<entities::Auction>> {
        self.db.get_auctions_by_status(status).await
    }
}
