use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct GetAuctionByIdInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Lookup used by bid acceptance: current status and scheduled close time.
    pub async fn get_auction_by_id(
        &self,
        input: GetAuctionByIdInput,
    ) -> Result<entities::Auction, RestError> {
        self.repo
            .get_auction_by_id(input.auction_id)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, auction_id = %input.auction_id, "Failed to get auction");
                RestError::TemporarilyUnavailable
            })?
            .ok_or(RestError::AuctionNotFound)
    }
}
