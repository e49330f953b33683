use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct GetAuctionsInput {
    pub status: entities::AuctionStatus,
}

impl Service {
    pub async fn get_auctions(
        &self,
        input: GetAuctionsInput,
    ) -> Result<Vec<entities::Auction>, RestError> {
        self.repo
            .get_auctions_by_status(input.status)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, status = %input.status, "Failed to get auctions");
                RestError::TemporarilyUnavailable
            })
    }
}
