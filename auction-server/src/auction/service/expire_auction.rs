use {
    super::{
        mark_auction_completed::MarkAuctionCompletedInput,
        Service,
    },
    crate::auction::entities,
};

pub struct ExpireAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Closes an auction whose deadline has passed and frees its admission slot.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id))]
    pub(super) async fn expire_auction(&self, input: ExpireAuctionInput) {
        if self
            .repo
            .get_in_memory_pending_expiration(input.auction_id)
            .await
            .is_none()
        {
            tracing::debug!("Expiration was cancelled");
            return;
        }

        match self
            .mark_auction_completed(MarkAuctionCompletedInput {
                auction_id: input.auction_id,
                reason:     entities::CloseReason::Expired,
            })
            .await
        {
            Ok(()) => {
                if self
                    .repo
                    .remove_in_memory_pending_expiration(input.auction_id)
                    .await
                    .is_some()
                {
                    self.admission.release();
                }
            }
            Err(e) => {
                tracing::error!(
                    error = ?e,
                    "Failed to complete expired auction, keeping its admission slot"
                );
                self.repo
                    .mark_in_memory_pending_expiration_stuck(input.auction_id)
                    .await;
            }
        }
    }
}
