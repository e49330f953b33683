use {
    super::{
        mark_auction_completed::MarkAuctionCompletedInput,
        schedule_expiration::ScheduleExpirationInput,
        Service,
    },
    crate::auction::entities,
    std::sync::atomic::Ordering,
    time::OffsetDateTime,
};

impl Service {
    /// Rebuilds the pending expirations from the active auctions in the store.
    ///
    /// Auctions are handled oldest first. Overdue auctions are completed without taking a slot.
    /// The rest are admitted again with their remaining time, and the ones that no longer fit
    /// under the ceiling are completed right away. Store failures are logged and the affected
    /// auctions are left as they are.
    pub async fn recover_active_auctions(&self) {
        if self.recovery_started.swap(true, Ordering::AcqRel) {
            tracing::warn!("Active auctions were already recovered");
            return;
        }

        tracing::info!("Recovering active auctions...");
        match self
            .repo
            .get_auctions_by_status(entities::AuctionStatus::Active)
            .await
        {
            Ok(mut auctions) => {
                auctions.sort_by_key(|auction| auction.creation_time);
                let count = auctions.len();
                for auction in auctions {
                    self.recover_auction(auction).await;
                }
                tracing::info!(
                    count,
                    admitted = self.admission.admitted(),
                    "Active auctions recovered"
                );
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to load active auctions for recovery");
            }
        }

        self.recovery_completed.send_replace(true);
        self.update_metrics().await;
    }

    async fn recover_auction(&self, auction: entities::Auction) {
        let reason = if !auction.remaining(OffsetDateTime::now_utc()).is_positive() {
            entities::CloseReason::RecoveredOverdue
        } else if self.admission.try_admit() {
            self.schedule_expiration(ScheduleExpirationInput {
                auction_id: auction.id,
                end_time:   auction.end_time,
            })
            .await;
            return;
        } else {
            tracing::warn!(
                auction_id = %auction.id,
                "No admission slot left for recovered auction, completing it early"
            );
            entities::CloseReason::RecoveryCapacity
        };

        if let Err(e) = self
            .mark_auction_completed(MarkAuctionCompletedInput {
                auction_id: auction.id,
                reason,
            })
            .await
        {
            tracing::error!(
                error = ?e,
                auction_id = %auction.id,
                "Failed to complete auction during recovery"
            );
        }
    }

    /// Resolves once recovery has run, so recovered auctions are admitted before new ones.
    pub(super) async fn wait_for_recovery(&self) {
        let mut receiver = self.recovery_completed.subscribe();
        let result = receiver.wait_for(|completed| *completed).await.map(|_| ());
        if let Err(e) = result {
            tracing::error!(error = ?e, "Recovery status channel closed");
        }
    }
}
