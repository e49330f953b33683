use {
    super::Service,
    crate::{
        auction::entities,
        per_metrics::AUCTIONS_CLOSED_METRIC,
    },
    axum_prometheus::metrics,
};

pub struct MarkAuctionCompletedInput {
    pub auction_id: entities::AuctionId,
    pub reason:     entities::CloseReason,
}

impl Service {
    /// Succeeds when the auction is already completed or does not exist.
    pub async fn mark_auction_completed(
        &self,
        input: MarkAuctionCompletedInput,
    ) -> anyhow::Result<()> {
        self.repo
            .update_auction_status(input.auction_id, entities::AuctionStatus::Completed)
            .await?;
        metrics::counter!(
            AUCTIONS_CLOSED_METRIC,
            &[("reason", input.reason.as_ref().to_string())]
        )
        .increment(1);
        tracing::info!(
            auction_id = %input.auction_id,
            reason = input.reason.as_ref(),
            "Auction completed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            repository::{
                InMemoryDatabase,
                MockDatabase,
            },
            service::tests::auction_create,
        },
        anyhow::anyhow,
        std::time::Duration,
        time::OffsetDateTime,
    };

    #[tokio::test]
    async fn test_mark_auction_completed_is_idempotent() {
        let auction = entities::Auction::new(
            auction_create("Lamp"),
            OffsetDateTime::now_utc(),
            Duration::from_secs(60),
        );
        let db = InMemoryDatabase::with_auctions(vec![auction.clone()]);
        let service = Service::new_without_loop(db.clone(), Duration::from_secs(60), 1);

        for _ in 0..2 {
            service
                .mark_auction_completed(MarkAuctionCompletedInput {
                    auction_id: auction.id,
                    reason:     entities::CloseReason::Operator,
                })
                .await
                .unwrap();
            assert_eq!(
                db.status(auction.id),
                Some(entities::AuctionStatus::Completed)
            );
        }
    }

    #[tokio::test]
    async fn test_mark_auction_completed_unknown_id_is_noop() {
        let db = InMemoryDatabase::default();
        let service = Service::new_without_loop(db.clone(), Duration::from_secs(60), 1);
        service
            .mark_auction_completed(MarkAuctionCompletedInput {
                auction_id: entities::AuctionId::new_v4(),
                reason:     entities::CloseReason::Expired,
            })
            .await
            .unwrap();
        assert_eq!(db.len(), 0);
    }

    #[tokio::test]
    async fn test_mark_auction_completed_store_failure() {
        let mut db = MockDatabase::default();
        db.expect_update_auction_status()
            .times(1)
            .returning(|_, _| Err(anyhow!("connection reset")));
        let service = Service::new_without_loop(db, Duration::from_secs(60), 1);
        let result = service
            .mark_auction_completed(MarkAuctionCompletedInput {
                auction_id: entities::AuctionId::new_v4(),
                reason:     entities::CloseReason::Expired,
            })
            .await;
        assert!(result.is_err());
    }
}
