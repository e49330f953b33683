use {
    super::{
        get_auction_by_id::GetAuctionByIdInput,
        mark_auction_completed::MarkAuctionCompletedInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
    },
    time::OffsetDateTime,
};

pub struct CloseAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Operator close. Cancels the pending expiration, if any, before writing the status.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id))]
    pub async fn close_auction(
        &self,
        input: CloseAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let mut auction = self
            .get_auction_by_id(GetAuctionByIdInput {
                auction_id: input.auction_id,
            })
            .await?;
        let pending_expiration = self
            .repo
            .remove_in_memory_pending_expiration(input.auction_id)
            .await;
        if auction.status == entities::AuctionStatus::Active {
            if let Err(e) = self
                .mark_auction_completed(MarkAuctionCompletedInput {
                    auction_id: input.auction_id,
                    reason:     entities::CloseReason::Operator,
                })
                .await
            {
                tracing::error!(error = ?e, "Failed to close auction");
                if let Some(pending_expiration) = pending_expiration {
                    // The timer of an overdue entry has already fired or been skipped.
                    let state = if pending_expiration.end_time <= OffsetDateTime::now_utc() {
                        entities::ExpirationState::Stuck
                    } else {
                        pending_expiration.state
                    };
                    self.repo
                        .add_in_memory_pending_expiration(entities::PendingExpiration {
                            state,
                            ..pending_expiration
                        })
                        .await;
                }
                return Err(RestError::TemporarilyUnavailable);
            }
        }

        if pending_expiration.is_some() {
            self.admission.release();
        }
        auction.status = entities::AuctionStatus::Completed;
        Ok(auction)
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
            service::{
                add_auction::AddAuctionInput,
                tests::auction_create,
            },
        },
        anyhow::anyhow,
        std::{
            sync::{
                atomic::{
                    AtomicUsize,
                    Ordering,
                },
                Arc,
            },
            time::Duration,
        },
    };

    #[tokio::test]
    async fn test_close_auction_cancels_expiration_and_releases_slot() {
        let db = InMemoryDatabase::default();
        let service = Service::new_with_loop(db.clone(), Duration::from_millis(600), 1).await;
        let auction = service
            .add_auction(AddAuctionInput {
                auction: auction_create("Chair"),
            })
            .await
            .unwrap();
        assert_eq!(service.admitted(), 1);
        tokio::time::sleep(Duration::from_millis(300)).await;

        let closed = service
            .close_auction(CloseAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(closed.status, entities::AuctionStatus::Completed);
        assert_eq!(db.status(auction.id), Some(entities::AuctionStatus::Completed));
        assert_eq!(service.admitted(), 0);
        assert!(service.pending_expiration(auction.id).await.is_none());

        let next = service
            .add_auction(AddAuctionInput {
                auction: auction_create("Table"),
            })
            .await
            .unwrap();
        // The cancelled timer fires at ~600ms without releasing the slot of the next auction.
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(service.admitted(), 1);
        assert_eq!(db.status(next.id), Some(entities::AuctionStatus::Active));
    }

    #[tokio::test]
    async fn test_close_auction_unknown_id() {
        let service =
            Service::new_with_loop(InMemoryDatabase::default(), Duration::from_secs(60), 1).await;
        let result = service
            .close_auction(CloseAuctionInput {
                auction_id: entities::AuctionId::new_v4(),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::AuctionNotFound);
    }

    #[tokio::test]
    async fn test_close_auction_resolves_stuck_expiration() {
        let stored = Arc::new(std::sync::Mutex::new(None::<entities::Auction>));
        let updates = Arc::new(AtomicUsize::new(0));

        let mut db = MockDatabase::default();
        db.expect_get_auctions_by_status().returning(|_| Ok(vec![]));
        db.expect_add_auction().returning({
            let stored = stored.clone();
            move |auction| {
                *stored.lock().unwrap() = Some(auction.clone());
                Ok(())
            }
        });
        db.expect_get_auction().returning({
            let stored = stored.clone();
            move |_| Ok(stored.lock().unwrap().clone())
        });
        // The expiration write fails, the operator close succeeds.
        db.expect_update_auction_status().returning({
            let updates = updates.clone();
            move |_, _| {
                if updates.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(anyhow!("connection reset"))
                } else {
                    Ok(())
                }
            }
        });
        let service = Service::new_with_loop(db, Duration::from_millis(100), 1).await;

        let auction = service
            .add_auction(AddAuctionInput {
                auction: auction_create("Rug"),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(
            service.pending_expiration(auction.id).await.map(|p| p.state),
            Some(entities::ExpirationState::Stuck)
        );
        assert_eq!(service.admitted(), 1);

        service
            .close_auction(CloseAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(service.admitted(), 0);
        assert!(service.pending_expiration(auction.id).await.is_none());
        assert_eq!(updates.load(Ordering::SeqCst), 2);
    }
}
