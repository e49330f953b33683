use {
    super::{
        schedule_expiration::ScheduleExpirationInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        per_metrics::AUCTIONS_CREATED_METRIC,
    },
    axum_prometheus::metrics,
    time::OffsetDateTime,
};

pub struct AddAuctionInput {
    pub auction: entities::AuctionCreate,
}

fn record_created(result: &str) {
    metrics::counter!(AUCTIONS_CREATED_METRIC, &[("result", result.to_string())]).increment(1);
}

impl Service {
    /// Admits, persists and arms the expiration of a new auction.
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        input.auction.validate().map_err(|e| {
            record_created("invalid");
            RestError::BadParameters(e)
        })?;

        self.wait_for_recovery().await;
        if !self.admission.try_admit() {
            record_created("capacity_exceeded");
            tracing::warn!(
                max_concurrent = self.admission.max_concurrent(),
                "Auction rejected, concurrency limit reached"
            );
            return Err(RestError::CapacityExceeded);
        }

        let auction = entities::Auction::new(
            input.auction,
            OffsetDateTime::now_utc(),
            self.config.auction_duration,
        );
        let auction = match self.repo.add_auction(auction).await {
            Ok(auction) => auction,
            Err(e) => {
                self.admission.release();
                record_created("error");
                tracing::error!(error = ?e, "Failed to add auction");
                return Err(RestError::TemporarilyUnavailable);
            }
        };

        self.schedule_expiration(ScheduleExpirationInput {
            auction_id: auction.id,
            end_time:   auction.end_time,
        })
        .await;
        record_created("success");
        tracing::info!(
            auction_id = %auction.id,
            end_time = %auction.end_time,
            "Auction created"
        );
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
                get_auction_by_id::GetAuctionByIdInput,
                tests::auction_create,
            },
        },
        anyhow::anyhow,
        std::time::Duration,
    };

    #[tokio::test]
    async fn test_add_auction_closes_after_interval() {
        let db = InMemoryDatabase::default();
        let service = Service::new_with_loop(db.clone(), Duration::from_millis(400), 5).await;

        let auction = service
            .add_auction(AddAuctionInput {
                auction: auction_create("Watch"),
            })
            .await
            .unwrap();
        assert_eq!(auction.status, entities::AuctionStatus::Active);
        assert_eq!(
            auction.end_time - auction.creation_time,
            time::Duration::milliseconds(400)
        );
        assert_eq!(service.admitted(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let fetched = service
            .get_auction_by_id(GetAuctionByIdInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(fetched.status, entities::AuctionStatus::Active);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(
            db.status(auction.id),
            Some(entities::AuctionStatus::Completed)
        );
        assert_eq!(service.admitted(), 0);
        assert!(service.pending_expiration(auction.id).await.is_none());
    }

    #[tokio::test]
    async fn test_add_auction_capacity_exceeded_until_one_closes() {
        let db = InMemoryDatabase::default();
        let service = Service::new_with_loop(db.clone(), Duration::from_millis(1000), 2).await;

        let first = service
            .add_auction(AddAuctionInput {
                auction: auction_create("A"),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        let second = service
            .add_auction(AddAuctionInput {
                auction: auction_create("B"),
            })
            .await
            .unwrap();
        let rejected = service
            .add_auction(AddAuctionInput {
                auction: auction_create("C"),
            })
            .await;
        assert_eq!(rejected.unwrap_err(), RestError::CapacityExceeded);
        assert_eq!(db.len(), 2);

        // First auction closes at ~1000ms, second at ~1500ms.
        tokio::time::sleep(Duration::from_millis(750)).await;
        assert_eq!(db.status(first.id), Some(entities::AuctionStatus::Completed));
        assert_eq!(db.status(second.id), Some(entities::AuctionStatus::Active));
        assert_eq!(service.admitted(), 1);
        service
            .add_auction(AddAuctionInput {
                auction: auction_create("D"),
            })
            .await
            .unwrap();
        assert_eq!(db.len(), 3);
        assert_eq!(service.admitted(), 2);
    }

    #[tokio::test]
    async fn test_add_auction_slow_insert_keeps_end_time() {
        let mut db = MockDatabase::default();
        db.expect_get_auctions_by_status().returning(|_| Ok(vec![]));
        db.expect_add_auction().times(1).returning(|_| {
            std::thread::sleep(Duration::from_millis(250));
            Ok(())
        });
        db.expect_update_auction_status()
            .times(1)
            .returning(|_, _| Ok(()));
        let service = Service::new_with_loop(db, Duration::from_millis(400), 1).await;

        let auction = service
            .add_auction(AddAuctionInput {
                auction: auction_create("Lamp"),
            })
            .await
            .unwrap();
        assert!(service.pending_expiration(auction.id).await.is_some());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(OffsetDateTime::now_utc() > auction.end_time);
        assert!(service.pending_expiration(auction.id).await.is_none());
        assert_eq!(service.admitted(), 0);
    }

    #[tokio::test]
    async fn test_add_auction_releases_slot_on_store_failure() {
        let mut db = MockDatabase::default();
        db.expect_get_auctions_by_status().returning(|_| Ok(vec![]));
        db.expect_add_auction()
            .times(1)
            .returning(|_| Err(anyhow!("unique violation")));
        let service = Service::new_with_loop(db, Duration::from_secs(60), 1).await;

        let result = service
            .add_auction(AddAuctionInput {
                auction: auction_create("Guitar"),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::TemporarilyUnavailable);
        assert_eq!(service.admitted(), 0);
    }

    #[tokio::test]
    async fn test_add_auction_rejects_invalid_input() {
        let mut db = MockDatabase::default();
        db.expect_get_auctions_by_status().returning(|_| Ok(vec![]));
        db.expect_add_auction().never();
        let service = Service::new_with_loop(db, Duration::from_secs(60), 1).await;

        let mut auction = auction_create("Bike");
        auction.description = "too short".to_string();
        let result = service.add_auction(AddAuctionInput { auction }).await;
        assert!(matches!(result, Err(RestError::BadParameters(_))));
        assert_eq!(service.admitted(), 0);
    }
}
