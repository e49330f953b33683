use {
    super::Database,
    crate::auction::entities,
    anyhow::anyhow,
    axum::async_trait,
    std::{
        collections::HashMap,
        sync::{
            Arc,
            Mutex,
        },
        time::Duration,
    },
};

/// Test database that keeps auctions in memory. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    auctions:     Arc<Mutex<HashMap<entities::AuctionId, entities::Auction>>>,
    update_delay: Duration,
}

impl InMemoryDatabase {
    pub fn with_auctions(auctions: Vec<entities::Auction>) -> Self {
        Self {
            auctions: Arc::new(Mutex::new(
                auctions
                    .into_iter()
                    .map(|auction| (auction.id, auction))
                    .collect(),
            )),
            update_delay: Duration::ZERO,
        }
    }

    /// Makes every status update take `delay`, like a slow store.
    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = delay;
        self
    }

    pub fn status(&self, auction_id: entities::AuctionId) -> Option<entities::AuctionStatus> {
        self.auctions
            .lock()
            .unwrap()
            .get(&auction_id)
            .map(|auction| auction.status)
    }

    pub fn len(&self) -> usize {
        self.auctions.lock().unwrap().len()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        let mut auctions = self.auctions.lock().unwrap();
        if auctions.contains_key(&auction.id) {
            return Err(anyhow!("duplicate auction id {}", auction.id));
        }
        auctions.insert(auction.id, auction.clone());
        Ok(())
    }

    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> anyhow::Result<Option<entities::Auction>> {
        Ok(self.auctions.lock().unwrap().get(&auction_id).cloned())
    }

    async fn get_auctions_by_status(
        &self,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<Vec<entities::Auction>> {
        let mut auctions: Vec<_> = self
            .auctions
            .lock()
            .unwrap()
            .values()
            .filter(|auction| auction.status == status)
            .cloned()
            .collect();
        auctions.sort_by_key(|auction| auction.creation_time);
        Ok(auctions)
    }

    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<()> {
        if !self.update_delay.is_zero() {
            tokio::time::sleep(self.update_delay).await;
        }
        if let Some(auction) = self.auctions.lock().unwrap().get_mut(&auction_id) {
            auction.status = status;
        }
        Ok(())
    }
}
