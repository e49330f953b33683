use {
    super::entities,
    crate::per_metrics::{
        AUCTION_EXPIRATIONS_PENDING_METRIC,
        AUCTION_EXPIRATIONS_STUCK_METRIC,
    },
    axum_prometheus::metrics,
    std::collections::HashMap,
    tokio::sync::Mutex,
};

mod add_auction;
mod add_in_memory_pending_expiration;
mod get_auction_by_id;
mod get_auctions_by_status;
mod get_in_memory_pending_expiration;
mod mark_in_memory_pending_expiration_stuck;
mod models;
mod remove_in_memory_pending_expiration;
mod update_auction_status;

#[cfg(test)]
mod in_memory_db;

#[cfg(test)]
pub use in_memory_db::InMemoryDatabase;
pub use models::*;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Auctions admitted by this process whose closing is still owed.
    /// Whoever removes an entry owns the release of its admission slot.
    pub pending_expirations: Mutex<HashMap<entities::AuctionId, entities::PendingExpiration>>,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
    pub db:              Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db:              Box::new(db),
        }
    }

    pub(super) async fn update_metrics(&self) {
        let pending_expirations = self.in_memory_store.pending_expirations.lock().await;
        let stuck = pending_expirations
            .values()
            .filter(|expiration| expiration.state == entities::ExpirationState::Stuck)
            .count();
        metrics::gauge!(AUCTION_EXPIRATIONS_PENDING_METRIC)
            .set((pending_expirations.len() - stuck) as f64);
        metrics::gauge!(AUCTION_EXPIRATIONS_STUCK_METRIC).set(stuck as f64);
    }
}
