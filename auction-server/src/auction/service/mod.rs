use {
    super::repository::{
        Database,
        Repository,
    },
    admission_controller::AdmissionController,
    schedule_expiration::ScheduledExpiration,
    std::{
        sync::{
            atomic::AtomicBool,
            Arc,
        },
        time::Duration,
    },
    tokio::sync::{
        mpsc,
        watch,
        Mutex,
    },
    tokio_util::task::TaskTracker,
};

pub mod add_auction;
pub mod admission_controller;
pub mod close_auction;
pub mod expire_auction;
pub mod get_auction_by_id;
pub mod get_auctions;
pub mod get_capacity;
pub mod mark_auction_completed;
pub mod recover_active_auctions;
pub mod schedule_expiration;
pub mod update_metrics;
pub mod workers;

pub struct Config {
    /// Bidding window of every new auction.
    pub auction_duration:        Duration,
    pub max_concurrent_auctions: usize,
}

pub struct ServiceInner {
    config:              Config,
    repo:                Arc<Repository>,
    admission:           AdmissionController,
    task_tracker:        TaskTracker,
    expiration_sender:   mpsc::UnboundedSender<ScheduledExpiration>,
    // Taken by the expiration loop when it starts.
    expiration_receiver: Mutex<Option<mpsc::UnboundedReceiver<ScheduledExpiration>>>,
    // Claimed by the first recovery pass.
    recovery_started:    AtomicBool,
    recovery_completed:  watch::Sender<bool>,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(db: impl Database, config: Config, task_tracker: TaskTracker) -> Self {
        let (expiration_sender, expiration_receiver) = mpsc::unbounded_channel();
        Self(Arc::new(ServiceInner {
            admission: AdmissionController::new(config.max_concurrent_auctions),
            config,
            repo: Arc::new(Repository::new(db)),
            task_tracker,
            expiration_sender,
            expiration_receiver: Mutex::new(Some(expiration_receiver)),
            recovery_started: AtomicBool::new(false),
            recovery_completed: watch::channel(false).0,
        }))
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::{
            Config,
            Service,
        },
        crate::auction::{
            entities,
            repository::Database,
        },
        std::time::Duration,
        tokio_util::task::TaskTracker,
    };

    impl Service {
        /// Service with recovery already done and the expiration loop running.
        pub async fn new_with_loop(
            db: impl Database,
            auction_duration: Duration,
            max_concurrent_auctions: usize,
        ) -> Self {
            let service = Self::new_without_loop(db, auction_duration, max_concurrent_auctions);
            service.start_expiration_loop();
            service.recover_active_auctions().await;
            service
        }

        pub fn new_without_loop(
            db: impl Database,
            auction_duration: Duration,
            max_concurrent_auctions: usize,
        ) -> Self {
            Self::new(
                db,
                Config {
                    auction_duration,
                    max_concurrent_auctions,
                },
                TaskTracker::new(),
            )
        }

        pub fn start_expiration_loop(&self) {
            tokio::spawn({
                let service = self.clone();
                async move { service.run_expiration_loop().await }
            });
        }

        pub fn admitted(&self) -> usize {
            self.admission.admitted()
        }

        pub async fn pending_expiration(
            &self,
            auction_id: entities::AuctionId,
        ) -> Option<entities::PendingExpiration> {
            self.repo.get_in_memory_pending_expiration(auction_id).await
        }
    }

    pub fn auction_create(product_name: &str) -> entities::AuctionCreate {
        entities::AuctionCreate {
            product_name: product_name.to_string(),
            category:     "Collectibles".to_string(),
            description:  "Signed first edition in mint condition".to_string(),
            condition:    entities::ProductCondition::New,
        }
    }
}
