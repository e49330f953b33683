use {
    super::{
        expire_auction::ExpireAuctionInput,
        schedule_expiration::ScheduledExpiration,
        Service,
    },
    crate::server::{
        EXIT_CHECK_INTERVAL,
        SHOULD_EXIT,
    },
    anyhow::{
        anyhow,
        Result,
    },
    std::{
        cmp::Reverse,
        collections::BinaryHeap,
        sync::atomic::Ordering,
        time::Duration,
    },
    tokio::time::Instant,
};

const METRICS_UPDATE_INTERVAL: Duration = Duration::from_secs(5);

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl Service {
    /// Fires auction expirations in deadline order. Each close runs on the task tracker.
    pub async fn run_expiration_loop(&self) -> Result<()> {
        let mut receiver = self
            .expiration_receiver
            .lock()
            .await
            .take()
            .ok_or(anyhow!("Expiration loop is already running"))?;
        tracing::info!("Starting auction expiration loop...");

        let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);
        let mut queue: BinaryHeap<Reverse<ScheduledExpiration>> = BinaryHeap::new();

        while !SHOULD_EXIT.load(Ordering::Acquire) {
            let next_deadline = queue.peek().map(|Reverse(expiration)| expiration.deadline);
            tokio::select! {
                expiration = receiver.recv() => {
                    let expiration = expiration.ok_or(anyhow!("Expiration channel closed"))?;
                    tracing::debug!(auction_id = %expiration.auction_id, "Expiration scheduled");
                    queue.push(Reverse(expiration));
                }
                _ = sleep_until_deadline(next_deadline) => {
                    let now = Instant::now();
                    while let Some(Reverse(expiration)) = queue.peek().copied() {
                        if expiration.deadline > now {
                            break;
                        }
                        queue.pop();
                        self.task_tracker.spawn({
                            let service = self.clone();
                            async move {
                                service
                                    .expire_auction(ExpireAuctionInput {
                                        auction_id: expiration.auction_id,
                                    })
                                    .await;
                            }
                        });
                    }
                }
                _ = exit_check_interval.tick() => {}
            }
        }
        tracing::info!(
            pending = queue.len(),
            "Shutting down auction expiration loop..."
        );
        Ok(())
    }

    pub async fn run_metrics_loop(&self) -> Result<()> {
        let mut metrics_interval = tokio::time::interval(METRICS_UPDATE_INTERVAL);
        while !SHOULD_EXIT.load(Ordering::Acquire) {
            metrics_interval.tick().await;
            self.update_metrics().await;
        }
        Ok(())
    }
}
