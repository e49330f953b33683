use {
    super::Service,
    crate::auction::entities,
    std::time::Duration,
    time::OffsetDateTime,
    tokio::time::Instant,
};

/// Queue entry of the expiration loop. Ordered by deadline first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduledExpiration {
    pub deadline:   Instant,
    pub auction_id: entities::AuctionId,
}

pub struct ScheduleExpirationInput {
    pub auction_id: entities::AuctionId,
    pub end_time:   OffsetDateTime,
}

/// Time left until `end_time`, zero once it has passed.
fn delay_until(end_time: OffsetDateTime) -> Duration {
    (end_time - OffsetDateTime::now_utc())
        .try_into()
        .unwrap_or(Duration::ZERO)
}

impl Service {
    /// Arms the expiration of an admitted auction for its persisted end time.
    pub(super) async fn schedule_expiration(&self, input: ScheduleExpirationInput) {
        self.repo
            .add_in_memory_pending_expiration(entities::PendingExpiration {
                auction_id: input.auction_id,
                end_time:   input.end_time,
                state:      entities::ExpirationState::Armed,
            })
            .await;
        let deadline = Instant::now() + delay_until(input.end_time);
        if let Err(e) = self.expiration_sender.send(ScheduledExpiration {
            deadline,
            auction_id: input.auction_id,
        }) {
            // Only happens once the loop has exited. Recovery re-arms it on the next start.
            tracing::error!(
                auction_id = %input.auction_id,
                error = ?e,
                "Failed to schedule auction expiration"
            );
        }
    }
}
