use {
    super::AuctionId,
    strum::AsRefStr,
    time::OffsetDateTime,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationState {
    /// Waiting for the end time to pass.
    Armed,
    /// Fired, but the status write failed. The auction keeps its admission slot
    /// until an operator closes it.
    Stuck,
}

/// An admitted auction whose closing this server is responsible for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingExpiration {
    pub auction_id: AuctionId,
    pub end_time:   OffsetDateTime,
    pub state:      ExpirationState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CloseReason {
    Expired,
    RecoveredOverdue,
    RecoveryCapacity,
    Operator,
}
