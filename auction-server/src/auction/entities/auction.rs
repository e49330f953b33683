use {
    std::fmt::{
        Display,
        Formatter,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type AuctionId = Uuid;

const MIN_DESCRIPTION_LENGTH: usize = 10;
const MAX_DESCRIPTION_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl Display for AuctionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AuctionStatus::Active => write!(f, "active"),
            AuctionStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Debug, Clone)]
pub struct AuctionCreate {
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
}

impl AuctionCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.product_name.trim().is_empty() {
            return Err("product name must not be empty".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("category must not be empty".to_string());
        }
        let description_length = self.description.chars().count();
        if !(MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&description_length) {
            return Err(format!(
                "description must be between {} and {} characters, got {}",
                MIN_DESCRIPTION_LENGTH, MAX_DESCRIPTION_LENGTH, description_length
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Auction {
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: OffsetDateTime,
    /// Computed once at creation and persisted, never recomputed.
    pub end_time:      OffsetDateTime,
}

/// Drops sub-microsecond precision, which the store does not keep.
fn truncate_to_micros(timestamp: OffsetDateTime) -> OffsetDateTime {
    timestamp - time::Duration::nanoseconds(i64::from(timestamp.nanosecond() % 1_000))
}

impl Auction {
    pub fn new(
        auction: AuctionCreate,
        creation_time: OffsetDateTime,
        duration: std::time::Duration,
    ) -> Self {
        let creation_time = truncate_to_micros(creation_time);
        Self {
            id: Uuid::new_v4(),
            product_name: auction.product_name,
            category: auction.category,
            description: auction.description,
            condition: auction.condition,
            status: AuctionStatus::Active,
            creation_time,
            end_time: truncate_to_micros(creation_time + duration),
        }
    }

    /// Time left until the auction closes. Negative once the end time has passed.
    pub fn remaining(&self, now: OffsetDateTime) -> time::Duration {
        self.end_time - now
    }
}
