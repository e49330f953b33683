#[cfg(test)]
use mockall::automock;
use {
    crate::{
        auction::entities,
        kernel::db::DB,
    },
    axum::async_trait,
    sqlx::{
        prelude::FromRow,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::{
        OffsetDateTime,
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
    uuid::Uuid,
};

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:            Uuid,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: PrimitiveDateTime,
    pub end_time:      PrimitiveDateTime,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

// Timestamps are stored without a time zone and are always UTC.
fn to_primitive(time: OffsetDateTime) -> PrimitiveDateTime {
    let time = time.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(time.date(), time.time())
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        Self {
            id:            auction.id,
            product_name:  auction.product_name.clone(),
            category:      auction.category.clone(),
            description:   auction.description.clone(),
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: to_primitive(auction.creation_time),
            end_time:      to_primitive(auction.end_time),
        }
    }
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        Self {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time.assume_utc(),
            end_time:      auction.end_time.assume_utc(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    /// Fails on a duplicate id.
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()>;
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> anyhow::Result<Option<entities::Auction>>;
    /// Returns the auctions ordered by creation time, oldest first.
    async fn get_auctions_by_status(
        &self,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<Vec<entities::Auction>>;
    /// Succeeds without changes when the auction does not exist.
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<()>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        let auction = Auction::from(auction);
        sqlx::query(
            "INSERT INTO auction (id,
                                  product_name,
                                  category,
                                  description,
                                  condition,
                                  status,
                                  creation_time,
                                  end_time) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(auction.id)
        .bind(auction.product_name)
        .bind(auction.category)
        .bind(auction.description)
        .bind(auction.condition)
        .bind(auction.status)
        .bind(auction.creation_time)
        .bind(auction.end_time)
        .execute(self)
        .await
        .inspect_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(auction_id = %auction.id, "DB: Failed to insert auction: {}", e);
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> anyhow::Result<Option<entities::Auction>> {
        let auction: Option<Auction> = sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_optional(self)
            .await
            .inspect_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(auction_id = %auction_id, "DB: Failed to fetch auction: {}", e);
            })?;
        Ok(auction.map(entities::Auction::from))
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auctions_by_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auctions_by_status",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auctions_by_status(
        &self,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<Vec<entities::Auction>> {
        let mut query = QueryBuilder::new("SELECT * FROM auction WHERE status = ");
        query.push_bind(AuctionStatus::from(status));
        query.push(" ORDER BY creation_time ASC");
        let auctions: Vec<Auction> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .inspect_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(status = %status, "DB: Failed to fetch auctions: {}", e);
            })?;
        Ok(auctions.into_iter().map(entities::Auction::from).collect())
    }

    #[instrument(
        target = "metrics",
        name = "db_update_auction_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_auction_status",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE auction SET status = $1 WHERE id = $2")
            .bind(AuctionStatus::from(status))
            .bind(auction_id)
            .execute(self)
            .await
            .inspect_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(auction_id = %auction_id, "DB: Failed to update auction status: {}", e);
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::time::Duration,
    };

    #[test]
    fn test_auction_model_keeps_utc_timestamps() {
        let creation_time = OffsetDateTime::now_utc()
            .to_offset(UtcOffset::from_hms(-3, 0, 0).unwrap())
            .replace_nanosecond(0)
            .unwrap();
        let auction = entities::Auction::new(
            entities::AuctionCreate {
                product_name: "Vintage camera".to_string(),
                category:     "Photography".to_string(),
                description:  "Film camera in working condition".to_string(),
                condition:    entities::ProductCondition::Refurbished,
            },
            creation_time,
            Duration::from_secs(90),
        );

        let model = Auction::from(&auction);
        assert_eq!(model.status, AuctionStatus::Active);
        assert_eq!(model.condition, ProductCondition::Refurbished);
        assert_eq!(model.end_time - model.creation_time, time::Duration::seconds(90));

        let restored = entities::Auction::from(model);
        assert_eq!(restored.creation_time, auction.creation_time);
        assert_eq!(restored.end_time, auction.end_time);
        assert_eq!(restored.id, auction.id);
    }
}
