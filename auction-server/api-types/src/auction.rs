use {
    crate::{
        AccessLevel,
        Routable,
        RouteProperties,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type AuctionId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    /// The auction is open for bidding.
    Active,
    /// The auction is closed. This is a terminal state.
    Completed,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AuctionCreate {
    /// The name of the product being auctioned.
    #[schema(example = "Mechanical keyboard")]
    pub product_name: String,
    /// The category of the product.
    #[schema(example = "Electronics")]
    pub category:     String,
    /// A description of the product, between 10 and 200 characters.
    #[schema(example = "Barely used keyboard with brown switches")]
    pub description:  String,
    /// The condition of the product.
    pub condition:    ProductCondition,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug, PartialEq)]
pub struct Auction {
    /// The unique id of the auction.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:            AuctionId,
    #[schema(example = "Mechanical keyboard")]
    pub product_name:  String,
    #[schema(example = "Electronics")]
    pub category:      String,
    #[schema(example = "Barely used keyboard with brown switches")]
    pub description:   String,
    pub condition:     ProductCondition,
    /// The current status of the auction.
    pub status:        AuctionStatus,
    /// The time the auction was created, formatted in rfc3339.
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
    /// The time the auction closes for bidding, formatted in rfc3339.
    #[schema(example = "2024-05-23T21:31:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_time:      OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug)]
pub struct Auctions {
    pub items: Vec<Auction>,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug, PartialEq)]
pub struct AuctionCapacity {
    /// Number of auctions currently monitored for expiration by this server.
    #[schema(example = 12)]
    pub admitted:       usize,
    /// Maximum number of auctions that can be open at the same time.
    #[schema(example = 50)]
    pub max_concurrent: usize,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct GetAuctionParams {
    /// The id of the auction.
    #[param(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id: AuctionId,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct GetAuctionsQueryParams {
    /// Only return auctions with this status.
    #[param(example = "active", value_type = String)]
    pub status: AuctionStatus,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostAuction,
    #[strum(serialize = "")]
    GetAuctions,
    #[strum(serialize = "capacity")]
    GetAuctionCapacity,
    #[strum(serialize = ":auction_id")]
    GetAuction,
    #[strum(serialize = ":auction_id/close")]
    PostCloseAuction,
}

impl Routable for Route {
    fn properties(&self) -> RouteProperties {
        let full_path = crate::full_path(crate::Route::Auction, self.as_ref());
        match self {
            Route::PostAuction => RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::POST,
                full_path,
            },
            Route::GetAuctions => RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
            Route::GetAuctionCapacity => RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
            Route::GetAuction => RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
            Route::PostCloseAuction => RouteProperties {
                access_level: AccessLevel::Admin,
                method: http::Method::POST,
                full_path,
            },
        }
    }
}
