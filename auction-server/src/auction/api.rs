use {
    super::{
        entities,
        service::{
            add_auction::AddAuctionInput,
            close_auction::CloseAuctionInput,
            get_auction_by_id::GetAuctionByIdInput,
            get_auctions::GetAuctionsInput,
        },
    },
    crate::{
        api::{
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    auction_api_types::{
        auction::{
            Auction,
            AuctionCapacity,
            AuctionCreate,
            AuctionStatus,
            Auctions,
            GetAuctionParams,
            GetAuctionsQueryParams,
            ProductCondition,
            Route,
        },
        ErrorBodyResponse,
    },
    axum::{
        extract::{
            Path,
            Query,
            State,
        },
        Json,
        Router,
    },
    std::sync::Arc,
};

/// Create a new auction.
///
/// The auction is open for bidding for the configured interval and is closed automatically
/// afterwards. Creation is rejected while the maximum number of concurrent auctions is open.
#[utoipa::path(post, path = "/v1/auctions", request_body = AuctionCreate, responses(
    (status = 200, description = "Auction was created successfully", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 429, description = "Maximum concurrent auctions limit reached", body = ErrorBodyResponse),
    (status = 503, response = ErrorBodyResponse),
),)]
pub async fn post_auction(
    State(store): State<Arc<Store>>,
    Json(auction_create): Json<AuctionCreate>,
) -> Result<Json<Auction>, RestError> {
    let auction = store
        .auction_service
        .add_auction(AddAuctionInput {
            auction: auction_create.into(),
        })
        .await?;
    Ok(Json(auction.into()))
}

/// Query the status and the closing time of an auction.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}",
    params(GetAuctionParams),
    responses(
    (status = 200, body = Auction),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn get_auction(
    State(store): State<Arc<Store>>,
    Path(params): Path<GetAuctionParams>,
) -> Result<Json<Auction>, RestError> {
    let auction = store
        .auction_service
        .get_auction_by_id(GetAuctionByIdInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(auction.into()))
}

/// List auctions with the given status, oldest first.
#[utoipa::path(get, path = "/v1/auctions",
    params(GetAuctionsQueryParams),
    responses(
    (status = 200, body = Auctions),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn get_auctions(
    State(store): State<Arc<Store>>,
    Query(params): Query<GetAuctionsQueryParams>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = store
        .auction_service
        .get_auctions(GetAuctionsInput {
            status: params.status.into(),
        })
        .await?;
    Ok(Json(Auctions {
        items: auctions.into_iter().map(Auction::from).collect(),
    }))
}

/// Number of open auctions monitored by the server and the configured limit.
#[utoipa::path(get, path = "/v1/auctions/capacity", responses(
    (status = 200, body = AuctionCapacity),
),)]
pub async fn get_auction_capacity(State(store): State<Arc<Store>>) -> Json<AuctionCapacity> {
    let capacity = store.auction_service.get_capacity();
    Json(AuctionCapacity {
        admitted:       capacity.admitted,
        max_concurrent: capacity.max_concurrent,
    })
}

/// Close an auction before its end time.
///
/// Cancels the scheduled expiration and frees its slot. Closing a completed auction has no effect.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/close",
    security(
        ("bearerAuth" = []),
    ),
    params(GetAuctionParams),
    responses(
    (status = 200, body = Auction),
    (status = 401, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
    (status = 503, response = ErrorBodyResponse),
),)]
pub async fn post_close_auction(
    State(store): State<Arc<Store>>,
    Path(params): Path<GetAuctionParams>,
) -> Result<Json<Auction>, RestError> {
    let auction = store
        .auction_service
        .close_auction(CloseAuctionInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(auction.into()))
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::PostAuction, post_auction)
        .route(Route::GetAuctions, get_auctions)
        .route(Route::GetAuctionCapacity, get_auction_capacity)
        .route(Route::GetAuction, get_auction)
        .route(Route::PostCloseAuction, post_close_auction)
        .router
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
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

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<AuctionCreate> for entities::AuctionCreate {
    fn from(auction: AuctionCreate) -> Self {
        Self {
            product_name: auction.product_name,
            category:     auction.category,
            description:  auction.description,
            condition:    auction.condition.into(),
        }
    }
}

impl From<entities::Auction> for Auction {
    fn from(auction: entities::Auction) -> Self {
        Self {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time,
            end_time:      auction.end_time,
        }
    }
}
