use {
    crate::{
        auction,
        config::RunOptions,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
        user,
    },
    anyhow::Result,
    auction_api_types::{
        self as api_types,
        AccessLevel,
        ErrorBodyResponse,
        Routable,
    },
    axum::{
        async_trait,
        extract::{
            self,
            FromRequestParts,
        },
        handler::Handler,
        http::{
            request::Parts,
            StatusCode,
        },
        middleware,
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            post,
            MethodRouter,
        },
        Json,
        Router,
    },
    axum_extra::{
        headers::{
            authorization::Bearer,
            Authorization,
        },
        TypedHeader,
    },
    clap::crate_version,
    std::sync::{
        atomic::Ordering,
        Arc,
    },
    tower_http::cors::CorsLayer,
    utoipa::{
        openapi::security::{
            Http,
            HttpAuthScheme,
            SecurityScheme,
        },
        Modify,
        OpenApi,
    },
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Auction Lifecycle Server API {}", crate_version!())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// The maximum number of concurrent auctions is open
    CapacityExceeded,
    /// The auction was not found
    AuctionNotFound,
    /// The user was not found
    UserNotFound,
    /// The request is missing a valid admin token
    Unauthorized,
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::CapacityExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "Maximum concurrent auctions limit reached".to_string(),
            ),
            RestError::AuctionNotFound => (
                StatusCode::NOT_FOUND,
                "Auction with the specified id was not found".to_string(),
            ),
            RestError::UserNotFound => (
                StatusCode::NOT_FOUND,
                "User with the specified id was not found".to_string(),
            ),
            RestError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized request".to_string(),
            ),
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Auth {
    Admin,
    Unauthenticated,
}

#[async_trait]
impl FromRequestParts<Arc<Store>> for Auth {
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<Store>,
    ) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(token))) => {
                if token.token() == state.secret_key {
                    Ok(Auth::Admin)
                } else {
                    Err(RestError::Unauthorized)
                }
            }
            Err(_) => Ok(Auth::Unauthenticated),
        }
    }
}

async fn require_admin(
    auth: Auth,
    req: extract::Request,
    next: middleware::Next,
) -> Result<Response, RestError> {
    match auth {
        Auth::Admin => Ok(next.run(req).await),
        Auth::Unauthenticated => Err(RestError::Unauthorized),
    }
}

/// Registers handlers under the path, method and access level declared by their route.
pub struct WrappedRouter {
    store:      Arc<Store>,
    pub router: Router<Arc<Store>>,
}

impl WrappedRouter {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            router: Router::new(),
        }
    }

    pub fn route<H, T>(self, path: impl Routable, handler: H) -> Self
    where
        H: Handler<T, Arc<Store>>,
        T: 'static,
    {
        let properties = path.properties();
        let method_router: MethodRouter<Arc<Store>> = match properties.method.as_str() {
            "GET" => get(handler),
            "POST" => post(handler),
            method => {
                tracing::error!(
                    method,
                    path = %properties.full_path,
                    "Unsupported route method, route not registered"
                );
                return self;
            }
        };
        let method_router = match properties.access_level {
            AccessLevel::Admin => method_router.route_layer(middleware::from_fn_with_state(
                self.store.clone(),
                require_admin,
            )),
            AccessLevel::Public => method_router,
        };
        Self {
            router: self.router.route(&properties.full_path, method_router),
            store:  self.store,
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub async fn start_api(run_options: RunOptions, store: Arc<Store>) -> Result<()> {
    // Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
    #[derive(OpenApi)]
    #[openapi(
    paths(
    auction::api::post_auction,
    auction::api::get_auction,
    auction::api::get_auctions,
    auction::api::get_auction_capacity,
    auction::api::post_close_auction,
    user::api::get_user,
    ),
    components(
    schemas(
    api_types::auction::Auction,
    api_types::auction::AuctionCapacity,
    api_types::auction::AuctionCreate,
    api_types::auction::AuctionStatus,
    api_types::auction::Auctions,
    api_types::auction::ProductCondition,
    api_types::user::User,
    ErrorBodyResponse,
    ),
    responses(
    ErrorBodyResponse,
    api_types::auction::Auction,
    api_types::user::User,
    ),
    ),
    modifiers(&SecurityAddon),
    tags(
    (name = "Auction Lifecycle Server", description = "Auction Lifecycle Server opens auctions for a fixed \
    bidding window, limits how many can be open at once and closes them automatically when the window ends.")
    )
    )]
    struct ApiDoc;

    let v1_routes = Router::new()
        .merge(auction::api::get_routes(store.clone()))
        .merge(user::api::get_routes(store.clone()));

    let app: Router<()> = Router::new()
        .merge(Redoc::with_url(
            api_types::Route::Docs.as_ref().to_string(),
            ApiDoc::openapi(),
        ))
        .route(
            api_types::Route::OpenApi.as_ref(),
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(v1_routes)
        .route(api_types::Route::Root.as_ref(), get(root))
        .route(api_types::Route::Liveness.as_ref(), get(live))
        .layer(CorsLayer::permissive())
        .with_state(store);

    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    tracing::info!(addr = %run_options.server.listen_addr, "Starting API server...");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down API server...");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        axum::body::to_bytes,
    };

    #[tokio::test]
    async fn test_capacity_exceeded_response() {
        let response = RestError::CapacityExceeded.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Maximum concurrent auctions limit reached");
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            RestError::BadParameters("x".to_string())
                .to_status_and_message()
                .0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::AuctionNotFound.to_status_and_message().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::Unauthorized.to_status_and_message().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RestError::TemporarilyUnavailable.to_status_and_message().0,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
