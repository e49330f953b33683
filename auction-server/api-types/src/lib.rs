use {
    ::serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

pub mod auction;
pub mod user;

#[derive(ToResponse, ToSchema, Serialize, Deserialize)]
#[response(description = "An error occurred processing the request")]
pub struct ErrorBodyResponse {
    pub error: String,
}

#[derive(AsRefStr)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "v1")]
    V1,
    #[strum(serialize = "auctions")]
    Auction,
    #[strum(serialize = "users")]
    User,
    #[strum(serialize = "")]
    Root,
    #[strum(serialize = "live")]
    Liveness,
    #[strum(serialize = "docs")]
    Docs,
    #[strum(serialize = "docs/openapi.json")]
    OpenApi,
}

#[derive(PartialEq, Debug)]
pub enum AccessLevel {
    Admin,
    Public,
}

pub struct RouteProperties {
    pub access_level: AccessLevel,
    pub method:       http::Method,
    pub full_path:    String,
}

pub trait Routable: AsRef<str> + Clone {
    fn properties(&self) -> RouteProperties;
}

/// Joins the versioned prefix, the resource prefix and the route suffix into an axum path.
fn full_path(resource: Route, suffix: &str) -> String {
    format!("{}{}{}", Route::V1.as_ref(), resource.as_ref(), suffix)
        .trim_end_matches('/')
        .to_string()
}
