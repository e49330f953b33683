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
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type UserId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug, PartialEq)]
pub struct User {
    /// The id of the user.
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:   UserId,
    /// The name of the user.
    #[schema(example = "John Doe")]
    pub name: String,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct GetUserParams {
    /// The id of the user to fetch.
    #[param(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub user_id: UserId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = ":user_id")]
    GetUser,
}

impl Routable for Route {
    fn properties(&self) -> RouteProperties {
        let full_path = crate::full_path(crate::Route::User, self.as_ref());
        match self {
            Route::GetUser => RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
        }
    }
}
