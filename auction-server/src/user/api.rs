use {
    super::{
        entities,
        service::get_user_by_id::GetUserByIdInput,
    },
    crate::{
        api::{
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    auction_api_types::{
        user::{
            GetUserParams,
            Route,
            User,
        },
        ErrorBodyResponse,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
        Router,
    },
    std::sync::Arc,
};

/// Fetch a user by id.
#[utoipa::path(get, path = "/v1/users/{user_id}",
    params(GetUserParams),
    responses(
    (status = 200, body = User),
    (status = 404, description = "User was not found", body = ErrorBodyResponse),
),)]
pub async fn get_user(
    State(store): State<Arc<Store>>,
    Path(params): Path<GetUserParams>,
) -> Result<Json<User>, RestError> {
    let user = store
        .user_service
        .get_user_by_id(GetUserByIdInput {
            user_id: params.user_id,
        })
        .await?;
    Ok(Json(user.into()))
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::GetUser, get_user)
        .router
}

impl From<entities::User> for User {
    fn from(user: entities::User) -> Self {
        Self {
            id:   user.id,
            name: user.name,
        }
    }
}
