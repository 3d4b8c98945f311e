//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateUser, MenuAccess, Permission, UserResponse};
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// Password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Current-user profile with derived access information
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserResponse,
    /// All permission atoms the account holds
    pub permissions: Vec<Permission>,
    /// Menu visibility flags for frontends
    pub menu: MenuAccess,
}

/// Create authentication routes (login/register are public; /me is mounted
/// behind the auth middleware in the router)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Routes under /auth that require authentication
pub fn auth_me_routes() -> Router<AppState> {
    Router::new().route("/me", axum::routing::get(me))
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.auth_service.register(payload).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error or inactive user"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}

/// Get the authenticated user's profile, permissions and menu flags
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<ProfileResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;
    let actor = current_user.actor();

    Ok(Json(ProfileResponse {
        user: UserResponse::from(user),
        permissions: state.policy.permissions_for(&actor),
        menu: state.policy.menu_access(&actor),
    }))
}
