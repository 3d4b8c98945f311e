//! User account handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateUser, Permission, UpdateUser, UserResponse, UserRole};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, PageParams, Paginated};

/// List filter for user accounts
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List user accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PageParams, UserFilter),
    responses(
        (status = 200, description = "Paginated list of users"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    Query(filter): Query<UserFilter>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadUser)?;

    let (users, total) = state
        .user_service
        .list_users(params.clone(), filter.role, filter.is_active)
        .await?;

    let items = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(Paginated::new(items, &params, total)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    // Users may always fetch their own account
    if current_user.id != id {
        state
            .policy
            .authorize(&current_user.actor(), Permission::ReadUser)?;
    }

    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Referenced employee missing"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Username taken or employee already linked")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<Created<UserResponse>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::CreateUser)?;

    let user = state.user_service.create_user(payload).await?;
    Ok(Created(UserResponse::from(user)))
}

/// Update a user account (role changes are admin-gated by permission)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::UpdateUser)?;

    let user = state.user_service.update_user(id, payload).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::DeleteUser)?;

    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}
