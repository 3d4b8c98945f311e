//! Position handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreatePosition, Permission, Position, PositionFilter, UpdatePosition};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, PageParams, Paginated};

/// Create position routes
pub fn position_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_positions).post(create_position))
        .route(
            "/:id",
            get(get_position).put(update_position).delete(delete_position),
        )
}

/// List positions
#[utoipa::path(
    get,
    path = "/positions",
    tag = "Positions",
    security(("bearer_auth" = [])),
    params(PageParams, PositionFilter),
    responses(
        (status = 200, description = "Paginated list of positions"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_positions(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    Query(filter): Query<PositionFilter>,
) -> AppResult<Json<Paginated<Position>>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadPosition)?;

    let (items, total) = state
        .position_service
        .list_positions(params.clone(), filter)
        .await?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// Get position by ID
#[utoipa::path(
    get,
    path = "/positions/{id}",
    tag = "Positions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position", body = Position),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_position(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Position>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadPosition)?;

    let position = state.position_service.get_position(id).await?;
    Ok(Json(position))
}

/// Create a position
#[utoipa::path(
    post,
    path = "/positions",
    tag = "Positions",
    security(("bearer_auth" = [])),
    request_body = CreatePosition,
    responses(
        (status = 201, description = "Position created", body = Position),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_position(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePosition>,
) -> AppResult<Created<Position>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::CreatePosition)?;

    let position = state.position_service.create_position(payload).await?;
    Ok(Created(position))
}

/// Update a position
#[utoipa::path(
    put,
    path = "/positions/{id}",
    tag = "Positions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Position ID")),
    request_body = UpdatePosition,
    responses(
        (status = 200, description = "Position updated", body = Position),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn update_position(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdatePosition>,
) -> AppResult<Json<Position>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::UpdatePosition)?;

    let position = state.position_service.update_position(id, payload).await?;
    Ok(Json(position))
}

/// Delete a position; fails while employees still hold it
#[utoipa::path(
    delete,
    path = "/positions/{id}",
    tag = "Positions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Position ID")),
    responses(
        (status = 204, description = "Position deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Position still has employees")
    )
)]
pub async fn delete_position(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::DeletePosition)?;

    state.position_service.delete_position(id).await?;
    Ok(NoContent)
}
