//! Leave request handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    CreateLeave, Leave, LeaveBalance, LeaveCalendar, LeaveFilter, Permission, UpdateLeave,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, PageParams, Paginated};

/// Year selector for the balance endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct YearParams {
    /// Calendar year; defaults to the current year
    pub year: Option<i32>,
}

/// Create leave routes
pub fn leave_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leaves).post(create_leave))
        .route("/balance/:employee_id", get(leave_balance))
        .route("/calendar/:date", get(leave_calendar))
        .route("/:id", get(get_leave).put(update_leave).delete(delete_leave))
        .route("/:id/approve", post(approve_leave))
        .route("/:id/reject", post(reject_leave))
        .route("/:id/cancel", post(cancel_leave))
}

/// List leave requests; employees see only their own
#[utoipa::path(
    get,
    path = "/leaves",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(PageParams, LeaveFilter),
    responses(
        (status = 200, description = "Paginated list of leave requests"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_leaves(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    Query(filter): Query<LeaveFilter>,
) -> AppResult<Json<Paginated<Leave>>> {
    // Without the blanket permission the request must target own records
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadLeave,
        Permission::ReadOwnLeave,
        filter.employee_id,
    )?;

    let (items, total) = state
        .leave_service
        .list_leaves(params.clone(), filter)
        .await?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// Get leave request by ID; employees may fetch only their own
#[utoipa::path(
    get,
    path = "/leaves/{id}",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request", body = Leave),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Leave>> {
    let leave = state.leave_service.get_leave(id).await?;

    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadLeave,
        Permission::ReadOwnLeave,
        Some(leave.employee_id),
    )?;

    Ok(Json(leave))
}

/// Submit a leave request; employees may request only for themselves
#[utoipa::path(
    post,
    path = "/leaves",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    request_body = CreateLeave,
    responses(
        (status = 201, description = "Leave request created", body = Leave),
        (status = 400, description = "Invalid date range or day count"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Overlaps an existing pending/approved leave")
    )
)]
pub async fn create_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLeave>,
) -> AppResult<Created<Leave>> {
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::CreateLeave,
        Permission::RequestOwnLeave,
        Some(payload.employee_id),
    )?;

    let leave = state.leave_service.create_leave(payload).await?;
    Ok(Created(leave))
}

/// Amend a pending leave request
#[utoipa::path(
    put,
    path = "/leaves/{id}",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Leave request ID")),
    request_body = UpdateLeave,
    responses(
        (status = 200, description = "Leave request updated", body = Leave),
        (status = 400, description = "Request is not pending or range invalid"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Overlaps an existing pending/approved leave")
    )
)]
pub async fn update_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateLeave>,
) -> AppResult<Json<Leave>> {
    let leave = state.leave_service.get_leave(id).await?;

    state.policy.authorize_record(
        &current_user.actor(),
        Permission::UpdateLeave,
        Permission::RequestOwnLeave,
        Some(leave.employee_id),
    )?;

    let leave = state.leave_service.update_leave(id, payload).await?;
    Ok(Json(leave))
}

/// Delete a leave request
#[utoipa::path(
    delete,
    path = "/leaves/{id}",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Leave request ID")),
    responses(
        (status = 204, description = "Leave request deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::DeleteLeave)?;

    state.leave_service.delete_leave(id).await?;
    Ok(NoContent)
}

/// Approve a pending leave request
#[utoipa::path(
    post,
    path = "/leaves/{id}/approve",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request approved", body = Leave),
        (status = 400, description = "Request is not pending"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn approve_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Leave>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ApproveLeave)?;

    let leave = state.leave_service.approve_leave(id, current_user.id).await?;
    Ok(Json(leave))
}

/// Reject a pending leave request
#[utoipa::path(
    post,
    path = "/leaves/{id}/reject",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request rejected", body = Leave),
        (status = 400, description = "Request is not pending"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn reject_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Leave>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ApproveLeave)?;

    let leave = state.leave_service.reject_leave(id, current_user.id).await?;
    Ok(Json(leave))
}

/// Cancel a pending or approved leave that has not started yet
#[utoipa::path(
    post,
    path = "/leaves/{id}/cancel",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request cancelled", body = Leave),
        (status = 400, description = "Wrong status or leave already started"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_leave(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Leave>> {
    let leave = state.leave_service.get_leave(id).await?;

    // Owners cancel their own requests; managers may cancel anyone's
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::UpdateLeave,
        Permission::RequestOwnLeave,
        Some(leave.employee_id),
    )?;

    let leave = state.leave_service.cancel_leave(id).await?;
    Ok(Json(leave))
}

/// Annual-leave balance for an employee
#[utoipa::path(
    get,
    path = "/leaves/balance/{employee_id}",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("employee_id" = i32, Path, description = "Employee ID"), YearParams),
    responses(
        (status = 200, description = "Leave balance", body = LeaveBalance),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn leave_balance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    Query(params): Query<YearParams>,
) -> AppResult<Json<LeaveBalance>> {
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadLeave,
        Permission::ReadOwnLeave,
        Some(employee_id),
    )?;

    let year = params.year.unwrap_or_else(|| Local::now().year());
    let balance = state.leave_service.leave_balance(employee_id, year).await?;
    Ok(Json(balance))
}

/// Everyone on approved leave on a date
#[utoipa::path(
    get,
    path = "/leaves/calendar/{date}",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("date" = NaiveDate, Path, description = "Calendar date")),
    responses(
        (status = 200, description = "Leave calendar", body = LeaveCalendar),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn leave_calendar(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<LeaveCalendar>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadLeave)?;

    let calendar = state.leave_service.leave_calendar(date).await?;
    Ok(Json(calendar))
}
