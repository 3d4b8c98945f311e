//! Attendance handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    Attendance, AttendanceFilter, CheckIn, CheckOut, CreateAttendance, DailyAttendanceSummary,
    MonthlyAttendanceReport, Permission, UpdateAttendance,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, PageParams, Paginated};

/// Month selector for the monthly report
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthParams {
    pub month: u32,
    pub year: i32,
}

/// Day selector for the daily summary
#[derive(Debug, Deserialize, IntoParams)]
pub struct DailySummaryParams {
    pub date: NaiveDate,
    pub department_id: Option<i32>,
}

/// Create attendance routes
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendances).post(create_attendance))
        .route("/check-in", post(check_in))
        .route("/check-out", post(check_out))
        .route("/report/monthly/:employee_id", get(monthly_report))
        .route("/summary/daily", get(daily_summary))
        .route(
            "/:id",
            get(get_attendance)
                .put(update_attendance)
                .delete(delete_attendance),
        )
}

/// List attendance records; employees see only their own
#[utoipa::path(
    get,
    path = "/attendances",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(PageParams, AttendanceFilter),
    responses(
        (status = 200, description = "Paginated list of attendance records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_attendances(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    Query(filter): Query<AttendanceFilter>,
) -> AppResult<Json<Paginated<Attendance>>> {
    // Without the blanket permission the request must target own records
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadAttendance,
        Permission::ReadOwnAttendance,
        filter.employee_id,
    )?;

    let (items, total) = state
        .attendance_service
        .list_attendances(params.clone(), filter)
        .await?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// Get attendance record by ID; employees may fetch only their own
#[utoipa::path(
    get,
    path = "/attendances/{id}",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Attendance record", body = Attendance),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_attendance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Attendance>> {
    let attendance = state.attendance_service.get_attendance(id).await?;

    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadAttendance,
        Permission::ReadOwnAttendance,
        Some(attendance.employee_id),
    )?;

    Ok(Json(attendance))
}

/// Create an attendance record manually
#[utoipa::path(
    post,
    path = "/attendances",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance record created", body = Attendance),
        (status = 400, description = "Invalid times"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Record for this employee and date exists")
    )
)]
pub async fn create_attendance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAttendance>,
) -> AppResult<Created<Attendance>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::CreateAttendance)?;

    let attendance = state.attendance_service.create_attendance(payload).await?;
    Ok(Created(attendance))
}

/// Check in; status is derived from the arrival time
#[utoipa::path(
    post,
    path = "/attendances/check-in",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    request_body = CheckIn,
    responses(
        (status = 201, description = "Checked in", body = Attendance),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Already checked in for this date")
    )
)]
pub async fn check_in(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CheckIn>,
) -> AppResult<Created<Attendance>> {
    // Employees mark their own attendance; managers may record for anyone
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::CreateAttendance,
        Permission::MarkOwnAttendance,
        Some(payload.employee_id),
    )?;

    let attendance = state.attendance_service.check_in(payload).await?;
    Ok(Created(attendance))
}

/// Check out on an existing record
#[utoipa::path(
    post,
    path = "/attendances/check-out",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    request_body = CheckOut,
    responses(
        (status = 200, description = "Checked out", body = Attendance),
        (status = 400, description = "Already checked out or invalid time"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No check-in record for this date")
    )
)]
pub async fn check_out(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CheckOut>,
) -> AppResult<Json<Attendance>> {
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::UpdateAttendance,
        Permission::MarkOwnAttendance,
        Some(payload.employee_id),
    )?;

    let attendance = state.attendance_service.check_out(payload).await?;
    Ok(Json(attendance))
}

/// Update an attendance record
#[utoipa::path(
    put,
    path = "/attendances/{id}",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Attendance record ID")),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance record updated", body = Attendance),
        (status = 400, description = "Invalid times"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_attendance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateAttendance>,
) -> AppResult<Json<Attendance>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::UpdateAttendance)?;

    let attendance = state
        .attendance_service
        .update_attendance(id, payload)
        .await?;
    Ok(Json(attendance))
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/attendances/{id}",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Attendance record ID")),
    responses(
        (status = 204, description = "Attendance record deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_attendance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::DeleteAttendance)?;

    state.attendance_service.delete_attendance(id).await?;
    Ok(NoContent)
}

/// Monthly attendance report for an employee
#[utoipa::path(
    get,
    path = "/attendances/report/monthly/{employee_id}",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(("employee_id" = i32, Path, description = "Employee ID"), MonthParams),
    responses(
        (status = 200, description = "Monthly report", body = MonthlyAttendanceReport),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn monthly_report(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    Query(params): Query<MonthParams>,
) -> AppResult<Json<MonthlyAttendanceReport>> {
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadAttendance,
        Permission::ReadOwnAttendance,
        Some(employee_id),
    )?;

    let report = state
        .attendance_service
        .monthly_report(employee_id, params.year, params.month)
        .await?;
    Ok(Json(report))
}

/// Daily attendance summary, optionally per department
#[utoipa::path(
    get,
    path = "/attendances/summary/daily",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(DailySummaryParams),
    responses(
        (status = 200, description = "Daily summary", body = DailyAttendanceSummary),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn daily_summary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<DailySummaryParams>,
) -> AppResult<Json<DailyAttendanceSummary>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadAttendance)?;

    let summary = state
        .attendance_service
        .daily_summary(params.date, params.department_id)
        .await?;
    Ok(Json(summary))
}
