//! Salary handlers.

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
    CreateSalary, Permission, Salary, SalaryFilter, SalaryRevision, UpdateSalary,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, PageParams, Paginated};

/// Optional as-of date for current-salary lookups
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AsOfParams {
    /// Date the rate should be effective on; defaults to today
    pub as_of: Option<NaiveDate>,
}

/// Create salary routes
pub fn salary_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_salaries).post(create_salary))
        .route("/:id", get(get_salary).put(update_salary).delete(delete_salary))
        .route("/employee/:employee_id/current", get(get_current_salary))
        .route("/employee/:employee_id/history", get(get_salary_history))
        .route(
            "/employee/:employee_id/update-current",
            post(update_current_salary),
        )
}

/// List salary records
#[utoipa::path(
    get,
    path = "/salaries",
    tag = "Salaries",
    security(("bearer_auth" = [])),
    params(PageParams, SalaryFilter),
    responses(
        (status = 200, description = "Paginated list of salary records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_salaries(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    Query(filter): Query<SalaryFilter>,
) -> AppResult<Json<Paginated<Salary>>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadSalary)?;

    let (items, total) = state
        .salary_service
        .list_salaries(params.clone(), filter)
        .await?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// Get salary record by ID; employees may fetch only their own
#[utoipa::path(
    get,
    path = "/salaries/{id}",
    tag = "Salaries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Salary record ID")),
    responses(
        (status = 200, description = "Salary record", body = Salary),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_salary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Salary>> {
    let salary = state.salary_service.get_salary(id).await?;

    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadSalary,
        Permission::ReadOwnSalary,
        Some(salary.employee_id),
    )?;

    Ok(Json(salary))
}

/// The salary in effect for an employee on a date
#[utoipa::path(
    get,
    path = "/salaries/employee/{employee_id}/current",
    tag = "Salaries",
    security(("bearer_auth" = [])),
    params(("employee_id" = i32, Path, description = "Employee ID"), AsOfParams),
    responses(
        (status = 200, description = "Current salary", body = Salary),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee or current salary not found")
    )
)]
pub async fn get_current_salary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    Query(params): Query<AsOfParams>,
) -> AppResult<Json<Salary>> {
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadSalary,
        Permission::ReadOwnSalary,
        Some(employee_id),
    )?;

    let salary = state
        .salary_service
        .current_salary(employee_id, params.as_of)
        .await?;
    Ok(Json(salary))
}

/// Full salary history for an employee, newest period first
#[utoipa::path(
    get,
    path = "/salaries/employee/{employee_id}/history",
    tag = "Salaries",
    security(("bearer_auth" = [])),
    params(("employee_id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Salary history", body = Vec<Salary>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_salary_history(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> AppResult<Json<Vec<Salary>>> {
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadSalary,
        Permission::ReadOwnSalary,
        Some(employee_id),
    )?;

    let history = state.salary_service.salary_history(employee_id).await?;
    Ok(Json(history))
}

/// Create a salary record
#[utoipa::path(
    post,
    path = "/salaries",
    tag = "Salaries",
    security(("bearer_auth" = [])),
    request_body = CreateSalary,
    responses(
        (status = 201, description = "Salary record created", body = Salary),
        (status = 400, description = "Invalid amount or period"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee already has an open salary period")
    )
)]
pub async fn create_salary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSalary>,
) -> AppResult<Created<Salary>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::CreateSalary)?;

    let salary = state.salary_service.create_salary(payload).await?;
    Ok(Created(salary))
}

/// Update a salary record
#[utoipa::path(
    put,
    path = "/salaries/{id}",
    tag = "Salaries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Salary record ID")),
    request_body = UpdateSalary,
    responses(
        (status = 200, description = "Salary record updated", body = Salary),
        (status = 400, description = "Invalid amount or period"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_salary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateSalary>,
) -> AppResult<Json<Salary>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::UpdateSalary)?;

    let salary = state.salary_service.update_salary(id, payload).await?;
    Ok(Json(salary))
}

/// Delete a salary record
#[utoipa::path(
    delete,
    path = "/salaries/{id}",
    tag = "Salaries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Salary record ID")),
    responses(
        (status = 204, description = "Salary record deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_salary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::DeleteSalary)?;

    state.salary_service.delete_salary(id).await?;
    Ok(NoContent)
}

/// Apply a rate change: close the open period and start a new one
#[utoipa::path(
    post,
    path = "/salaries/employee/{employee_id}/update-current",
    tag = "Salaries",
    security(("bearer_auth" = [])),
    params(("employee_id" = i32, Path, description = "Employee ID")),
    request_body = SalaryRevision,
    responses(
        (status = 200, description = "New open salary period", body = Salary),
        (status = 400, description = "Invalid amount"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_current_salary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SalaryRevision>,
) -> AppResult<Json<Salary>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::UpdateSalary)?;

    let salary = state
        .salary_service
        .update_current_salary(employee_id, payload)
        .await?;
    Ok(Json(salary))
}
