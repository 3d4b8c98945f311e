//! Employee handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateEmployee, Employee, EmployeeFilter, Permission, UpdateEmployee};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent, PageParams, Paginated};

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/me", get(get_my_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// List employees
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(PageParams, EmployeeFilter),
    responses(
        (status = 200, description = "Paginated list of employees"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_employees(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    Query(filter): Query<EmployeeFilter>,
) -> AppResult<Json<Paginated<Employee>>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadEmployee)?;

    let (items, total) = state
        .employee_service
        .list_employees(params.clone(), filter)
        .await?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// Get the authenticated user's own employee record
#[utoipa::path(
    get,
    path = "/employees/me",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own employee record", body = Employee),
        (status = 404, description = "No employee record linked to this user")
    )
)]
pub async fn get_my_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Employee>> {
    let actor = current_user.actor();
    if !state.policy.has_permission(&actor, Permission::ReadEmployee)
        && !state.policy.has_permission(&actor, Permission::ReadOwnEmployeeData)
    {
        return Err(AppError::Forbidden);
    }

    // A user without a linked employee has no record to return
    let employee_id = current_user.employee_id.ok_or(AppError::NotFound)?;
    let employee = state.employee_service.get_employee(employee_id).await?;
    Ok(Json(employee))
}

/// Get employee by ID; employees may fetch only their own record
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Employee>> {
    state.policy.authorize_record(
        &current_user.actor(),
        Permission::ReadEmployee,
        Permission::ReadOwnEmployeeData,
        Some(id),
    )?;

    let employee = state.employee_service.get_employee(id).await?;
    Ok(Json(employee))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Referenced department or position missing"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Employee code or email already exists")
    )
)]
pub async fn create_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployee>,
) -> AppResult<Created<Employee>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::CreateEmployee)?;

    let employee = state.employee_service.create_employee(payload).await?;
    Ok(Created(employee))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Employee code or email already exists")
    )
)]
pub async fn update_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::UpdateEmployee)?;

    let employee = state.employee_service.update_employee(id, payload).await?;
    Ok(Json(employee))
}

/// Delete an employee (soft delete: flips the status to terminated)
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee terminated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::DeleteEmployee)?;

    state.employee_service.terminate_employee(id).await?;
    Ok(NoContent)
}
