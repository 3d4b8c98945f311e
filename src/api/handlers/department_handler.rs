//! Department handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateDepartment, Department, DepartmentFilter, Permission, UpdateDepartment};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, PageParams, Paginated};

/// Create department routes
pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/:id",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
}

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(PageParams, DepartmentFilter),
    responses(
        (status = 200, description = "Paginated list of departments"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_departments(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    Query(filter): Query<DepartmentFilter>,
) -> AppResult<Json<Paginated<Department>>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadDepartment)?;

    let (items, total) = state
        .department_service
        .list_departments(params.clone(), filter)
        .await?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = Department),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Department>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::ReadDepartment)?;

    let department = state.department_service.get_department(id).await?;
    Ok(Json(department))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Name or code already exists")
    )
)]
pub async fn create_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDepartment>,
) -> AppResult<Created<Department>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::CreateDepartment)?;

    let department = state.department_service.create_department(payload).await?;
    Ok(Created(department))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name or code already exists")
    )
)]
pub async fn update_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::UpdateDepartment)?;

    let department = state
        .department_service
        .update_department(id, payload)
        .await?;
    Ok(Json(department))
}

/// Delete a department; fails while employees are assigned to it
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Department still has employees")
    )
)]
pub async fn delete_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .policy
        .authorize(&current_user.actor(), Permission::DeleteDepartment)?;

    state.department_service.delete_department(id).await?;
    Ok(NoContent)
}
