//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Actor, UserRole};
use crate::errors::AppError;

/// Authenticated user extracted from the JWT token and refreshed
/// against the user store.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    pub employee_id: Option<i32>,
    pub is_active: bool,
}

impl CurrentUser {
    /// View as an authorization actor
    pub fn actor(&self) -> Actor {
        Actor {
            role: self.role,
            employee_id: self.employee_id,
            is_active: self.is_active,
        }
    }
}

/// JWT authentication middleware.
///
/// Validates the bearer token, then reloads the account so deactivation
/// and role changes take effect before the token expires. The permission
/// table sees an inactive account as holding no permissions, so such
/// requests fail at the authorization step.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let user = state
        .user_service
        .get_user(claims.sub)
        .await
        .map_err(|_| AppError::Unauthorized)?;

    let current_user = CurrentUser {
        id: user.id,
        username: user.username,
        role: user.role,
        employee_id: user.employee_id,
        is_active: user.is_active,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
