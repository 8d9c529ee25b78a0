//! Permission grant handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use tracing::info;

use sso_core::{AppId, UserId};
use sso_service::{
    CheckPermissionsRequest, UpdatePermissionsRequest, ValidateTokenRequest, ValidatedRequest,
};

use crate::dto::request::UpdatePermissionBody;
use crate::dto::response::{ApiResponse, IsAdminResponse, PermissionResponse};
use crate::error::ApiError;
use crate::extractors::BearerToken;
use crate::state::AppState;

type GrantPath = WithRejection<Path<(UserId, AppId)>, ApiError>;

/// GET /api/permissions/{user_id}/{app_id}
pub async fn check(
    State(state): State<AppState>,
    WithRejection(Path((user_id, app_id)), _): GrantPath,
) -> Result<Json<ApiResponse<PermissionResponse>>, ApiError> {
    let permission = state
        .auth
        .check_permissions(CheckPermissionsRequest { user_id, app_id })
        .await?;
    Ok(Json(ApiResponse::ok(PermissionResponse { permission })))
}

/// PUT /api/permissions/{user_id}/{app_id}
///
/// The request is checked first; then the bearer token must be valid for
/// `app_id` and belong to an admin of it.
pub async fn update(
    State(state): State<AppState>,
    WithRejection(Path((user_id, app_id)), _): GrantPath,
    token: BearerToken,
    WithRejection(Json(body), _): WithRejection<Json<UpdatePermissionBody>, ApiError>,
) -> Result<Json<ApiResponse<PermissionResponse>>, ApiError> {
    let req = UpdatePermissionsRequest {
        user_id,
        app_id,
        permission: body.permission,
    };
    req.check()?;

    let acting = state
        .auth
        .validate_token(ValidateTokenRequest {
            token: token.0,
            app_id,
        })
        .await?;

    let grant = state.auth.authorize_admin(acting.user_id, app_id).await?;

    let permission = req.permission.clone();
    state.auth.update_permissions(&grant, req).await?;

    info!(
        acting_user_id = %acting.user_id,
        user_id = %user_id,
        app_id = %app_id,
        "Permission updated via API"
    );

    Ok(Json(ApiResponse::ok(PermissionResponse { permission })))
}

/// GET /api/permissions/{user_id}/{app_id}/admin
pub async fn is_admin(
    State(state): State<AppState>,
    WithRejection(Path((user_id, app_id)), _): GrantPath,
) -> Result<Json<ApiResponse<IsAdminResponse>>, ApiError> {
    let is_admin = state
        .auth
        .is_admin(CheckPermissionsRequest { user_id, app_id })
        .await?;
    Ok(Json(ApiResponse::ok(IsAdminResponse { is_admin })))
}
