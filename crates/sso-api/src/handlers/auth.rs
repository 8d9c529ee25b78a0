//! Auth handlers: register, login, validate.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;

use sso_auth::TokenIdentity;
use sso_service::{LoginRequest, RegisterRequest, ValidateTokenRequest};

use crate::dto::request::AppQuery;
use crate::dto::response::{ApiResponse, LoginResponse, RegisterResponse};
use crate::error::ApiError;
use crate::extractors::BearerToken;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let user_id = state.auth.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(RegisterResponse { user_id })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let token = state.auth.login(req).await?;
    Ok(Json(ApiResponse::ok(LoginResponse { token })))
}

/// GET /api/auth/validate?app_id=
pub async fn validate(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<AppQuery>, ApiError>,
    token: BearerToken,
) -> Result<Json<ApiResponse<TokenIdentity>>, ApiError> {
    let identity = state
        .auth
        .validate_token(ValidateTokenRequest {
            token: token.0,
            app_id: query.app_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok(identity)))
}
