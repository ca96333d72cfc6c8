use axum::{Json, extract::State, http::HeaderMap};
use cinevote_model::{LoginRequest, LoginResponse, RefreshResponse, RegisterRequest, User};

use super::extract::ApiJson;
use crate::auth::extract_bearer_token;
use crate::infra::{app_state::AppState, errors::AppResult};

/// `POST /users/register`
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> AppResult<Json<User>> {
    let user = state.auth.register(request).await?;
    Ok(Json(user))
}

/// `POST /users/token`
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state.auth.authenticate(request).await?;
    Ok(Json(session))
}

/// `POST /users/refresh`, with the refresh token as bearer credential.
pub async fn refresh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<RefreshResponse>> {
    let refresh_token = extract_bearer_token(&headers)?;
    let access_token = state.auth.refresh(refresh_token).await?;
    Ok(Json(RefreshResponse { access_token }))
}
