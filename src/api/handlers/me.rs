//! Authenticated identity lookup.

use crate::auth::{utils::extract_bearer_token, AuthError, AuthFlow};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

/// Stored profile minus the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub sid: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Profile behind the presented bearer token", body = UserProfile),
        (status = 401, description = "Missing, malformed, expired, or stale token"),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn me(headers: HeaderMap, flow: Extension<Arc<AuthFlow>>) -> impl IntoResponse {
    let Some(bearer) = extract_bearer_token(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match flow.current_user(&bearer).await {
        Ok(user) => Json(UserProfile {
            sid: user.sid,
            email: user.email,
            firstname: user.firstname,
            lastname: user.lastname,
        })
        .into_response(),
        Err(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED.into_response(),
        Err(err) => {
            error!("Failed to resolve current user: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
