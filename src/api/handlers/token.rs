//! Password login issuing bearer session tokens.

use crate::auth::{AuthError, AuthFlow};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
    Form,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

/// OAuth2-style password grant form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[utoipa::path(
    post,
    path = "/token",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Credentials accepted, session token issued", body = Token),
        (status = 400, description = "Unknown email or wrong password"),
    ),
    tag = "auth"
)]
pub async fn token(
    flow: Extension<Arc<AuthFlow>>,
    Form(request): Form<TokenRequest>,
) -> impl IntoResponse {
    match flow.login(&request.username, &request.password).await {
        Ok((_user, access_token)) => Json(Token {
            access_token,
            token_type: "bearer".to_string(),
        })
        .into_response(),
        // Unknown user and bad password answer identically
        Err(AuthError::InvalidCredentials | AuthError::Validation(_)) => {
            (StatusCode::BAD_REQUEST, "Incorrect username or password").into_response()
        }
        Err(err) => {
            error!("Login failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
