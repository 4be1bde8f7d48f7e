//! OTP-gated account creation.

use crate::{
    auth::{AuthError, AuthFlow},
    store::NewUser,
};
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupStatus {
    pub status: String,
}

impl SignupStatus {
    fn new(status: &str) -> Json<Self> {
        Json(Self {
            status: status.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SignupQuery {
    pub otp: u32,
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    params(("otp" = u32, Query, description = "Current code for the signup email")),
    responses(
        (status = 201, description = "Account created", body = SignupStatus),
        (status = 400, description = "Code does not match, or payload invalid", body = SignupStatus),
        (status = 409, description = "Email already registered", body = SignupStatus),
    ),
    tag = "auth"
)]
pub async fn signup(
    flow: Extension<Arc<AuthFlow>>,
    Query(query): Query<SignupQuery>,
    Json(request): Json<SignupRequest>,
) -> impl IntoResponse {
    let user = NewUser {
        email: request.email,
        firstname: request.firstname,
        lastname: request.lastname,
    };

    match flow.signup(user, request.password, query.otp).await {
        Ok(_record) => (StatusCode::CREATED, SignupStatus::new("success")).into_response(),
        Err(AuthError::Conflict) => {
            (StatusCode::CONFLICT, SignupStatus::new("failed")).into_response()
        }
        Err(AuthError::OtpMismatch) => {
            (StatusCode::BAD_REQUEST, SignupStatus::new("otp is wrong")).into_response()
        }
        Err(AuthError::Validation(reason)) => (StatusCode::BAD_REQUEST, reason).into_response(),
        Err(err) => {
            error!("Signup failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                SignupStatus::new("failed"),
            )
                .into_response()
        }
    }
}
