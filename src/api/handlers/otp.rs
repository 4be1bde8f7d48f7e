//! OTP issuance: email delivery of the current code, and QR provisioning
//! for authenticator apps.

use crate::auth::{AuthError, AuthFlow};
use axum::{
    extract::{Extension, Query},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct OtpRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OtpSent {
    pub otp_sent: bool,
}

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/otp",
    request_body = OtpRequest,
    responses(
        (status = 200, description = "Code emailed to the given address", body = OtpSent),
        (status = 400, description = "Malformed email"),
        (status = 502, description = "Email delivery failed"),
    ),
    tag = "auth"
)]
pub async fn send_otp(
    flow: Extension<Arc<AuthFlow>>,
    Json(request): Json<OtpRequest>,
) -> impl IntoResponse {
    match flow.request_otp(&request.email).await {
        Ok(()) => Json(OtpSent { otp_sent: true }).into_response(),
        Err(AuthError::Validation(reason)) => (StatusCode::BAD_REQUEST, reason).into_response(),
        Err(AuthError::Delivery(reason)) => {
            error!("OTP delivery failed: {reason}");
            (StatusCode::BAD_GATEWAY, "Failed to send OTP email").into_response()
        }
        Err(err) => {
            error!("OTP issuance failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/otp/qr",
    params(("email" = String, Query, description = "Address to enroll")),
    responses(
        (status = 200, description = "PNG QR code with the otpauth provisioning URL", content_type = "image/png"),
        (status = 400, description = "Malformed email"),
    ),
    tag = "auth"
)]
pub async fn provisioning_qr(
    flow: Extension<Arc<AuthFlow>>,
    Query(query): Query<QrQuery>,
) -> impl IntoResponse {
    match flow.provisioning_qr(&query.email).await {
        Ok(png) => ([(CONTENT_TYPE, "image/png")], png).into_response(),
        Err(AuthError::Validation(reason)) => (StatusCode::BAD_REQUEST, reason).into_response(),
        Err(err) => {
            error!("QR provisioning failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
