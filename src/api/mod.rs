//! HTTP server wiring: database pool, migrations, routes, and middleware.

use crate::auth::{AuthConfig, AuthFlow};
use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, Request,
    },
    routing::{get, post},
    Extension, Router,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use url::Url;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub(crate) mod email;
pub mod handlers;
mod openapi;

pub use self::email::{EmailSender, LogEmailSender, SmtpConfig, SmtpSender};

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn serve(
    port: u16,
    dsn: String,
    config: AuthConfig,
    sender: Arc<dyn email::EmailSender>,
) -> Result<()> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let frontend_origin = frontend_origin(config.frontend_origin())?;
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(AllowOrigin::exact(frontend_origin))
        .allow_credentials(true);

    let flow = Arc::new(AuthFlow::new(pool.clone(), config, sender));

    let app = router()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(flow))
                .layer(Extension(pool)),
        );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

/// All documented routes, without middleware.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route(
            "/health",
            get(handlers::health::health).options(handlers::health::health),
        )
        .route("/token", post(handlers::token::token))
        .route("/otp", post(handlers::otp::send_otp))
        .route("/otp/qr", get(handlers::otp::provisioning_qr))
        .route("/signup", post(handlers::signup::signup))
        .route("/me", get(handlers::me::me))
        .route(
            "/projects",
            post(handlers::catalog::create_project).get(handlers::catalog::get_projects),
        )
        .route(
            "/courses",
            post(handlers::catalog::create_course).get(handlers::catalog::get_courses),
        )
        .route(
            "/professors",
            post(handlers::catalog::create_professor).get(handlers::catalog::get_professors),
        )
        .route(
            "/tasks",
            post(handlers::catalog::create_task).get(handlers::catalog::get_tasks),
        )
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn frontend_origin(frontend_base_url: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(frontend_base_url)
        .with_context(|| format!("Invalid frontend base URL: {frontend_base_url}"))?;
    let host = parsed.host_str().ok_or_else(|| {
        anyhow!("Frontend base URL must include a valid host: {frontend_base_url}")
    })?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build frontend origin header")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_origin_strips_path_and_keeps_port() -> Result<()> {
        let origin = frontend_origin("http://localhost:5173/app/")?;
        assert_eq!(origin, HeaderValue::from_static("http://localhost:5173"));

        let origin = frontend_origin("https://app.example.com")?;
        assert_eq!(origin, HeaderValue::from_static("https://app.example.com"));
        Ok(())
    }

    #[test]
    fn frontend_origin_rejects_invalid_urls() {
        assert!(frontend_origin("not a url").is_err());
        assert!(frontend_origin("unix:/var/run/sock").is_err());
    }
}
