//! Tracing subscriber assembly: fmt output plus OTLP span export.

use crate::GIT_COMMIT_HASH;
use anyhow::Result;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime::Tokio, trace, Resource};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Install the global subscriber.
///
/// The default directive comes from the CLI verbosity (ERROR when absent);
/// `RUST_LOG` still overrides it. Spans export over OTLP with the service
/// identity, version, and commit as resource attributes.
///
/// # Errors
/// Returns an error if the OTLP pipeline cannot be installed or a global
/// subscriber is already set.
pub fn init(verbosity: Option<tracing::Level>) -> Result<()> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_timeout(Duration::from_secs(3));

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(trace::config().with_resource(resource()))
        .install_batch(Tokio)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity.unwrap_or(tracing::Level::ERROR).into())
        .from_env_lossy();

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(false),
        )
        .with(OpenTelemetryLayer::new(tracer))
        .with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn resource() -> Resource {
    Resource::new(vec![
        KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("service.commit", GIT_COMMIT_HASH),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::Value;

    #[test]
    fn resource_carries_service_identity() {
        let resource = resource();
        assert_eq!(
            resource.get("service.name".into()),
            Some(Value::from(env!("CARGO_PKG_NAME")))
        );
        assert_eq!(
            resource.get("service.version".into()),
            Some(Value::from(env!("CARGO_PKG_VERSION")))
        );
        assert!(resource.get("service.commit".into()).is_some());
    }
}
