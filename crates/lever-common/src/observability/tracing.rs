use opentelemetry::global;
use opentelemetry::trace::TraceError;
use opentelemetry_otlp::{
    ExportConfig, HttpExporterBuilder, SpanExporterBuilder, TonicExporterBuilder, WithExportConfig,
};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::runtime::Tokio;
use opentelemetry_sdk::trace::{Sampler, Tracer};
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{Config, OtelExporter};
use crate::observability::resource::init_resource;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to install `opentelemetry` tracer: {0}")]
    Tracer(#[from] TraceError),
    #[error("Failed to install `tracing` subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Installs the global `tracing` subscriber. Spans are exported over OTLP
/// unless the configured exporter is `disabled`; the filter comes from
/// `RUST_LOG` and falls back to `INFO`.
///
/// Must be called from within a Tokio runtime when exporting.
pub fn init_tracer(service_name: String, service_version: String, config: &Config) -> Result<(), Error> {
    let telemetry = match span_exporter(config) {
        Some(exporter) => {
            let tracer = install_tracer(exporter, service_name, service_version, config)?;
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("INFO"));
    let subscriber = Registry::default().with(telemetry).with(env_filter);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Flushes pending spans. A no-op when no exporter was installed.
pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
}

fn span_exporter(config: &Config) -> Option<SpanExporterBuilder> {
    let export_config = ExportConfig {
        endpoint: config.otel_exporter_endpoint.to_string(),
        ..Default::default()
    };

    match config.otel_exporter {
        OtelExporter::Disabled => None,
        OtelExporter::OtlpHttp => Some(SpanExporterBuilder::Http(
            HttpExporterBuilder::default().with_export_config(export_config),
        )),
        OtelExporter::OtlpGrpc => Some(SpanExporterBuilder::Tonic(
            TonicExporterBuilder::default().with_export_config(export_config),
        )),
    }
}

fn install_tracer(
    exporter: SpanExporterBuilder,
    service_name: String,
    service_version: String,
    config: &Config,
) -> Result<Tracer, TraceError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            opentelemetry_sdk::trace::config()
                .with_sampler(Sampler::TraceIdRatioBased(config.otel_sample_rate))
                .with_resource(init_resource(service_name, service_version)),
        )
        .install_batch(Tokio)
}
