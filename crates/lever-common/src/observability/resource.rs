use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};

pub(crate) fn init_resource(service_name: String, service_version: String) -> Resource {
    Resource::default().merge(&Resource::new([
        KeyValue::new(SERVICE_NAME, service_name),
        KeyValue::new(SERVICE_VERSION, service_version),
    ]))
}
