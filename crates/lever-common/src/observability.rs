mod resource;
pub mod tracing;
