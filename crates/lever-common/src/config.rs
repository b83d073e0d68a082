use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "Config::default_database_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "Config::default_otel_exporter_endpoint")]
    pub otel_exporter_endpoint: String,
    #[serde(default)]
    pub otel_exporter: OtelExporter,
    #[serde(default = "Config::default_otel_sample_rate")]
    pub otel_sample_rate: f64,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OtelExporter {
    #[default]
    Disabled,
    OtlpGrpc,
    OtlpHttp,
}

impl Config {
    pub fn new() -> envy::Result<Self> {
        let config = envy::from_env::<Config>()?;
        Ok(config)
    }

    /// Reads the configuration from explicit key/value pairs instead of the process environment.
    pub fn from_pairs<I>(pairs: I) -> envy::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }

    fn default_database_max_connections() -> u32 {
        10
    }

    fn default_otel_exporter_endpoint() -> String {
        "http://localhost:4317".into()
    }

    fn default_otel_sample_rate() -> f64 {
        1.0
    }
}
