/// Greeter service configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreeterConfig {
    /// TCP port for the HTTP server (default 3000). Env var: `GREETER_PORT`.
    pub greeter_port: u16,
    /// gRPC endpoint for the data service. Env var: `DATA_GRPC_URL`.
    pub data_grpc_url: String,
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_GRPC_URL: &str = "http://127.0.0.1:50051";

impl GreeterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            greeter_port: lookup("GREETER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            data_grpc_url: lookup("DATA_GRPC_URL")
                .unwrap_or_else(|| DEFAULT_DATA_GRPC_URL.to_owned()),
        }
    }
}
