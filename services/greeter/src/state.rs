use crate::infra::grpc::GrpcDataClient;

/// Shared application state passed to every handler via axum `State`.
///
/// Generic over the data port so tests can swap in a mock client.
#[derive(Clone)]
pub struct AppState<P = GrpcDataClient> {
    pub data_client: P,
}
