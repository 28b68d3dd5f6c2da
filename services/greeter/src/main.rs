use tracing::info;

use greeter::config::GreeterConfig;
use greeter::infra::grpc::GrpcDataClient;
use greeter::router::build_router;
use greeter::state::AppState;
use greeter_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = GreeterConfig::from_env();

    // Lazy so the service comes up even when the data service is down.
    let data_client =
        GrpcDataClient::lazy(&config.data_grpc_url).expect("invalid DATA_GRPC_URL");

    let state = AppState { data_client };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.greeter_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(data_grpc_url = %config.data_grpc_url, "greeter service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
