use axum::http::StatusCode;
use greeter::domain::port::DataPort;
use greeter::error::GreeterServiceError;
use greeter::infra::grpc::GrpcDataClient;
use greeter_testing::grpc::MockDataServer;
use tonic::Code;

use crate::helpers::test_server;

#[tokio::test]
async fn should_return_data_from_server() {
    let server = MockDataServer::replying("fake data");
    let url = server.spawn().await.unwrap();

    let client = GrpcDataClient::connect(&url).await.unwrap();
    let data = client.do_something().await.unwrap();

    assert_eq!(data, "fake data");
    assert_eq!(server.calls(), 1);
}

#[tokio::test]
async fn should_map_unavailable_status() {
    let server = MockDataServer::failing(Code::Unavailable, "draining");
    let url = server.spawn().await.unwrap();

    let client = GrpcDataClient::connect(&url).await.unwrap();
    let result = client.do_something().await;

    assert!(
        matches!(result, Err(GreeterServiceError::UpstreamUnavailable)),
        "expected UpstreamUnavailable, got {result:?}"
    );
}

#[tokio::test]
async fn should_map_other_status_to_internal() {
    let server = MockDataServer::failing(Code::PermissionDenied, "nope");
    let url = server.spawn().await.unwrap();

    let client = GrpcDataClient::connect(&url).await.unwrap();
    let result = client.do_something().await;

    assert!(
        matches!(result, Err(GreeterServiceError::Internal(_))),
        "expected Internal, got {result:?}"
    );
}

#[tokio::test]
async fn should_serve_data_through_lazy_client() {
    let upstream = MockDataServer::replying("from upstream");
    let url = upstream.spawn().await.unwrap();

    let client = GrpcDataClient::lazy(&url).unwrap();
    let resp = test_server(client).get("/data").await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(resp.text(), "Data: from upstream");
    assert_eq!(upstream.calls(), 1);
}
