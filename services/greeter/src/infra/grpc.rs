use anyhow::Context as _;
use tonic::Code;
use tonic::transport::Channel;

use greeter_proto::data::{DoSomethingRequest, data_service_client::DataServiceClient};

use crate::domain::port::DataPort;
use crate::error::GreeterServiceError;

/// gRPC client implementing `DataPort` via `data.DataService`.
#[derive(Clone)]
pub struct GrpcDataClient {
    client: DataServiceClient<Channel>,
}

impl GrpcDataClient {
    pub async fn connect(url: &str) -> Result<Self, GreeterServiceError> {
        let client = DataServiceClient::connect(url.to_owned())
            .await
            .context("connect to data gRPC")?;
        Ok(Self { client })
    }

    /// Create a client with lazy connection (connects on first RPC call).
    pub fn lazy(url: &str) -> Result<Self, GreeterServiceError> {
        let channel = Channel::from_shared(url.to_owned())
            .context("invalid data gRPC URL")?
            .connect_lazy();
        Ok(Self {
            client: DataServiceClient::new(channel),
        })
    }
}

impl DataPort for GrpcDataClient {
    async fn do_something(&self) -> Result<String, GreeterServiceError> {
        let response = self
            .client
            .clone()
            .do_something(DoSomethingRequest {})
            .await;
        match response {
            Ok(resp) => Ok(resp.into_inner().data),
            Err(status) if status.code() == Code::Unavailable => {
                tracing::warn!(detail = status.message(), "data service unavailable");
                Err(GreeterServiceError::UpstreamUnavailable)
            }
            Err(e) => Err(anyhow::anyhow!("gRPC DoSomething failed: {e}").into()),
        }
    }
}
