//! Mock gRPC server helpers.
//!
//! Provides an in-process tonic server with a configurable `DataService`
//! reply, for testing the real gRPC client without an upstream.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::net::TcpListener;
use tonic::transport::Server;
use tonic::transport::server::TcpIncoming;
use tonic::{Code, Request, Response, Status};

use greeter_proto::data::data_service_server::{DataService, DataServiceServer};
use greeter_proto::data::{DoSomethingRequest, DoSomethingResponse};

#[derive(Clone)]
enum Reply {
    Data(String),
    Failure(Code, String),
}

/// `data.DataService` that answers every call with the same reply.
#[derive(Clone)]
pub struct MockDataServer {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl MockDataServer {
    /// Answer `DoSomething` with `data`.
    pub fn replying(data: impl Into<String>) -> Self {
        Self::with_reply(Reply::Data(data.into()))
    }

    /// Answer `DoSomething` with a status of `code`.
    pub fn failing(code: Code, message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Failure(code, message.into()))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `DoSomething` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Serve on an ephemeral localhost port in a background task.
    ///
    /// Returns the endpoint URL, e.g. `http://127.0.0.1:41234`.
    pub async fn spawn(&self) -> std::io::Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let incoming = TcpIncoming::from(listener);
        let service = DataServiceServer::new(self.clone());

        tokio::spawn(async move {
            if let Err(e) = Server::builder()
                .add_service(service)
                .serve_with_incoming(incoming)
                .await
            {
                tracing::error!(error = %e, "mock data server stopped");
            }
        });

        tracing::debug!(%addr, "mock data server listening");
        Ok(format!("http://{addr}"))
    }
}

#[tonic::async_trait]
impl DataService for MockDataServer {
    async fn do_something(
        &self,
        _request: Request<DoSomethingRequest>,
    ) -> Result<Response<DoSomethingResponse>, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Data(data) => Ok(Response::new(DoSomethingResponse { data: data.clone() })),
            Reply::Failure(code, message) => Err(Status::new(*code, message.clone())),
        }
    }
}
