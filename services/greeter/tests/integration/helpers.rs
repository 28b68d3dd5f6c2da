use axum_test::TestServer;

use greeter::domain::port::DataPort;
use greeter::error::GreeterServiceError;
use greeter::router::build_router;
use greeter::state::AppState;
use greeter_testing::{Call, MockController, Receiver};

// ── MockDataClient ───────────────────────────────────────────────────────────

/// Hand-written `DataPort` mock. Program it through [`MockDataClient::expect`].
#[derive(Clone)]
pub struct MockDataClient {
    ctrl: MockController,
    receiver: Receiver,
}

/// Records expectations for [`MockDataClient`].
pub struct MockDataClientRecorder<'a> {
    mock: &'a MockDataClient,
}

impl MockDataClient {
    pub fn new(ctrl: &MockController) -> Self {
        Self {
            ctrl: ctrl.clone(),
            receiver: ctrl.receiver("MockDataClient"),
        }
    }

    pub fn expect(&self) -> MockDataClientRecorder<'_> {
        MockDataClientRecorder { mock: self }
    }

    /// Calls matched so far on `do_something`.
    pub fn do_something_calls(&self) -> usize {
        self.ctrl.calls(&self.receiver, "do_something")
    }
}

impl MockDataClientRecorder<'_> {
    pub fn do_something(&self) -> Call<Result<String, GreeterServiceError>> {
        self.mock
            .ctrl
            .record_call(&self.mock.receiver, "do_something")
    }
}

impl DataPort for MockDataClient {
    async fn do_something(&self) -> Result<String, GreeterServiceError> {
        self.ctrl.call(&self.receiver, "do_something")
    }
}

// ── Servers ──────────────────────────────────────────────────────────────────

/// Full router backed by `data_client`, served in memory.
pub fn test_server<P>(data_client: P) -> TestServer
where
    P: DataPort + Clone + 'static,
{
    TestServer::new(build_router(AppState { data_client })).unwrap()
}
