//! Test utilities for greeter services.
//!
//! Provides `MockController` for hand-written trait mocks and an in-process
//! gRPC server standing in for the data service.
//! Import from tests only — never in production code.

pub mod grpc;
pub mod mock;

pub use mock::{Call, CallError, ControllerError, MockController, Receiver};
