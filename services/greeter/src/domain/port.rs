use std::future::Future;

use crate::error::GreeterServiceError;

/// Remote data source, backed by `data.DataService` in production.
///
/// The returned future is `Send` so generic axum handlers can await it.
/// Implementors may still write `async fn do_something`.
pub trait DataPort: Send + Sync {
    fn do_something(&self) -> impl Future<Output = Result<String, GreeterServiceError>> + Send;
}
