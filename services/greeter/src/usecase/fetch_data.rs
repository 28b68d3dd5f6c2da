use crate::domain::port::DataPort;
use crate::error::GreeterServiceError;

// ── FetchData ────────────────────────────────────────────────────────────────

pub struct FetchDataUseCase<P: DataPort> {
    pub port: P,
}

impl<P: DataPort> FetchDataUseCase<P> {
    pub async fn execute(&self) -> Result<String, GreeterServiceError> {
        let data = self.port.do_something().await?;
        tracing::debug!(len = data.len(), "fetched data");
        Ok(data)
    }
}
