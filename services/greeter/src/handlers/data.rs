use axum::extract::State;

use crate::domain::port::DataPort;
use crate::error::GreeterServiceError;
use crate::state::AppState;
use crate::usecase::fetch_data::FetchDataUseCase;

// ── GET /data ────────────────────────────────────────────────────────────────

pub async fn get_data<P>(State(state): State<AppState<P>>) -> Result<String, GreeterServiceError>
where
    P: DataPort + Clone + 'static,
{
    let usecase = FetchDataUseCase {
        port: state.data_client,
    };
    let data = usecase.execute().await?;
    Ok(format!("Data: {data}"))
}
