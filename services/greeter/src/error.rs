use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Greeter service error variants.
#[derive(Debug, thiserror::Error)]
pub enum GreeterServiceError {
    #[error("upstream unavailable")]
    UpstreamUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GreeterServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for GreeterServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
