//! HTTP-facing errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use encounters::DbError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a handler can return.
///
/// Every variant answers with the bare status text; database details only go
/// to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The path or query could not be understood (e.g. a non-numeric `{id}`).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An `{id}` route matched no row.
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Database(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Database(err) if status.is_server_error() => {
                tracing::error!(error = %err, "database request failed");
            }
            _ => tracing::debug!(error = %self, "request rejected"),
        }
        let text = status.canonical_reason().unwrap_or("Error");
        (status, text).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(
            ApiError::BadRequest("id".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(DbError::not_found("no rows")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DbError::Other("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_details_stay_out_of_the_body() {
        let response = ApiError::from(DbError::Other("secret table name".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }
}
