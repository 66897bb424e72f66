use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("db error: {0}")]
    Db(#[from] revisent_db::DbError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (status, code) = match err {
            AppError::InvalidInput(_)
            | AppError::Db(revisent_db::DbError::TimestampOutOfRange { .. }) => {
                (400, Some("invalid_input".to_string()))
            }
            AppError::NotFound(_) => (404, Some("not_found".to_string())),
            AppError::Db(_) | AppError::Io(_) | AppError::Serde(_) | AppError::Message(_) => {
                (500, None)
            }
        };
        Self {
            status,
            message: err.to_string(),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use revisent_db::DbError;

    #[test]
    fn unstorable_timestamps_are_client_errors() {
        let err = AppError::Db(DbError::TimestampOutOfRange {
            id: "d1".to_string(),
            timestamp: Utc::now(),
        });
        let api = ApiError::from(err);
        assert_eq!(api.status, 400);
        assert_eq!(api.code.as_deref(), Some("invalid_input"));
    }

    #[test]
    fn storage_failures_are_server_errors() {
        let api = ApiError::from(AppError::Message("boom".to_string()));
        assert_eq!(api.status, 500);
        assert!(api.code.is_none());
    }
}
