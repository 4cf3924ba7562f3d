use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::utils::validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Empty signing key")]
    EmptySigningKey,
    #[error("Hash cost {0} is outside the supported range")]
    HashCost(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Record already exists")]
    Duplicate,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Record not found")]
    NotFound,
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Expired JWT")]
    ExpiredJWT,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Header decode error: {0}")]
    HeaderDecode(#[from] axum::http::header::ToStrError),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Validation(errors) => {
                tracing::debug!(fields = ?errors.fields(), "rejected request input");
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": errors })),
                )
                    .into_response();
            }
            Error::Duplicate => (StatusCode::CONFLICT, "Record already exists"),
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Error::NotFound => (StatusCode::NOT_FOUND, "Record not found"),
            Error::NoCredentials => (StatusCode::UNAUTHORIZED, "No credentials provided"),
            Error::ExpiredJWT => (StatusCode::UNAUTHORIZED, "Expired JWT"),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Error::HeaderDecode(_) => (StatusCode::BAD_REQUEST, "Header decode error"),
            e @ (Error::Sql(_) | Error::Bcrypt(_) | Error::Jwt(_) | Error::Join(_)) => {
                tracing::error!("{:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The server encountered a problem and could not process your request",
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
