use axum::extract::rejection::{ JsonRejection, QueryRejection };
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("{0} not found")] NotFound(&'static str),

    #[error("user already exists")]
    UserExists,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")] Unauthorized(&'static str),

    #[error("Token error: {0}")] Token(String),

    #[error("Password hashing error: {0}")] PasswordHash(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

/// JSON error body.
///
/// Resource errors carry `error` and `code`; auth errors carry a bare
/// `message`, which is what the dashboard's auth forms display.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
#[serde(untagged)]
pub enum ErrorResponse {
    Detail {
        error: String,
        code: String,
    },
    Message {
        message: String,
    },
}

impl AppError {
    /// Store failures on create/update are reported to the client as bad
    /// requests, the same way schema violations are.
    pub fn into_bad_request(self) -> Self {
        match self {
            AppError::Database(e) => AppError::InvalidInput(e.to_string()),
            other => other,
        }
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) | AppError::UserExists => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let (code, message) = match self {
            AppError::UserExists | AppError::InvalidCredentials => {
                return ErrorResponse::Message { message: self.to_string() };
            }
            AppError::Unauthorized(reason) => {
                return ErrorResponse::Message { message: reason.to_string() };
            }
            AppError::Database(e) => ("DATABASE_ERROR", e.to_string()),
            AppError::InvalidInput(msg) => ("INVALID_INPUT", msg.clone()),
            AppError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            AppError::Token(msg) => ("TOKEN_ERROR", msg.clone()),
            AppError::PasswordHash(msg) => ("PASSWORD_HASH_ERROR", msg.clone()),
            AppError::Config(msg) => ("CONFIG_ERROR", msg.clone()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        ErrorResponse::Detail {
            error: message,
            code: code.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let response = self.to_error_response();
        (status, axum::Json(response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
