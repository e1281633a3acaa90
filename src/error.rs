use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug};

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn is_internal_error(&self) -> bool {
        (1..=99).contains(&self.code)
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == 101
    }

    pub fn is_not_found_error(&self) -> bool {
        self.code == 102
    }

    pub fn invalid_input_error() -> Self {
        Error {
            code: 101,
            message: "invalid input".into(),
        }
    }

    pub fn not_found_error() -> Self {
        Error {
            code: 102,
            message: "not found".into(),
        }
    }

    pub fn env_var_error<T: Debug>(err: T) -> Self {
        tracing::error!(?err, "environment variable error");
        Error {
            code: 1,
            message: "environment variable error".into(),
        }
    }

    pub fn database_error<T: Debug>(err: T) -> Self {
        tracing::error!(?err, "database error");
        Error {
            code: 2,
            message: "database error".into(),
        }
    }

    pub fn io_error<T: Debug>(err: T) -> Self {
        tracing::error!(?err, "io error");
        Error {
            code: 3,
            message: "io error".into(),
        }
    }

    pub fn serialization_error<T: Debug>(err: T) -> Self {
        tracing::error!(?err, "serialization error");
        Error {
            code: 4,
            message: "serialization error".into(),
        }
    }

    pub fn unexpected_error() -> Self {
        Error {
            code: 5,
            message: "unexpected error".into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        Error::env_var_error(err)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::env_var_error(err)
    }
}

impl From<std::net::AddrParseError> for Error {
    fn from(err: std::net::AddrParseError) -> Self {
        Error::env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::database_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            102 => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
