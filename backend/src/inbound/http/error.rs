//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while turning failures into the
//! `{"detail": ...}` bodies clients expect: the violation list for 422s and a
//! plain message otherwise. Server-side failures are logged and redacted.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

/// Error body: `detail` is a message string or a list of violations.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(value_type = Object)]
    pub detail: Value,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> ErrorBody {
    let detail = match error.code() {
        ErrorCode::InvalidRequest => error
            .details()
            .filter(|details| details.is_array())
            .cloned()
            .unwrap_or_else(|| Value::from(error.message())),
        ErrorCode::NotFound => Value::from(error.message()),
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id = ?error.trace_id(), message = error.message(), "store unavailable");
            Value::from(UNAVAILABLE_MESSAGE)
        }
        _ => {
            error!(trace_id = ?error.trace_id(), message = error.message(), "request failed");
            Value::from(INTERNAL_MESSAGE)
        }
    };
    ErrorBody { detail }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(body_for(self))
    }
}

#[cfg(test)]
mod tests;
