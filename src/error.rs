//! Translation of storage and request failures into HTTP responses.
//!
//! Every failure leaves the service as a JSON body of the shape
//! `{"msg": "..."}`. Storage errors are classified by SQLSTATE (Postgres)
//! or by sea-orm's backend-neutral [`SqlErr`] where one exists.
use poem::{
    Response,
    error::{MethodNotAllowedError, NotFoundError, ResponseError},
    http::StatusCode,
};
use poem_openapi::error::{ParseParamError, ParseRequestPayloadError};
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

pub const BAD_REQUEST: &str = "Bad request";
pub const NOT_FOUND: &str = "Not found";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const INTERNAL: &str = "Internal Server Error";

/// Postgres SQLSTATE codes that mean the client sent a value the column
/// cannot hold.
const BAD_INPUT_STATES: [&str; 6] = [
    "22P02", // invalid_text_representation
    "22003", // numeric_value_out_of_range
    "23502", // not_null_violation
    "23505", // unique_violation
    "2201W", // invalid_row_count_in_limit_clause
    "2201X", // invalid_row_count_in_result_offset_clause
];

const FOREIGN_KEY_STATE: &str = "23503";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request() -> Self {
        ApiError::BadRequest(BAD_REQUEST.to_string())
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{what} not found"))
    }

    /// Message exposed to the client. Internal detail never leaves the process.
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg,
            ApiError::Internal(_) => INTERNAL,
        }
    }
}

impl ResponseError for ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_response(&self) -> Response {
        msg_response(self.status(), self.message())
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
            debug!("Referenced row missing: {err}");
            return ApiError::NotFound(NOT_FOUND.to_string());
        }

        match sql_state(&err).as_deref() {
            Some(FOREIGN_KEY_STATE) => {
                debug!("Referenced row missing: {err}");
                ApiError::NotFound(NOT_FOUND.to_string())
            }
            Some(state) if BAD_INPUT_STATES.contains(&state) => {
                debug!("Storage rejected input ({state}): {err}");
                ApiError::bad_request()
            }
            _ => {
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    debug!("Duplicate key: {err}");
                    return ApiError::bad_request();
                }
                error!("Storage failure: {err:?}");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

fn sql_state(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Query(RuntimeErr::SqlxError(e)) | DbErr::Exec(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .map(|code| code.into_owned()),
        _ => None,
    }
}

pub fn msg_response(status: StatusCode, msg: &str) -> Response {
    Response::builder()
        .status(status)
        .content_type("application/json; charset=utf-8")
        .body(json!({ "msg": msg }).to_string())
}

/// Unmatched routes get the same body shape as handler errors.
pub async fn route_not_found(_: NotFoundError) -> Response {
    msg_response(StatusCode::NOT_FOUND, NOT_FOUND)
}

pub async fn method_not_allowed(_: MethodNotAllowedError) -> Response {
    msg_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}

/// Bodies that fail to deserialize, e.g. `inc_votes: "ten"`.
pub async fn bad_payload(err: ParseRequestPayloadError) -> Response {
    debug!("Rejected payload: {err}");
    msg_response(StatusCode::BAD_REQUEST, BAD_REQUEST)
}

pub async fn bad_param(err: ParseParamError) -> Response {
    debug!("Rejected parameter: {err}");
    msg_response(StatusCode::BAD_REQUEST, BAD_REQUEST)
}
