use axum::{
    extract::rejection::FormRejection,
    http::{StatusCode, header::InvalidHeaderValue},
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::num::ParseIntError;

pub type RegistrarResult<T> = Result<T, RegistrarError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistrarError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse form body"))]
    ParseForm { source: FormRejection },
    #[snafu(display("Unable to decode form values into a student"))]
    DecodeStudent { source: serde::de::value::Error },
    #[snafu(display("Unable to parse class id {:?}", original))]
    ParseClassId {
        source: ParseIntError,
        original: String,
    },
    #[snafu(display("Unable to find template `{}`", name))]
    MissingTemplate { name: &'static str },
    #[snafu(display("Unable to find student with ID: {}", id))]
    MissingStudent { id: i32 },
    #[snafu(display("CSRF token missing or invalid"))]
    CsrfMismatch,
    #[snafu(display("Unable to build CSRF cookie header"))]
    CookieHeader { source: InvalidHeaderValue },
}

impl IntoResponse for RegistrarError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const NA: StatusCode = StatusCode::FORBIDDEN; //not allowed

        let status_code = match &self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MigrateError { .. } => ISE,
            Self::MakeQuery { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } => ISE,
            Self::ParseForm { .. } | Self::DecodeStudent { .. } => ISE,
            Self::ParseClassId { .. } => ISE,
            Self::MissingTemplate { .. } => ISE,
            Self::MissingStudent { .. } => NF,
            Self::CsrfMismatch => NA,
            Self::CookieHeader { .. } => ISE,
        };

        error!(?self, "Error!");

        // internals never leak to the client
        let body = if status_code == ISE {
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status_code, body).into_response()
    }
}
