use axum::{http::StatusCode, response::IntoResponse};
use jsonwebtoken::errors::Error as JWError;
use reqwest::Error as RError;
use surrealdb::Error as SError;

use thiserror::Error;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Jason web token Error: {0}")]
    JwTError(#[from] JWError),

    #[error("SurrealDb Error: {0}")]
    SurrealError(#[from] SError),

    #[error("Reqwest Error: {0}")]
    ReqwestError(#[from] RError),

    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validator Error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Json Rejection Error: {0}")]
    AxumJsonRejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("Not Found")]
    NotFound,

    // ! Session
    #[error("Missing authorization token")]
    MissingToken,
    #[error("Invalid authorization token")]
    InvalidToken,
    #[error("Invalid authorization scheme")]
    InvalidScheme,
    #[error("Token expired")]
    TokenExpired,
    #[error("Must be logged in")]
    NotAuthenticated,

    // ! Organizations & invitations
    #[error("Not a member of organization {0}")]
    Forbidden(String),
    #[error("Organization {0} not found")]
    OrgNotFound(String),
    #[error("{0} is already a member of organization {1}")]
    AlreadyMember(String, String),
    #[error("Must verify your email to send invites")]
    EmailNotVerified,
    #[error("Invite quota exceeded (contact support to increase the quota)")]
    QuotaExceeded,
    #[error("Invalid invitation token")]
    InvalidInviteToken,
    #[error("Invitation expired")]
    InviteExpired,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::JwTError(error) => {
                error!("JWT Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::SurrealError(error) => {
                error!("Surreal  Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::ReqwestError(error) => {
                error!("Reqwest  Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::IoError(error) => {
                error!("Io  Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::ValidationError(error) => {
                let message = format!("Input validation error: [{}]", error).replace('\n', ", ");
                error!("Validation Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, message)
            }
            Error::AxumJsonRejection(error) => {
                error!("Axum Json Rejection Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, error.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            error @ (Error::MissingToken
            | Error::InvalidToken
            | Error::InvalidScheme
            | Error::TokenExpired
            | Error::NotAuthenticated) => (StatusCode::UNAUTHORIZED, error.to_string()),
            error @ (Error::Forbidden(_) | Error::EmailNotVerified) => {
                (StatusCode::FORBIDDEN, error.to_string())
            }
            error @ Error::OrgNotFound(_) => (StatusCode::NOT_FOUND, error.to_string()),
            error @ Error::AlreadyMember(..) => (StatusCode::CONFLICT, error.to_string()),
            error @ Error::QuotaExceeded => (StatusCode::TOO_MANY_REQUESTS, error.to_string()),
            error @ (Error::InvalidInviteToken | Error::InviteExpired) => {
                (StatusCode::BAD_REQUEST, error.to_string())
            }
        };
        (status, message).into_response()
    }
}
