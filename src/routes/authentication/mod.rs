mod login;
mod signup;

pub use login::*;
pub use signup::*;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use anyhow::Context;
use thiserror::Error;

use crate::{
    auth::jwt::Tokenizer,
    db_interaction::UserInsertError,
    models::{User, UserProfile},
    utils::{error_fmt_chain, json_error, PoolGetError}
};

#[derive(Error)]
pub enum AuthRouteError{
    #[error("{0}")]
    ValidationError(String),
    #[error("A user with this email already exists")]
    UserAlreadyExists(#[source] UserInsertError),
    // Same answer for an unknown email and a wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error),
    #[error("Failed to get connection from pool")]
    PoolError(#[from] PoolGetError)
}

impl From<UserInsertError> for AuthRouteError {
    fn from(e: UserInsertError) -> Self {
        match e {
            UserInsertError::EmailNotUnique(_) => AuthRouteError::UserAlreadyExists(e),
            UserInsertError::UnexpectedError(e) => AuthRouteError::UnexpectedError(e)
        }
    }
}

impl Debug for AuthRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for AuthRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthRouteError::ValidationError(_) | AuthRouteError::UserAlreadyExists(_) => StatusCode::BAD_REQUEST,
            AuthRouteError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthRouteError::UserNotFound => StatusCode::NOT_FOUND,
            AuthRouteError::UnexpectedError(_) | AuthRouteError::PoolError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = ?self, "Account request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            },
            status => json_error(status, self)
        }
    }
}

// Body shared by signup and login
pub(crate) fn session_response(
    status: StatusCode,
    message: &str,
    tokenizer: &Tokenizer,
    user: User
) -> Result<HttpResponse, AuthRouteError> {
    let token = tokenizer.generate_key(&user)
        .context("Failed to issue token")?;

    Ok(HttpResponse::build(status).json(serde_json::json!({
        "message": message,
        "token": token,
        "user": UserProfile::from(user)
    })))
}
