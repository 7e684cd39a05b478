use actix_web::{http::StatusCode, web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use futures_util::future::{ready, Ready};
use thiserror::Error;
use uuid::Uuid;

use crate::utils::json_error;

use super::jwt::{Claims, Tokenizer, UserRole};

// Any authenticated caller, client or admin
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser{
    pub user_id: Uuid,
    pub role: UserRole
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::ADMIN
    }

    // Admins see every reservation, clients only their own
    pub fn owner_filter(&self) -> Option<Uuid> {
        if self.is_admin() {
            None
        } else {
            Some(self.user_id)
        }
    }
}

// Extractor for admin role
#[derive(Debug, Clone, Copy)]
pub struct IsAdmin(pub Uuid);

#[derive(Error, Debug)]
pub enum AuthError{
    #[error("Authentication token missing")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Administrator rights required")]
    NotAdmin,
    #[error("Token configuration missing")]
    MissingTokenizer
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::NotAdmin => StatusCode::FORBIDDEN,
            AuthError::MissingTokenizer => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error(self.status_code(), self)
    }
}

fn bearer_claims(req: &HttpRequest) -> Result<Claims, AuthError> {
    let tokenizer = req.app_data::<web::Data<Tokenizer>>()
        .ok_or(AuthError::MissingTokenizer)?;

    let token = req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer"))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    tokenizer.decode_key(token)
        .ok_or(AuthError::InvalidToken)
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(bearer_claims(req).map(|claims| AuthenticatedUser{
            user_id: claims.sub,
            role: claims.role
        }))
    }
}

impl FromRequest for IsAdmin {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(bearer_claims(req).and_then(|claims| match claims.role {
            UserRole::ADMIN => Ok(IsAdmin(claims.sub)),
            UserRole::CLIENT => Err(AuthError::NotAdmin)
        }))
    }
}
