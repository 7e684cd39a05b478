mod delete;
mod get;
mod post;
mod update;

pub use delete::*;
pub use get::*;
pub use post::*;
pub use update::*;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{
    db_interaction::TableStoreError,
    domain::BoundedText,
    utils::{error_fmt_chain, json_error, PoolGetError}
};

pub const MAX_TABLE_NAME_CHARS: usize = 50;

pub(crate) fn parse_table_name(name: String) -> Result<String, TableRouteError> {
    BoundedText::parse(name, "name", MAX_TABLE_NAME_CHARS)
        .map(BoundedText::into_inner)
        .map_err(TableRouteError::ValidationError)
}

#[derive(Error)]
pub enum TableRouteError{
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    StoreError(#[from] TableStoreError),
    #[error("Failed to get connection from pool")]
    PoolError(#[from] PoolGetError)
}

impl Debug for TableRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for TableRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            TableRouteError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TableRouteError::StoreError(TableStoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            TableRouteError::StoreError(TableStoreError::InUse(_)) => StatusCode::BAD_REQUEST,
            TableRouteError::StoreError(_) | TableRouteError::PoolError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = ?self, "Table request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            },
            status => json_error(status, self)
        }
    }
}
