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
    db_interaction::MenuStoreError,
    domain::{BoundedText, ImageUrl, MenuPrice},
    utils::{error_fmt_chain, json_error, PoolGetError}
};

pub const MAX_ITEM_NAME_CHARS: usize = 255;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

pub(crate) fn parse_item_name(name: String) -> Result<String, MenuRouteError> {
    BoundedText::parse(name, "name", MAX_ITEM_NAME_CHARS)
        .map(BoundedText::into_inner)
        .map_err(MenuRouteError::ValidationError)
}

pub(crate) fn parse_description(description: Option<String>) -> Result<Option<String>, MenuRouteError> {
    BoundedText::parse_optional(description, "description", MAX_DESCRIPTION_CHARS)
        .map(|d| d.map(BoundedText::into_inner))
        .map_err(MenuRouteError::ValidationError)
}

pub(crate) fn parse_price(price: f64) -> Result<f64, MenuRouteError> {
    MenuPrice::parse(price)
        .map(|p| p.get())
        .map_err(MenuRouteError::ValidationError)
}

pub(crate) fn parse_image_url(url: Option<String>) -> Result<Option<String>, MenuRouteError> {
    url.filter(|u| !u.trim().is_empty())
        .map(ImageUrl::parse)
        .transpose()
        .map(|u| u.map(ImageUrl::into_inner))
        .map_err(MenuRouteError::ValidationError)
}

#[derive(Error)]
pub enum MenuRouteError{
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    StoreError(#[from] MenuStoreError),
    #[error("Failed to get connection from pool")]
    PoolError(#[from] PoolGetError)
}

impl Debug for MenuRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for MenuRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            MenuRouteError::ValidationError(_) => StatusCode::BAD_REQUEST,
            MenuRouteError::StoreError(MenuStoreError::ItemNotFound(_))
            | MenuRouteError::StoreError(MenuStoreError::CategoryNotFound(_)) => StatusCode::NOT_FOUND,
            MenuRouteError::StoreError(_) | MenuRouteError::PoolError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = ?self, "Menu request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            },
            status => json_error(status, self)
        }
    }
}
