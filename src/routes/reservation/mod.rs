mod delete;
mod get;
mod post;
mod update;
mod validate;

pub use delete::*;
pub use get::*;
pub use post::*;
pub use update::*;
pub use validate::*;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::{
    db_interaction::ReservationLedgerError,
    domain::ReservationFields,
    utils::{error_fmt_chain, json_error, PoolGetError}
};

// Body of POST and PUT; PUT leaves absent fields untouched
#[derive(Deserialize, Debug, Default)]
pub struct ReservationBody{
    pub name: Option<String>,
    pub phone: Option<String>,
    pub number_of_people: Option<i32>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(default, deserialize_with = "present_field")]
    pub note: Option<Option<String>>
}

// Tells `"note": null` apart from a missing note
fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<ReservationBody> for ReservationFields {
    fn from(body: ReservationBody) -> Self {
        ReservationFields{
            name: body.name,
            phone: body.phone,
            number_of_people: body.number_of_people,
            date: body.date,
            time: body.time,
            note: body.note
        }
    }
}

#[derive(Error)]
pub enum ReservationRouteError{
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    LedgerError(#[from] ReservationLedgerError),
    #[error("Failed to get connection from pool")]
    PoolError(#[from] PoolGetError)
}

impl Debug for ReservationRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ReservationRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReservationRouteError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ReservationRouteError::LedgerError(e) => match e {
                ReservationLedgerError::Infeasible(_)
                | ReservationLedgerError::NotEditable(_)
                | ReservationLedgerError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
                ReservationLedgerError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR
            },
            ReservationRouteError::PoolError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = ?self, "Reservation request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            },
            StatusCode::NOT_FOUND => json_error(StatusCode::NOT_FOUND, "Reservation not found"),
            status => json_error(status, self)
        }
    }
}
