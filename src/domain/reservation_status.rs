//! Reservation lifecycle.
//!
//! A reservation starts `pending`, is confirmed by staff, and can be
//! cancelled by its owner or by staff while pending or confirmed.
//! `cancelled` is terminal.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus{
    Pending,
    Confirmed,
    Cancelled
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransitionError{
    #[error("this reservation is already confirmed")]
    AlreadyConfirmed,
    #[error("a cancelled reservation cannot be confirmed")]
    ConfirmCancelled,
    #[error("this reservation is already cancelled")]
    AlreadyCancelled
}

impl ReservationStatus {
    pub const ACTIVE: [ReservationStatus; 2] = [ReservationStatus::Pending, ReservationStatus::Confirmed];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled"
        }
    }

    /// Active reservations hold their tables and count against availability.
    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// Only pending reservations accept changes to their fields.
    pub fn is_editable(&self) -> bool {
        matches!(self, ReservationStatus::Pending)
    }

    pub fn confirm(self) -> Result<ReservationStatus, StatusTransitionError> {
        match self {
            ReservationStatus::Pending => Ok(ReservationStatus::Confirmed),
            ReservationStatus::Confirmed => Err(StatusTransitionError::AlreadyConfirmed),
            ReservationStatus::Cancelled => Err(StatusTransitionError::ConfirmCancelled)
        }
    }

    pub fn cancel(self) -> Result<ReservationStatus, StatusTransitionError> {
        match self {
            ReservationStatus::Pending | ReservationStatus::Confirmed => Ok(ReservationStatus::Cancelled),
            ReservationStatus::Cancelled => Err(StatusTransitionError::AlreadyCancelled)
        }
    }

    pub fn active_strs() -> Vec<&'static str> {
        Self::ACTIVE.iter().map(|status| status.as_str()).collect()
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("unknown reservation status: {}", other))
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
