use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::{ErrorMessage, HttpError},
    models::pickupmodel::PickupStatus,
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Pickup request {0} not found")]
    PickupNotFound(Uuid),

    #[error("Phone number {0} is already registered")]
    AlreadyRegistered(String),

    #[error("No user registered with phone {0}")]
    UnknownPhone(String),

    #[error("Pickup is {current:?}: cannot {event} from this status")]
    InvalidTransition {
        current: PickupStatus,
        event: &'static str,
    },

    #[error("Pickup was modified concurrently, please reload and retry")]
    Conflict,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::PickupNotFound(_) => {
                HttpError::not_found(ErrorMessage::PickupNotFound.to_string())
            }
            ServiceError::AlreadyRegistered(_) => {
                HttpError::conflict(ErrorMessage::PhoneAlreadyRegistered.to_string())
            }
            ServiceError::UnknownPhone(_) => {
                HttpError::not_found(ErrorMessage::UserNotFound.to_string())
            }
            ServiceError::InvalidTransition { .. } | ServiceError::Validation(_) => {
                HttpError::bad_request(error.to_string())
            }
            ServiceError::Conflict => HttpError::conflict(error.to_string()),
            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}
