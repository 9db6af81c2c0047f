use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::pickupmodel::{PickupRequest, PickupStatus};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreatePickupDto {
    #[validate(length(min = 1, message = "Waste type is required"))]
    pub requested_waste_type: String,

    /// Defaults to the recycler's profile address when absent.
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,

    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Partial update describing the requested transition. `status` selects the
/// lifecycle event; the remaining fields are that event's payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePickupStatusDto {
    pub status: PickupStatus,
    pub rider_id: Option<Uuid>,
    pub verified_weight: Option<f64>,
    pub verified_waste_type: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PickupData {
    pub pickup: PickupRequest,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PickupResponseDto {
    pub status: String,
    pub data: PickupData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PickupListResponseDto {
    pub status: String,
    pub results: usize,
    pub pickups: Vec<PickupRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettledPickupResponseDto {
    pub status: String,
    /// Opaque, display only.
    pub settlement_reference: String,
    pub data: PickupData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_pickup_requires_a_waste_type() {
        let dto = CreatePickupDto {
            requested_waste_type: "".to_string(),
            address: None,
            lat: None,
            lng: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_pickup_with_a_waste_type_passes_validation() {
        let dto = CreatePickupDto {
            requested_waste_type: "Plastic".to_string(),
            address: Some("12 Lake View Road".to_string()),
            lat: Some(12.97),
            lng: Some(77.59),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn create_pickup_rejects_an_overlong_address() {
        let dto = CreatePickupDto {
            requested_waste_type: "Paper".to_string(),
            address: Some("x".repeat(256)),
            lat: None,
            lng: None,
        };
        assert!(dto.validate().is_err());
    }
}
