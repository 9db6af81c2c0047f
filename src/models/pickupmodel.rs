use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "pickup_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupStatus {
    Pending,
    Assigned,
    /// Transient: verification immediately advances to PaymentRequested,
    /// so no stored row is ever observed at this status.
    Verified,
    PaymentRequested,
    Paid,
    Cancelled,
}

impl PickupStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PickupStatus::Pending => "pending",
            PickupStatus::Assigned => "assigned",
            PickupStatus::Verified => "verified",
            PickupStatus::PaymentRequested => "payment_requested",
            PickupStatus::Paid => "paid",
            PickupStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct PickupRequest {
    pub id: Uuid,
    /// Owning recycler. Immutable after creation.
    pub user_id: Uuid,
    /// Snapshot of the recycler's identity at request time. Deliberately
    /// never resynced when the profile changes later.
    pub user_name: String,
    pub user_phone: String,
    pub requested_waste_type: String,
    /// Material confirmed by the rider at the doorstep. Absent until
    /// verification.
    pub verified_waste_type: Option<String>,
    /// Kilograms. Positive, absent until verification.
    pub verified_weight: Option<f64>,
    pub status: PickupStatus,
    #[serde(rename = "requestedAt")]
    pub requested_at: DateTime<Utc>,
    #[serde(rename = "verifiedAt")]
    pub verified_at: Option<DateTime<Utc>>,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Assigned rider. Set at most once, never reassigned.
    pub rider_id: Option<Uuid>,
    /// Proof-of-collection reference captured by the rider.
    pub image_url: Option<String>,
    /// Whole rupees, round(verified_weight * rate). Set exactly once at
    /// verification, never recomputed.
    pub total_amount: Option<i64>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
