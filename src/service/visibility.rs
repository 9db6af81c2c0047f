//! Per-role projection of the pickup collection. Pure and order-preserving:
//! it decides what a viewer may see, nothing else.

use uuid::Uuid;

use crate::models::{
    pickupmodel::{PickupRequest, PickupStatus},
    usermodel::UserRole,
};

/// Whether a single pickup is visible to the given viewer.
///
/// The rider arm is three independent clauses joined by inclusive OR: the
/// unclaimed pool, the rider's own pickups at any status, and everything
/// currently assigned. The last clause overlaps with the ownership clause in
/// practice but is evaluated on its own, matching the product behavior.
pub fn visible_to(pickup: &PickupRequest, viewer_id: Uuid, role: UserRole) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Rider => {
            pickup.status == PickupStatus::Pending
                || pickup.rider_id == Some(viewer_id)
                || pickup.status == PickupStatus::Assigned
        }
        UserRole::User => pickup.user_id == viewer_id,
    }
}

/// Project the full collection for one viewer, preserving order.
pub fn filter_for_viewer(
    pickups: Vec<PickupRequest>,
    viewer_id: Uuid,
    role: UserRole,
) -> Vec<PickupRequest> {
    pickups
        .into_iter()
        .filter(|p| visible_to(p, viewer_id, role))
        .collect()
}
