use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::pickupdb::PickupExt,
    dtos::pickupdtos::{
        CreatePickupDto, PickupData, PickupListResponseDto, PickupResponseDto,
        SettledPickupResponseDto, UpdatePickupStatusDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddleware,
    models::{
        pickupmodel::{PickupRequest, PickupStatus},
        usermodel::{User, UserRole},
    },
    service::{
        error::ServiceError,
        lifecycle::{self, PickupEvent},
        rates, settlement, visibility,
    },
    AppState,
};

pub fn pickups_handler() -> Router {
    Router::new()
        .route("/", get(list_pickups).post(create_pickup))
        .route("/:pickup_id/status", put(update_pickup_status))
}

/// Public rate table, mounted outside the auth layer.
pub async fn get_waste_rates() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "rates": rates::WASTE_RATES,
    }))
}

pub async fn create_pickup(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreatePickupDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = user.user;
    if user.role != UserRole::User {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ));
    }

    // Pickup site defaults to the recycler's profile address.
    let address = body
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(&user.address)
        .to_string();

    let pickup = app_state
        .db_client
        .save_pickup(
            &user,
            &body.requested_waste_type,
            &address,
            body.lat.unwrap_or(0.0),
            body.lng.unwrap_or(0.0),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "pickup {} created by {} for {}",
        pickup.id,
        pickup.user_phone,
        pickup.requested_waste_type
    );

    Ok((
        StatusCode::CREATED,
        Json(PickupResponseDto {
            status: "success".to_string(),
            data: PickupData { pickup },
        }),
    ))
}

/// List pickups through the per-role visibility projection.
pub async fn list_pickups(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let pickups = app_state
        .db_client
        .get_pickups()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let visible = visibility::filter_for_viewer(pickups, user.user.id, user.user.role);

    Ok(Json(PickupListResponseDto {
        status: "success".to_string(),
        results: visible.len(),
        pickups: visible,
    }))
}

pub async fn update_pickup_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
    Path(pickup_id): Path<Uuid>,
    Json(body): Json<UpdatePickupStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let actor = user.user;

    let pickup = app_state
        .db_client
        .get_pickup(pickup_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::from(ServiceError::PickupNotFound(pickup_id)))?;

    let event = build_event(&body, &pickup, &actor)?;

    if actor.role != event.required_role() {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ));
    }

    // Ownership gates on top of the role gate.
    match &event {
        PickupEvent::Verify { .. } if pickup.rider_id != Some(actor.id) => {
            return Err(HttpError::new(
                ErrorMessage::PermissionDenied.to_string(),
                StatusCode::FORBIDDEN,
            ));
        }
        PickupEvent::Cancel if pickup.user_id != actor.id => {
            return Err(HttpError::new(
                ErrorMessage::PermissionDenied.to_string(),
                StatusCode::FORBIDDEN,
            ));
        }
        _ => {}
    }

    let outcome = lifecycle::apply(&pickup, &event, Utc::now()).map_err(HttpError::from)?;

    let updated = app_state
        .db_client
        .commit_transition(pickup.status, &outcome)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::from(ServiceError::Conflict))?;

    tracing::debug!(
        "pickup {} transitioned {} -> {}",
        updated.id,
        pickup.status.to_str(),
        updated.status.to_str()
    );

    if updated.status == PickupStatus::Paid {
        let reference = settlement::generate_settlement_reference();
        if let Some(credit) = &outcome.credit {
            tracing::info!(
                "pickup {} settled for ₹{} to user {} ({})",
                updated.id,
                credit.amount,
                credit.user_id,
                reference
            );
        }

        return Ok(Json(SettledPickupResponseDto {
            status: "success".to_string(),
            settlement_reference: reference,
            data: PickupData { pickup: updated },
        })
        .into_response());
    }

    Ok(Json(PickupResponseDto {
        status: "success".to_string(),
        data: PickupData { pickup: updated },
    })
    .into_response())
}

/// Map the wire-level partial update onto a lifecycle event. The target
/// status selects the event; the other fields are its payload.
fn build_event(
    body: &UpdatePickupStatusDto,
    pickup: &PickupRequest,
    actor: &User,
) -> Result<PickupEvent, HttpError> {
    match body.status {
        // Riders claim for themselves; a rider_id in the body is accepted
        // for wire compatibility but the authenticated caller is the one
        // recorded.
        PickupStatus::Assigned => Ok(PickupEvent::Assign { rider_id: actor.id }),
        PickupStatus::Verified | PickupStatus::PaymentRequested => {
            let weight_kg = body.verified_weight.ok_or_else(|| {
                HttpError::bad_request("verified_weight is required to verify a pickup")
            })?;
            let image_url = body.image_url.clone().ok_or_else(|| {
                HttpError::bad_request("image_url is required to verify a pickup")
            })?;
            let waste_type = body
                .verified_waste_type
                .clone()
                .unwrap_or_else(|| pickup.requested_waste_type.clone());

            Ok(PickupEvent::Verify {
                weight_kg,
                waste_type,
                image_url,
            })
        }
        PickupStatus::Paid => Ok(PickupEvent::MarkPaid),
        PickupStatus::Cancelled => Ok(PickupEvent::Cancel),
        PickupStatus::Pending => Err(HttpError::bad_request(
            "A pickup cannot be moved back to pending",
        )),
    }
}
