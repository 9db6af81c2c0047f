use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::pickupmodel::{PickupRequest, PickupStatus};
use crate::models::usermodel::User;
use crate::service::lifecycle::TransitionOutcome;

const PICKUP_COLUMNS: &str = r#"
    id, user_id, user_name, user_phone, requested_waste_type,
    verified_waste_type, verified_weight, status, requested_at, verified_at,
    address, lat, lng, rider_id, image_url, total_amount, updated_at
"#;

#[async_trait]
pub trait PickupExt {
    /// Create a pending pickup, snapshotting the owner's identity.
    async fn save_pickup(
        &self,
        owner: &User,
        requested_waste_type: &str,
        address: &str,
        lat: f64,
        lng: f64,
    ) -> Result<PickupRequest, sqlx::Error>;

    async fn get_pickup(&self, pickup_id: Uuid) -> Result<Option<PickupRequest>, sqlx::Error>;

    /// The full collection in request order. Visibility filtering happens in
    /// the service layer so the projection stays a pure function.
    async fn get_pickups(&self) -> Result<Vec<PickupRequest>, sqlx::Error>;

    /// Persist a lifecycle transition computed by the engine.
    ///
    /// The pickup row is updated with the prior status as an optimistic
    /// guard, so of two racing writers only the first succeeds; the loser
    /// gets `Ok(None)`. When the outcome carries an earnings credit, the
    /// pickup update and the credit commit in one database transaction.
    async fn commit_transition(
        &self,
        from: PickupStatus,
        outcome: &TransitionOutcome,
    ) -> Result<Option<PickupRequest>, sqlx::Error>;
}

#[async_trait]
impl PickupExt for DBClient {
    async fn save_pickup(
        &self,
        owner: &User,
        requested_waste_type: &str,
        address: &str,
        lat: f64,
        lng: f64,
    ) -> Result<PickupRequest, sqlx::Error> {
        sqlx::query_as::<_, PickupRequest>(&format!(
            r#"
            INSERT INTO pickup_requests
                (user_id, user_name, user_phone, requested_waste_type, address, lat, lng)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PICKUP_COLUMNS}
            "#
        ))
        .bind(owner.id)
        .bind(&owner.full_name)
        .bind(&owner.phone_number)
        .bind(requested_waste_type)
        .bind(address)
        .bind(lat)
        .bind(lng)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_pickup(&self, pickup_id: Uuid) -> Result<Option<PickupRequest>, sqlx::Error> {
        sqlx::query_as::<_, PickupRequest>(&format!(
            r#"
            SELECT {PICKUP_COLUMNS}
            FROM pickup_requests
            WHERE id = $1
            "#
        ))
        .bind(pickup_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_pickups(&self) -> Result<Vec<PickupRequest>, sqlx::Error> {
        sqlx::query_as::<_, PickupRequest>(&format!(
            r#"
            SELECT {PICKUP_COLUMNS}
            FROM pickup_requests
            ORDER BY requested_at ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn commit_transition(
        &self,
        from: PickupStatus,
        outcome: &TransitionOutcome,
    ) -> Result<Option<PickupRequest>, sqlx::Error> {
        let next = &outcome.pickup;

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, PickupRequest>(&format!(
            r#"
            UPDATE pickup_requests
            SET status = $2,
                rider_id = $3,
                verified_waste_type = $4,
                verified_weight = $5,
                image_url = $6,
                total_amount = $7,
                verified_at = $8,
                updated_at = NOW()
            WHERE id = $1 AND status = $9
            RETURNING {PICKUP_COLUMNS}
            "#
        ))
        .bind(next.id)
        .bind(next.status)
        .bind(next.rider_id)
        .bind(&next.verified_waste_type)
        .bind(next.verified_weight)
        .bind(&next.image_url)
        .bind(next.total_amount)
        .bind(next.verified_at)
        .bind(from)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(updated) = updated else {
            // Status guard lost the race; nothing was written.
            return Ok(None);
        };

        if let Some(credit) = &outcome.credit {
            sqlx::query(
                r#"
                UPDATE users
                SET total_earnings = total_earnings + $2,
                    updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(credit.user_id)
            .bind(credit.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Some(updated))
    }
}
