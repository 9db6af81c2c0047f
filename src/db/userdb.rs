use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{User, UserRole, UserStats};

#[async_trait]
pub trait UserExt {
    /// Look up a user by id or by phone number (the business key).
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        phone_number: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        phone_number: T,
        full_name: T,
        role: UserRole,
        address: T,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_name<T: Into<String> + Send>(
        &self,
        user_id: Uuid,
        full_name: T,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
        address: Option<String>,
    ) -> Result<User, sqlx::Error>;

    async fn get_user_stats(&self) -> Result<UserStats, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        phone_number: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, phone_number, full_name, role, address, total_earnings,
                       created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(phone_number) = phone_number {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, phone_number, full_name, role, address, total_earnings,
                       created_at, updated_at
                FROM users
                WHERE phone_number = $1
                "#,
            )
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        phone_number: T,
        full_name: T,
        role: UserRole,
        address: T,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (phone_number, full_name, role, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, phone_number, full_name, role, address, total_earnings,
                      created_at, updated_at
            "#,
        )
        .bind(phone_number.into())
        .bind(full_name.into())
        .bind(role)
        .bind(address.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_name<T: Into<String> + Send>(
        &self,
        user_id: Uuid,
        full_name: T,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, phone_number, full_name, role, address, total_earnings,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(full_name.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
        address: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                address = COALESCE($3, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, phone_number, full_name, role, address, total_earnings,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(address)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_stats(&self) -> Result<UserStats, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE role = 'user') AS recycler_count,
                COUNT(*) FILTER (WHERE role = 'rider') AS rider_count
            FROM users
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }
}
