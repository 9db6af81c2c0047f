use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Recycler: originates pickup requests.
    User,
    /// Collection agent: claims and verifies pickups in the field.
    Rider,
    /// Operator: approves settlement.
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::User => "user",
            UserRole::Rider => "rider",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    /// Sole business key. Unique across users, never reused.
    pub phone_number: String,
    pub full_name: String,
    /// Fixed at signup, never changes.
    pub role: UserRole,
    pub address: String,
    /// Whole rupees. Monotonically non-decreasing, credited only by the
    /// paid transition of the pickup lifecycle.
    pub total_earnings: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Headline counts for the operator dashboard.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, Copy)]
pub struct UserStats {
    pub recycler_count: i64,
    pub rider_count: i64,
}
