use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::{User, UserRole, UserStats};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(
        min = 10,
        max = 20,
        message = "Phone number must be between 10-20 characters"
    ))]
    pub phone_number: String,

    /// Required on signup; on login a non-empty value overwrites the stored
    /// name and nothing else.
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub full_name: Option<String>,

    /// Fixed at signup. Ignored on login: the stored role wins.
    pub role: UserRole,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,

    #[serde(default)]
    pub is_sign_up: bool,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1-100 characters"
    ))]
    pub full_name: Option<String>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Address must be between 1-255 characters"
    ))]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub phone_number: String,
    pub full_name: String,
    pub role: String,
    pub address: String,
    pub total_earnings: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            phone_number: user.phone_number.to_owned(),
            full_name: user.full_name.to_owned(),
            role: user.role.to_str().to_string(),
            address: user.address.to_owned(),
            total_earnings: user.total_earnings,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatsResponseDto {
    pub status: String,
    pub stats: UserStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_dto_rejects_short_phone_numbers() {
        let dto = LoginUserDto {
            phone_number: "12345".to_string(),
            full_name: Some("Asha Rao".to_string()),
            role: UserRole::User,
            address: None,
            is_sign_up: true,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn login_dto_accepts_a_ten_digit_phone() {
        let dto = LoginUserDto {
            phone_number: "9876543210".to_string(),
            full_name: Some("Asha Rao".to_string()),
            role: UserRole::User,
            address: Some("12 Lake View Road".to_string()),
            is_sign_up: true,
        };
        assert!(dto.validate().is_ok());
    }
}
