use std::sync::Arc;

use axum::{
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{
        FilterUserDto, UpdateProfileDto, UserData, UserResponseDto, UserStatsResponseDto,
    },
    error::HttpError,
    middleware::{role_check, JWTAuthMiddleware},
    models::usermodel::UserRole,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me).put(update_profile))
        .route(
            "/stats",
            get(get_user_stats).layer(middleware::from_fn(|req, next| {
                role_check(req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn get_me(
    Extension(user): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&user.user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    }))
}

/// Profile fields are mutable by the owning identity only; phone number,
/// role and earnings never change here.
pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddleware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let updated = app_state
        .db_client
        .update_user_profile(user.user.id, body.full_name, body.address)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&updated),
        },
    }))
}

pub async fn get_user_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .get_user_stats()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserStatsResponseDto {
        status: "success".to_string(),
        stats,
    }))
}
