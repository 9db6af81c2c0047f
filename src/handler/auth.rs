use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{FilterUserDto, LoginUserDto, UserData, UserLoginResponseDto},
    error::HttpError,
    service::identity::{self, IdentityOutcome},
    utils::token,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new().route("/login", post(login))
}

/// Phone-number-keyed identity resolver. One endpoint serves both signup and
/// login, selected by `is_sign_up`.
pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_user(None, Some(&body.phone_number))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let outcome = identity::resolve(
        &body.phone_number,
        existing,
        body.is_sign_up,
        body.full_name.as_deref(),
    )
    .map_err(HttpError::from)?;

    let user = match outcome {
        IdentityOutcome::Register { full_name } => {
            let user = app_state
                .db_client
                .save_user(
                    body.phone_number.clone(),
                    full_name,
                    body.role,
                    body.address.clone().unwrap_or_default(),
                )
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;

            tracing::info!(
                "registered new {} with phone {}",
                user.role.to_str(),
                user.phone_number
            );

            user
        }
        // The stored role wins: a login attempt under a different role is
        // not re-validated against it.
        IdentityOutcome::Login {
            user,
            rename_to: Some(name),
        } => app_state
            .db_client
            .update_user_name(user.id, name)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        IdentityOutcome::Login { user, .. } => user,
    };

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    });

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build cookie header"))?,
    );

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}
