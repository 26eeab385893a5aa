use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    handlers::auth_models::{
        AccessTokenResponse, LoginRequest, LoginResponse, MessageResponse, RefreshTokenRequest, RegisterRequest,
    },
    handlers::{logged, logged_blocking, reject},
    middleware::RequireAuth,
    services::auth::{self, AccountKind},
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let Json(reg_req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return reject("register", "", rejection.into()),
    };
    let phone_number = reg_req.phone_number.clone().unwrap_or_default();

    let user = logged_blocking("register", phone_number, move || {
        let conn = &mut state.pool.get()?;
        auth::register(conn, reg_req.into(), AccountKind::REGULAR, state.bcrypt_cost)
    })
    .await?;
    tracing::info!(phone_number = %user.phone_number, "User created successfully");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(login_req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return reject("login", "", rejection.into()),
    };
    let phone_number = login_req.phone_number.clone().unwrap_or_default();

    let (user, tokens) = logged_blocking("login", phone_number, move || {
        let conn = &mut state.pool.get()?;
        auth::login(conn, &state.tokens, login_req.phone_number.as_deref(), login_req.password.as_deref())
    })
    .await?;
    tracing::info!(phone_number = %user.phone_number, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    RequireAuth { user, claims }: RequireAuth,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(logout_req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return reject("logout", &user.phone_number, rejection.into()),
    };

    logged("logout", &user.phone_number, || {
        let conn = &mut state.pool.get()?;
        auth::logout(conn, &state.tokens, &user, &claims, logout_req.refresh_token.as_deref())
    })?;
    tracing::info!(phone_number = %user.phone_number, "User logged out and refresh token blacklisted");

    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AppResult<Json<AccessTokenResponse>> {
    let Json(refresh_req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return reject("refresh_token", "", rejection.into()),
    };

    let access_token = logged("refresh_token", "", || {
        let conn = &mut state.pool.get()?;
        auth::refresh(conn, &state.tokens, refresh_req.refresh_token.as_deref())
    })?;

    Ok(Json(AccessTokenResponse { access_token }))
}
