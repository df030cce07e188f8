//! Staff registration and sign-in endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use carelink_auth::{CREDENTIAL_COOKIE, RegisterInput, SignInInput};
use carelink_core::HospitalId;
use carelink_core::error::CarelinkError;
use carelink_core::models::staff::Staff;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    pub username: String,
    pub password: String,
    pub hospital_id: HospitalId,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Staff record as returned to clients.
#[derive(Debug, Serialize)]
pub struct StaffView {
    pub id: Uuid,
    pub username: String,
    pub hospital_id: HospitalId,
    pub created_at: DateTime<Utc>,
}

impl From<Staff> for StaffView {
    fn from(staff: Staff) -> Self {
        Self {
            id: staff.id,
            username: staff.username,
            hospital_id: staff.hospital_id,
            created_at: staff.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    message: &'static str,
    data: StaffView,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    message: &'static str,
    token: String,
}

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    Json(body): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let staff = state
        .auth
        .register(RegisterInput {
            username: body.username,
            password: body.password,
            hospital_id: body.hospital_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Created successfully",
            data: staff.into(),
        }),
    ))
}

pub async fn login<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(CarelinkError::validation("username and password are required").into());
    }

    let out = state
        .auth
        .sign_in(SignInInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    let cookie = Cookie::build((CREDENTIAL_COOKIE, out.token.clone()))
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(cookie::time::Duration::seconds(
            i64::try_from(out.expires_in).unwrap_or(i64::MAX),
        ))
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful",
            token: out.token,
        }),
    ))
}
