//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::{UserResponse, UserRole};
use crate::errors::AppResult;
use crate::services::{Registration, TokenResponse};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "donor@organconnect.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "donor123")]
    pub password: String,
    /// Password confirmation (must match password)
    #[schema(example = "donor123")]
    pub confirm_password: String,
    /// Requested role (donor or hospital; admin is rejected)
    #[schema(example = "donor")]
    pub role: UserRole,
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Demo Donor")]
    pub name: String,
    /// Mobile number
    #[validate(length(min = 1, message = "Mobile number is required"))]
    #[schema(example = "9876543210")]
    pub mobile: String,
    /// Age in years
    #[schema(example = 30)]
    pub age: Option<u32>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "donor@organconnect.com")]
    pub email: String,
    /// User password
    #[schema(example = "donor123")]
    pub password: String,
}

/// OTP challenge request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OtpRequest {
    /// Mobile number to challenge
    #[validate(length(min = 1, message = "Mobile number is required"))]
    #[schema(example = "9876543210")]
    pub mobile: String,
}

/// OTP verification request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OtpVerifyRequest {
    /// Mobile number the challenge was issued for
    #[validate(length(min = 1, message = "Mobile number is required"))]
    #[schema(example = "9876543210")]
    pub mobile: String,
    /// Submitted 6-digit code
    #[schema(example = "042137")]
    pub otp: String,
}

/// Response for a requested OTP challenge
#[derive(Debug, Serialize, ToSchema)]
pub struct OtpRequestedResponse {
    /// Human-readable status
    pub message: String,
    /// The generated code, echoed only when the demo flag is enabled.
    /// A real deployment delivers it via SMS and omits this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// Response for a successful OTP verification
#[derive(Debug, Serialize, ToSchema)]
pub struct OtpVerifiedResponse {
    /// Always true on the success path
    pub verified: bool,
    /// Human-readable status
    pub message: String,
}

/// Create authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/request-otp", post(request_otp))
        .route("/verify-otp", post(verify_otp))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// Register a new donor or hospital account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created, session token issued", body = TokenResponse),
        (status = 400, description = "Password mismatch, invalid role, or duplicate email/mobile")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .register(Registration {
            email: payload.email,
            password: payload.password,
            confirm_password: payload.confirm_password,
            role: payload.role,
            name: payload.name,
            mobile: payload.mobile,
            age: payload.age,
        })
        .await?;

    Ok(Json(token))
}

/// Login and get a session token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials or inactive account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Get the current user's public profile
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth_service.current_user(current_user.id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Request an OTP challenge for a mobile number (mocked SMS channel)
#[utoipa::path(
    post,
    path = "/auth/request-otp",
    tag = "Authentication",
    request_body = OtpRequest,
    responses(
        (status = 200, description = "Challenge issued", body = OtpRequestedResponse)
    )
)]
pub async fn request_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OtpRequest>,
) -> AppResult<Json<OtpRequestedResponse>> {
    let code = state.auth_service.request_otp(&payload.mobile).await?;

    Ok(Json(OtpRequestedResponse {
        message: "OTP sent successfully".to_string(),
        otp: state.echo_otp.then_some(code),
    }))
}

/// Verify a submitted OTP code
#[utoipa::path(
    post,
    path = "/auth/verify-otp",
    tag = "Authentication",
    request_body = OtpVerifyRequest,
    responses(
        (status = 200, description = "Code accepted", body = OtpVerifiedResponse),
        (status = 400, description = "Invalid OTP")
    )
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OtpVerifyRequest>,
) -> AppResult<Json<OtpVerifiedResponse>> {
    state
        .auth_service
        .verify_otp(&payload.mobile, &payload.otp)
        .await?;

    Ok(Json(OtpVerifiedResponse {
        verified: true,
        message: "OTP verified successfully".to_string(),
    }))
}
