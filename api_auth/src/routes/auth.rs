use std::sync::Arc;

use actix_web::{Responder, post, web};
use chrono::Utc;
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::{self, ClaimsSpec};
use common::plans;
use mailer::Mailer;
use sqlx::PgPool;

use crate::dtos::auth::{
    AuthResponse, LoginRequest, RegisterRequest, ResendVerificationRequest, VerifyEmailRequest,
};
use crate::services;

/// Registers a new user with email and password authentication.
///
/// # Input
/// - `req`: JSON payload containing registration information (email, password, names)
///
/// # Output
/// - Success: Returns the created user object with 201 Created status
/// - Error: Returns 409 Conflict if the email is already registered
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/register', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     email: 'user@example.com',
///     password: 'securepassword',
///     first_name: 'John',
///     last_name: 'Doe'
///   })
/// });
/// ```
#[post("/register")]
pub async fn post_register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    mail: web::Data<Arc<Mailer>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let email = req.email.trim().to_lowercase();
    if db::user::exists_user_by_email(pg_pool, &email).await? {
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }
    let user =
        services::user::create_user_with_credentials(pg_pool, &req.into_inner(), &config, &mail)
            .await?;
    Success::created(user)
}

/// Authenticates a user with email and password.
///
/// # Output
/// - Success: Returns an auth response with JWT token and user details
/// - Error: Returns 401 Unauthorized for invalid credentials
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/login', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ email: 'user@example.com', password: 'securepassword' })
/// });
/// const { token, user } = await response.json();
/// localStorage.setItem('authToken', token);
/// ```
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::auth::authenticate_user(pg_pool, &login_data.into_inner()).await?;
    let plan = plans::effective_plan(&user.plan, user.plan_expires_at, Utc::now());
    let token = jwt::generate_jwt(
        ClaimsSpec {
            user_id: user.id,
            email: user.email.clone(),
            plan: plan.as_str().to_string(),
        },
        &config.jwt_config,
    )?;
    Success::ok(AuthResponse { token, user })
}

/// Consumes an email verification token. Tokens are single use and expire
/// 24 hours after issue.
#[post("/verify-email")]
pub async fn post_verify_email(
    req: web::Json<VerifyEmailRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let user = services::user::verify_email(&pool, &req.token).await?;
    Success::ok(user)
}

/// Issues a fresh verification token. Always responds 200, whether or not
/// the email maps to an unverified account.
#[post("/resend-verification")]
pub async fn post_resend_verification(
    req: web::Json<ResendVerificationRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    mail: web::Data<Arc<Mailer>>,
) -> Res<impl Responder> {
    services::user::resend_verification(&pool, &config, &mail, &req.email).await?;
    Success::ok(serde_json::json!({ "status": "sent" }))
}
