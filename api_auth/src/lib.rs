use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}

pub mod routes {
    pub mod auth;
    pub mod user;
}

mod services {
    pub(crate) mod auth;
    pub(crate) mod user;
}

mod dtos {
    pub(crate) mod auth;
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::post_login)
        .service(routes::auth::post_verify_email)
        .service(routes::auth::post_resend_verification)
}

pub fn mount_user() -> actix_web::Scope {
    web::scope("/user")
        .service(routes::user::get_me)
        .service(routes::user::delete_me)
}

/// Guard for the dashboard scope: rejects requests whose bearer token did
/// not produce valid claims in the extractor.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
