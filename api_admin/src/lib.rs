use actix_web::web;
use middleware::admin::AdminMiddleware;

pub mod middleware {
    pub mod admin;
}

pub mod routes {
    pub mod admin;
}

mod services {
    pub(crate) mod admin;
}

mod dtos {
    pub(crate) mod admin;
}

/// Operator endpoints. Guarded by a static token, not by user JWTs.
pub fn mount_admin() -> actix_web::Scope {
    web::scope("/admin")
        .service(routes::admin::get_users)
        .service(routes::admin::get_user)
        .service(routes::admin::get_conversations)
        .service(routes::admin::get_stats)
        .service(routes::admin::get_logs)
        .service(routes::admin::post_credits_grant)
}

pub fn admin_middleware() -> AdminMiddleware {
    AdminMiddleware::new()
}
