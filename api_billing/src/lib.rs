use actix_web::web;

pub mod routes {
    pub mod billing;
    pub mod webhook;
}

mod services {
    pub(crate) mod billing;
}

mod dtos {
    pub(crate) mod billing;
}

/// Dashboard billing endpoints, mounted behind the JWT guard.
pub fn mount_billing() -> actix_web::Scope {
    web::scope("/billing")
        .service(routes::billing::get_plans)
        .service(routes::billing::get_usage)
        .service(routes::billing::post_checkout)
        .service(routes::billing::get_verify)
}

/// Public Paystack webhook endpoint. Authenticated by HMAC signature, not
/// by JWT.
pub fn mount_webhook() -> actix_web::Scope {
    web::scope("/pay").service(routes::webhook::post_webhook)
}
