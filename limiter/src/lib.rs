use middleware::{global::GlobalLimiter, user::UserRateLimiter};

pub mod middleware {
    pub mod global;
    pub mod user;
}

pub fn global_middleware(permits_per_second: u32) -> GlobalLimiter {
    GlobalLimiter::new(permits_per_second)
}

/// Per-user request shaping based on the plan embedded in the JWT.
/// This is not the credit ceiling; that lives in the analysis service.
pub fn user_middleware() -> UserRateLimiter {
    UserRateLimiter::new()
}
