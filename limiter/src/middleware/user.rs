use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::{error::AppError, jwt, plans::Plan};
use dashmap::DashMap;
use governor::{Quota, RateLimiter, clock::QuantaClock, state::keyed::DashMapStateStore};
use std::{future::Future, num::NonZeroU32, pin::Pin, rc::Rc, sync::Arc, time::Duration};
use uuid::Uuid;

type UserStateStore = DashMapStateStore<Uuid>;
type KeyedLimiter = Arc<RateLimiter<Uuid, UserStateStore, QuantaClock>>;

/// Shapes request rate per authenticated user, keyed on the plan carried in
/// the JWT. Free users get a tighter per-minute budget than Pro users.
pub struct UserRateLimiter {}

impl UserRateLimiter {
    pub fn new() -> Self {
        Self {}
    }
}

fn limiter_for(plan: Plan) -> Option<KeyedLimiter> {
    let per_minute = NonZeroU32::new(plan.requests_per_minute())?;
    let period = Duration::from_secs(60 / per_minute.get() as u64);
    let quota = Quota::with_period(period)?.allow_burst(per_minute);
    Some(Arc::new(RateLimiter::keyed(quota)))
}

impl<S, B> Transform<S, ServiceRequest> for UserRateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = UserRateLimiterService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let limiters = DashMap::new();
        for plan in [Plan::Free, Plan::Pro] {
            match limiter_for(plan) {
                Some(limiter) => {
                    limiters.insert(plan.as_str().to_string(), limiter);
                }
                None => log::error!("Failed to create request limiter for plan {}", plan.as_str()),
            }
        }

        std::future::ready(Ok(UserRateLimiterService {
            service: Rc::new(service),
            limiters,
        }))
    }
}

pub struct UserRateLimiterService<S> {
    service: Rc<S>,
    limiters: DashMap<String, KeyedLimiter>,
}

impl<S, B> Service<ServiceRequest> for UserRateLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        let limiters = self.limiters.clone();

        Box::pin(async move {
            if let Ok(claims) = jwt::get_jwt_claims_or_error(&req) {
                let plan = Plan::parse(&claims.plan);
                match limiters.get(plan.as_str()) {
                    Some(limiter) => {
                        if limiter.check_key(&claims.user_id).is_err() {
                            return Ok(req.error_response(AppError::TooManyRequests(
                                "You are sending requests too quickly. Slow down a little."
                                    .to_string(),
                            )));
                        }
                    }
                    None => {
                        log::error!("No request limiter registered for plan {}", plan.as_str())
                    }
                }
            }

            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}
