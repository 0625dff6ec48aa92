use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::error::AppError;
use governor::{
    Quota, RateLimiter,
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
};
use std::{future::Future, num::NonZeroU32, pin::Pin, rc::Rc, sync::Arc};

type DirectLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, QuantaClock>>;

/// Whole-server request ceiling, applied before anything else. Shields the
/// database and the AI provider from traffic spikes; per-user fairness is
/// the keyed limiter's job.
pub struct GlobalLimiter {
    limiter: DirectLimiter,
}

impl GlobalLimiter {
    pub fn new(permits_per_second: u32) -> Self {
        let permits = NonZeroU32::new(permits_per_second).unwrap_or(NonZeroU32::MIN);
        GlobalLimiter {
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(permits))),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GlobalLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = GlobalLimiterService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(GlobalLimiterService {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

pub struct GlobalLimiterService<S> {
    service: Rc<S>,
    limiter: DirectLimiter,
}

impl<S, B> Service<ServiceRequest> for GlobalLimiterService<S>
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
        let limiter = Arc::clone(&self.limiter);

        Box::pin(async move {
            if limiter.check().is_err() {
                return Ok(req.error_response(AppError::TooManyRequests(
                    "The server is busy. Please try again shortly.".to_string(),
                )));
            }
            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}
