use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};

use common::{env_config::Config, error::AppError};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Gate for operator endpoints: the request must carry the configured
/// admin token in `x-admin-token`.
pub struct AdminMiddleware {}

impl AdminMiddleware {
    pub fn new() -> Self {
        AdminMiddleware {}
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AdminMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminMiddlewareService {
            service: Arc::new(service),
        })
    }
}

pub struct AdminMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let authorized = req
                .app_data::<web::Data<Arc<Config>>>()
                .map(|config| {
                    !config.admin_api_token.is_empty()
                        && req
                            .headers()
                            .get(ADMIN_TOKEN_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .is_some_and(|token| token == config.admin_api_token)
                })
                .unwrap_or(false);

            if authorized {
                srv.call(req).await.map(|res| res.map_into_boxed_body())
            } else {
                let response =
                    AppError::Unauthorized("Invalid or missing admin token".to_string())
                        .to_http_response();
                Ok(req.into_response(response))
            }
        })
    }
}
