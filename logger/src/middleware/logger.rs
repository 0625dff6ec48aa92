use actix_web::body::BoxBody;
use actix_web::web;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use chrono::Utc;
use colored::Colorize;
use common::jwt::get_jwt_claims_or_error;
use db::dtos::log::LogCreateRequest;
use futures::future::{LocalBoxFuture, Ready, ready};
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::types::ipnetwork::IpNetwork;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

pub struct LoggerMiddleware {}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Arc::new(service),
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Common request info
        let method = req.method().to_string();
        let path = req.path().to_string();
        let query_string = req.query_string().to_string();

        // IP
        let ip_str = req
            .connection_info()
            .realip_remote_addr()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let ip_address = IpNetwork::from_str(&ip_str)
            .unwrap_or_else(|_| IpNetwork::from_str("0.0.0.0").unwrap());

        // Agent
        let user_agent = req
            .headers()
            .get("User-Agent")
            .map(|ua| ua.to_str().unwrap_or_default().to_string())
            .unwrap_or_default();

        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            // Jwt claims
            let jwt_claims = get_jwt_claims_or_error(&req).ok();
            let user_id = jwt_claims.as_ref().map(|c| c.user_id);

            // Get postgres pool
            let pool = req
                .app_data::<web::Data<Arc<PgPool>>>()
                .map(|data| Arc::clone(data.get_ref()));

            // Call next services
            let res = srv.call(req).await?;

            let status_code = res.status().as_u16() as i32;
            let timestamp = Utc::now();

            // Query params, request and response bodies are never persisted
            // beyond the query string. Bodies carry conversation excerpts.
            let params_json = if !query_string.is_empty() {
                let mut params_map = HashMap::new();
                for pair in query_string.split('&') {
                    if let Some(pos) = pair.find('=') {
                        let key = &pair[0..pos];
                        let value = &pair[pos + 1..];
                        params_map.insert(key.to_string(), json!(value));
                    }
                }
                Some(Value::Object(params_map.into_iter().collect()))
            } else {
                None
            };

            let status_colored = if status_code < 400 {
                status_code.to_string().green()
            } else if status_code < 500 {
                status_code.to_string().yellow()
            } else {
                status_code.to_string().red()
            };
            log::info!("{} {} -> {}", method, path, status_colored);

            if let Some(pool) = pool {
                let entry = LogCreateRequest {
                    timestamp,
                    method,
                    path,
                    status_code,
                    user_id,
                    params: params_json,
                    ip_address,
                    user_agent,
                };
                if let Err(e) = db::log::insert_log(&*pool, entry).await {
                    log::warn!("Failed to persist request log: {}", e);
                }
            }

            Ok(res.map_into_boxed_body())
        })
    }
}
