use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    web, Error, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    errors::AppError,
    limiter::rate_limiter::RateDecision,
    utils::get_client_ip::get_service_client_ip,
    AppState,
};

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Applies the shared per-client limiter from [`AppState`] to the wrapped
/// route. Runs before extractors, so malformed bodies count too.
pub struct RateLimitMiddleware;

impl<S> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RateLimitMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req.app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    tracing::error!("AppState missing in rate limit middleware");
                    AppError::InternalError("application state not configured".into())
                })?;

            let client_ip = get_service_client_ip(&req, state.trust_x_forwarded_for);

            match state.rate_limiter.check(&client_ip) {
                RateDecision::Allowed { remaining } => {
                    let mut res = service.call(req).await?;
                    res.headers_mut()
                        .insert(HeaderName::from_static(RATE_LIMIT_REMAINING), HeaderValue::from(remaining));
                    Ok(res)
                }
                limited @ RateDecision::Limited { .. } => {
                    let retry_after_secs = limited.retry_after_secs().unwrap_or(1);
                    tracing::warn!(%client_ip, retry_after_secs, "Rate limit exceeded");

                    let response = AppError::RateLimited { retry_after_secs }.error_response();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}
