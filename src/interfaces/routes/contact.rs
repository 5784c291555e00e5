use actix_web::web;

use crate::{handlers::contact, middlewares::rate_limit::RateLimitMiddleware};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // Only the POST route is limited; other methods fall through to the 405 default
    cfg.service(
        web::resource("/send-email")
            .route(web::post().to(contact::send_email).wrap(RateLimitMiddleware))
    );
}
