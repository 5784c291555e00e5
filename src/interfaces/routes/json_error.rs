use actix_web::web;

use crate::handlers::json_error::JsonError;

/// Contact bodies are small; anything past this is not a form post.
const JSON_BODY_LIMIT: usize = 16 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(|err, _req| JsonError::from(err).into())
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| JsonError::from(err).into())
    );
}
