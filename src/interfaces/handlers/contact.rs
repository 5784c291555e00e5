use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact::ContactForm,
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// Relays a contact form submission. Rate limiting happens in
/// [`RateLimitMiddleware`](crate::middlewares::rate_limit::RateLimitMiddleware)
/// before the body is parsed.
#[instrument(skip_all)]
pub async fn send_email(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let client_ip = get_client_ip(&req, state.trust_x_forwarded_for);
    tracing::debug!(%client_ip, "Contact submission received");

    let response = state.contact_handler
        .send_contact_message(form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
