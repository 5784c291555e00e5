use actix_web::{get, web, HttpRequest, HttpResponse, Responder};

use crate::{errors::AppError, AppState};

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Welcome to {}!", state.portfolio_handler.profile().name),
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "contact": "/api/send-email",
            "portfolio": "/api/portfolio",
            "health": "/health"
        }
    }))
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!("no route for {} {}", req.method(), req.path())))
}
