use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct TechnologyQuery {
    pub category: Option<String>,
}

#[instrument(skip(state))]
pub async fn get_portfolio(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.portfolio_handler.portfolio())
}

#[instrument(skip(state))]
pub async fn get_profile(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.portfolio_handler.profile())
}

#[instrument(skip(state))]
pub async fn get_jobs(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.portfolio_handler.jobs())
}

#[instrument(skip(state))]
pub async fn get_projects(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.portfolio_handler.projects())
}

#[instrument(skip(state))]
pub async fn get_project_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.portfolio_handler.project_by_slug(&slug)?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state))]
pub async fn get_technologies(
    state: web::Data<AppState>,
    query: web::Query<TechnologyQuery>,
) -> Result<impl Responder, AppError> {
    let techs = state.portfolio_handler
        .technologies(query.category.as_deref())?;

    Ok(HttpResponse::Ok().json(techs))
}

#[instrument(skip(state))]
pub async fn get_social_links(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.portfolio_handler.social_links())
}

#[instrument(skip(state))]
pub async fn get_location(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.portfolio_handler.location())
}
