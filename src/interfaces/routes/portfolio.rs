use actix_web::web;

use crate::handlers::portfolio;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/portfolio").route(web::get().to(portfolio::get_portfolio)))
        .service(web::resource("/profile").route(web::get().to(portfolio::get_profile)))
        .service(web::resource("/jobs").route(web::get().to(portfolio::get_jobs)))
        .service(
            web::scope("/projects")
                .service(
                    web::resource("")
                        .route(web::get().to(portfolio::get_projects))
                )
                .service(
                    web::resource("/{slug}")
                        .route(web::get().to(portfolio::get_project_by_slug))
                )
        )
        .service(web::resource("/technologies").route(web::get().to(portfolio::get_technologies)))
        .service(web::resource("/social-links").route(web::get().to(portfolio::get_social_links)))
        .service(web::resource("/location").route(web::get().to(portfolio::get_location)));
}
