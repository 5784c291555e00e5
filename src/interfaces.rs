pub mod handlers;
pub mod mailer;
pub mod middlewares;
pub mod routes;
