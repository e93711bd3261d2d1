//! HTTP handlers and route configuration.

mod health;
mod posts;
mod users;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, error::JsonPayloadError, web};
use pulse_shared::ErrorResponse;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/users")
                .route("/register", web::post().to(users::register))
                .route("/login", web::post().to(users::login)),
        )
        .service(
            web::scope("/posts")
                .route("", web::post().to(posts::create))
                .route("/{id}", web::put().to(posts::update)),
        )
        .default_service(web::to(not_found));
}

/// Treat absent and empty fields alike.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// An unparseable body is a client error, reported like any other.
fn json_error(err: JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected request body: {}", err);
    AppError::BadRequest("Request body must be a JSON object".to_string()).into()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found("Endpoint not found"))
}
