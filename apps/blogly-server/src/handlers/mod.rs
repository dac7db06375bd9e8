//! HTTP handlers and route configuration.

mod home;
mod posts;
mod tags;
mod users;

#[cfg(test)]
mod tests;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use blogly_shared::{ErrorResponse, FormMap};

use crate::middleware::error::{AppError, error_page};
use crate::observability::RequestId;

/// Form bodies as ordered pairs so repeated checkbox fields survive parsing.
pub type FormBody = web::Form<Vec<(String, String)>>;

fn form_map(body: FormBody) -> FormMap {
    FormMap::from(body.into_inner())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Non-numeric ids never name an entity; malformed bodies are user errors.
    cfg.app_data(web::PathConfig::default().error_handler(|_err, _req| {
        AppError::NotFound("No such page".to_string()).into()
    }))
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(home::home))
    .service(
        web::scope("/users")
            .route("", web::get().to(users::index))
            .route("/new", web::get().to(users::new_form))
            .route("/new", web::post().to(users::create))
            .route("/{id}", web::get().to(users::show))
            .route("/{id}/edit", web::get().to(users::edit_form))
            .route("/{id}/edit", web::post().to(users::update))
            .route("/{id}/delete", web::post().to(users::delete))
            .route("/{id}/posts/new", web::get().to(posts::new_form))
            .route("/{id}/posts/new", web::post().to(posts::create)),
    )
    .service(
        web::scope("/posts")
            .route("/{id}", web::get().to(posts::show))
            .route("/{id}/edit", web::get().to(posts::edit_form))
            .route("/{id}/edit", web::post().to(posts::update))
            .route("/{id}/delete", web::post().to(posts::delete)),
    )
    .service(
        web::scope("/tags")
            .route("", web::get().to(tags::index))
            .route("/new", web::get().to(tags::new_form))
            .route("/new", web::post().to(tags::create))
            .route("/{id}", web::get().to(tags::show))
            .route("/{id}/edit", web::get().to(tags::edit_form))
            .route("/{id}/edit", web::post().to(tags::update))
            .route("/{id}/delete", web::post().to(tags::delete)),
    )
    .default_service(web::to(not_found));
}

/// Fallback for unmatched routes.
async fn not_found(req: HttpRequest, request_id: RequestId) -> HttpResponse {
    tracing::debug!(path = %req.path(), "No route matched");

    let problem = ErrorResponse::not_found(format!("No page at {}", req.path()))
        .with_request_id(request_id.as_str());
    error_page(StatusCode::NOT_FOUND, &problem)
}
