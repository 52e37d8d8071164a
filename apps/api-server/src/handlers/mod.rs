//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod users;
mod views;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, web};
use bloguide_shared::ErrorResponse;

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
///
/// Collection routes answer with and without the trailing slash.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // Public routes
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/me", web::get().to(auth::me))
                .route("/logout", web::post().to(auth::logout)),
        )
        // User routes
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_users))
                .route("/", web::get().to(users::list_users))
                .route("", web::post().to(users::create_user))
                .route("/", web::post().to(users::create_user))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user))
                .route("/{id}/posts", web::get().to(users::user_posts))
                .route("/{username}/profile", web::get().to(users::profile)),
        )
        // Post routes
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("/", web::get().to(posts::list_posts))
                .route("", web::post().to(posts::create_post))
                .route("/", web::post().to(posts::create_post))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::put().to(posts::replace_post))
                .route("/{id}", web::patch().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post))
                .route("/{id}/author", web::get().to(posts::post_author)),
        )
        .default_service(web::to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found("Endpoint not found"))
}
