//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;
use crate::middleware::object_id::CheckObjectId;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .service(
                        web::resource(["", "/"])
                            .route(web::get().to(posts::list))
                            .route(web::post().to(posts::write)),
                    )
                    .service(
                        web::resource("/{id}")
                            .wrap(CheckObjectId)
                            .route(web::get().to(posts::read))
                            .route(web::delete().to(posts::remove))
                            .route(web::patch().to(posts::update)),
                    ),
            ),
    );
}

/// Malformed JSON bodies answer 400 with problem details.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
