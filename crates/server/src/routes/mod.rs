use actix_web::web;

pub mod summary;
pub mod system;

/// Register all HTTP routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(summary::generate_summary)
        .service(web::resource("/api/generate-summary").to(summary::method_not_allowed))
        .service(system::health);
}
