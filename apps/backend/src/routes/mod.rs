use actix_web::web;

pub mod admin;
pub mod auth;
pub mod blogs;
pub mod health;

/// Public routes. The protected `/api/admin` scope is wired separately so the
/// auth-gate middleware wraps exactly that scope and nothing else.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(blogs::configure_routes);
}
