// Route exports
pub mod affinity;

use actix_web::web;

pub use affinity::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(affinity::configure);
}
