//! HTTP routes.
//!
//! ```text
//! GET  /health                             liveness + migration state
//! PUT  /api/orders/{id}/profit-margin      persist a margin override
//! ```

pub mod health;
pub mod profit_margin;

use actix_web::web;

/// Registers every route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    profit_margin::configure(cfg);
}
