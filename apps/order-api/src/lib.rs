//! # Order API
//!
//! HTTP boundary of the order cost engine. The only write it exposes is the
//! profit-margin override; everything else about an order is read back
//! through [`pharma_core::compute_order_costs`].
//!
//! ## Module Structure
//! ```text
//! order_api/
//! ├── config     - Environment-driven settings
//! ├── error      - ApiError and its HTTP mapping
//! └── routes/
//!     ├── health         - GET /health
//!     └── profit_margin  - PUT /api/orders/{id}/profit-margin
//! ```

pub mod config;
pub mod error;
pub mod routes;

use actix_web::web;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use routes::configure;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,pharma_db=debug,order_api=debug,sqlx=warn";

/// JSON extractor settings shared by every route.
///
/// Malformed or mistyped bodies become a `VALIDATION_ERROR` instead of
/// actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| ApiError::validation(err.to_string()).into())
}

/// Installs the global tracing subscriber.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
