//! # Order API Server
//!
//! ## Startup Sequence
//! 1. Install tracing
//! 2. Load configuration from the environment
//! 3. Open SQLite and apply migrations
//! 4. Serve HTTP until shutdown, then close the pool

use actix_web::{web, App, HttpServer};
use order_api::{configure, init_tracing, json_config, ApiConfig};
use pharma_db::Database;
use tracing::info;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting order API v{}", env!("CARGO_PKG_VERSION"));

    let config = ApiConfig::load()?;
    info!(
        host = %config.host,
        port = config.port,
        database = %config.database_path,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config()).await?;
    let data = web::Data::new(db.clone());

    info!("Listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(data.clone())
            .app_data(json_config())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    db.close().await;
    info!("Order API shut down");
    Ok(())
}
