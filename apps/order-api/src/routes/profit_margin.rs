//! # Profit-Margin Override Endpoint
//!
//! ```text
//! PUT /api/orders/{id}/profit-margin
//! { "profitMarginPercentage": 35 }
//!
//!   validate_order_id(id)             ──► 400 on malformed id
//!   validate_margin_override(35.0)    ──► 400 outside [0, 100]
//!   update_profit_margin(id, 35)      ──► 404 unknown order, 500 store failure
//!   compute_order_costs(order, None)  ──► 200 { orderId, profitMarginPercentage, breakdown }
//! ```
//!
//! The breakdown in the response is computed from the freshly stored margin,
//! so it is exactly what the next read of the order will show.

use actix_web::{web, HttpResponse};
use pharma_core::validation::{validate_margin_override, validate_order_id};
use pharma_core::{compute_order_costs, CostBreakdown};
use pharma_db::Database;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;

/// Request body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitMarginBody {
    pub profit_margin_percentage: f64,
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitMarginResponse {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_margin_percentage: Decimal,
    pub breakdown: CostBreakdown,
}

/// PUT /api/orders/{id}/profit-margin
pub async fn update_profit_margin(
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<ProfitMarginBody>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    validate_order_id(&order_id)?;
    let margin = validate_margin_override(body.profit_margin_percentage)?;

    debug!(order_id = %order_id, margin = %margin, "Saving profit margin override");

    let orders = db.orders();
    orders.update_profit_margin(&order_id, margin).await?;

    let order = orders
        .get_by_id(&order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", &order_id))?;
    let breakdown = compute_order_costs(&order, None);

    info!(
        order_id = %order_id,
        margin = %margin,
        revenue = %breakdown.revenue,
        "Profit margin override saved"
    );

    Ok(HttpResponse::Ok().json(ProfitMarginResponse {
        order_id,
        profit_margin_percentage: margin,
        breakdown,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/orders/{id}/profit-margin",
        web::put().to(update_profit_margin),
    );
}
