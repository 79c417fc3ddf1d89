//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## Storage Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order field                 Column                   Stored as          │
//! │  ──────────────────────────  ───────────────────────  ────────────────── │
//! │  raw_materials               raw_materials            JSON array / NULL │
//! │  packaging_materials         packaging_materials      JSON array / NULL │
//! │  materials_cost              materials_cost           JSON value / NULL │
//! │  packaging_cost              packaging_cost           JSON value / NULL │
//! │  total_material_cost         total_material_cost      JSON value / NULL │
//! │  total_additional_fees       total_additional_fees    JSON value / NULL │
//! │  profit_margin_percentage    profit_margin_percentage JSON value / NULL │
//! │                                                                         │
//! │  "12.50" round-trips as a string, 12.5 as a number.                     │
//! │  Line-item columns that are not arrays load as absent.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pharma_core::validation::{validate_order_id, validate_order_reference};
use pharma_core::{LineItem, NumericValue, Order};

/// Columns selected for every order read, in `OrderRow` order.
const ORDER_COLUMNS: &str = r#"
    id, reference, customer_name,
    raw_materials, packaging_materials,
    materials_cost, packaging_cost, total_material_cost, total_additional_fees,
    profit_margin_percentage, created_at
"#;

/// An `orders` row before its JSON columns are decoded.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    reference: Option<String>,
    customer_name: Option<String>,
    raw_materials: Option<String>,
    packaging_materials: Option<String>,
    materials_cost: Option<String>,
    packaging_cost: Option<String>,
    total_material_cost: Option<String>,
    total_additional_fees: Option<String>,
    profit_margin_percentage: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> DbResult<Self> {
        let id = row.id.as_str();
        Ok(Order {
            raw_materials: decode(id, "raw_materials", row.raw_materials.as_deref())?
                .and_then(LineItem::list_from_json),
            packaging_materials: decode(
                id,
                "packaging_materials",
                row.packaging_materials.as_deref(),
            )?
            .and_then(LineItem::list_from_json),
            materials_cost: decode(id, "materials_cost", row.materials_cost.as_deref())?,
            packaging_cost: decode(id, "packaging_cost", row.packaging_cost.as_deref())?,
            total_material_cost: decode(
                id,
                "total_material_cost",
                row.total_material_cost.as_deref(),
            )?,
            total_additional_fees: decode(
                id,
                "total_additional_fees",
                row.total_additional_fees.as_deref(),
            )?,
            profit_margin_percentage: decode(
                id,
                "profit_margin_percentage",
                row.profit_margin_percentage.as_deref(),
            )?,
            created_at: Some(row.created_at),
            reference: row.reference,
            customer_name: row.customer_name,
            id: row.id,
        })
    }
}

fn decode<T: DeserializeOwned>(
    order_id: &str,
    column: &'static str,
    json: Option<&str>,
) -> DbResult<Option<T>> {
    json.map(serde_json::from_str)
        .transpose()
        .map_err(|source| DbError::InvalidData {
            order_id: order_id.to_string(),
            column,
            source,
        })
}

fn encode<T: Serialize>(
    order_id: &str,
    column: &'static str,
    value: Option<&T>,
) -> DbResult<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(|source| DbError::InvalidData {
            order_id: order_id.to_string(),
            column,
            source,
        })
}

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.orders();
///
/// let order = repo.get_by_id("uuid-here").await?;
/// repo.update_profit_margin("uuid-here", dec!(35)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order.
    ///
    /// The id must be a UUID and the reference, when present, a valid order
    /// reference. `created_at` defaults to now when the order has none.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The order as stored, with `created_at` set
    /// * `Err(DbError::Invalid)` - Malformed id or reference
    /// * `Err(DbError::Duplicate)` - id or reference already exists
    pub async fn insert(&self, order: &Order) -> DbResult<Order> {
        validate_order_id(&order.id)?;
        if let Some(reference) = &order.reference {
            validate_order_reference(reference)?;
        }

        debug!(id = %order.id, reference = ?order.reference, "Inserting order");

        let id = order.id.as_str();
        let now = Utc::now();
        let created_at = order.created_at.unwrap_or(now);

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, reference, customer_name,
                raw_materials, packaging_materials,
                materials_cost, packaging_cost, total_material_cost, total_additional_fees,
                profit_margin_percentage, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(id)
        .bind(&order.reference)
        .bind(&order.customer_name)
        .bind(encode(id, "raw_materials", order.raw_materials.as_ref())?)
        .bind(encode(id, "packaging_materials", order.packaging_materials.as_ref())?)
        .bind(encode(id, "materials_cost", order.materials_cost.as_ref())?)
        .bind(encode(id, "packaging_cost", order.packaging_cost.as_ref())?)
        .bind(encode(id, "total_material_cost", order.total_material_cost.as_ref())?)
        .bind(encode(id, "total_additional_fees", order.total_additional_fees.as_ref())?)
        .bind(encode(
            id,
            "profit_margin_percentage",
            order.profit_margin_percentage.as_ref(),
        )?)
        .bind(created_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::Duplicate { column, .. } => {
                let value = if column.ends_with(".reference") {
                    order.reference.clone().unwrap_or_default()
                } else {
                    order.id.clone()
                };
                DbError::Duplicate { column, value }
            }
            other => other,
        })?;

        Ok(Order {
            created_at: Some(created_at),
            ..order.clone()
        })
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Order::try_from).transpose()
    }

    /// Lists the most recent orders, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed recent orders");

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Stores `margin` as the order's default profit margin.
    ///
    /// The value must already be validated; this only persists it.
    ///
    /// ## Returns
    /// * `Ok(())` - Future computations without an override use `margin`
    /// * `Err(DbError::NotFound)` - No order with this id
    pub async fn update_profit_margin(&self, id: &str, margin: Decimal) -> DbResult<()> {
        let stored = encode(id, "profit_margin_percentage", Some(&NumericValue::from(margin)))?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET profit_margin_percentage = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(stored)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        info!(id = %id, margin = %margin, "Profit margin updated");
        Ok(())
    }

    /// Counts orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
