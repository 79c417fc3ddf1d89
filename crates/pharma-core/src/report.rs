//! # Order-History Report
//!
//! Builds the order-history table and exports it as CSV or JSON. Every row is
//! produced by [`compute_order_costs`], so the exported figures are the same
//! ones the history view and the API show.
//!
//! - CSV is for spreadsheets: amounts rounded to two places, one flat row per order.
//! - JSON is for machines: the full breakdown at full precision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use ts_rs::TS;

use crate::costing::compute_order_costs;
use crate::error::CoreResult;
use crate::types::{CostBreakdown, Order};

/// One line of the order-history report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderHistoryRow {
    pub reference: Option<String>,
    pub customer_name: Option<String>,
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
    pub breakdown: CostBreakdown,
}

/// Computes one row per order using each order's stored margin.
pub fn order_history<'a, I>(orders: I) -> Vec<OrderHistoryRow>
where
    I: IntoIterator<Item = &'a Order>,
{
    orders
        .into_iter()
        .map(|order| OrderHistoryRow {
            reference: order.reference.clone(),
            customer_name: order.customer_name.clone(),
            created_at: order.created_at,
            breakdown: compute_order_costs(order, None),
        })
        .collect()
}

/// Flat CSV shape of a row.
#[derive(Serialize)]
struct CsvRecord<'a> {
    #[serde(rename = "Order ID")]
    order_id: &'a str,
    #[serde(rename = "Reference")]
    reference: &'a str,
    #[serde(rename = "Customer")]
    customer: &'a str,
    #[serde(rename = "Created")]
    created: String,
    #[serde(rename = "Raw Materials")]
    raw_materials: String,
    #[serde(rename = "Packaging")]
    packaging: String,
    #[serde(rename = "Subtotal")]
    subtotal: String,
    #[serde(rename = "Additional Fees")]
    additional_fees: String,
    #[serde(rename = "VAT")]
    tax: String,
    #[serde(rename = "Total With VAT")]
    total_with_tax: String,
    #[serde(rename = "Margin %")]
    margin: String,
    #[serde(rename = "Revenue")]
    revenue: String,
    #[serde(rename = "Profit")]
    profit: String,
}

impl<'a> From<&'a OrderHistoryRow> for CsvRecord<'a> {
    fn from(row: &'a OrderHistoryRow) -> Self {
        let b = &row.breakdown;
        CsvRecord {
            order_id: &b.order_id,
            reference: row.reference.as_deref().unwrap_or_default(),
            customer: row.customer_name.as_deref().unwrap_or_default(),
            created: row
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            raw_materials: b.raw_materials_cost.to_string(),
            packaging: b.packaging_cost.to_string(),
            subtotal: b.subtotal.to_string(),
            additional_fees: b.additional_fees.to_string(),
            tax: b.tax_amount.to_string(),
            total_with_tax: b.total_with_tax.to_string(),
            margin: format!("{:.2}", b.profit_margin),
            revenue: b.revenue.to_string(),
            profit: b.profit.to_string(),
        }
    }
}

/// Writes the rows as CSV with a header line.
pub fn write_csv<W: Write>(rows: &[OrderHistoryRow], writer: W) -> CoreResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(CsvRecord::from(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serializes the rows as a pretty-printed JSON array.
pub fn to_json(rows: &[OrderHistoryRow]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericValue;
    use crate::types::LineItem;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn orders() -> Vec<Order> {
        vec![
            Order {
                reference: Some("PO-1".to_string()),
                customer_name: Some("Nile Pharmacy".to_string()),
                raw_materials: Some(vec![LineItem::new(10.0, 5.0)]),
                total_additional_fees: Some(NumericValue::Number(50.0)),
                profit_margin_percentage: Some(NumericValue::Number(20.0)),
                created_at: Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).single(),
                ..Order::new("ord-a")
            },
            Order {
                total_material_cost: Some(NumericValue::from("200")),
                profit_margin_percentage: Some(NumericValue::Number(0.0)),
                ..Order::new("ord-b")
            },
        ]
    }

    #[test]
    fn test_order_history_uses_engine() {
        let orders = orders();
        let rows = order_history(&orders);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].breakdown, compute_order_costs(&orders[0], None));
        assert_eq!(rows[1].breakdown.revenue.amount(), dec!(228));
    }

    #[test]
    fn test_write_csv() {
        let rows = order_history(&orders());
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Order ID,Reference,Customer,Created,Raw Materials,Packaging,Subtotal,\
             Additional Fees,VAT,Total With VAT,Margin %,Revenue,Profit"
        );
        assert_eq!(
            lines[1],
            "ord-a,PO-1,Nile Pharmacy,2024-03-09,50.00,0.00,50.00,50.00,14.00,114.00,20.00,142.50,28.50"
        );
        assert_eq!(
            lines[2],
            "ord-b,,,,200.00,0.00,200.00,0.00,28.00,228.00,0.00,228.00,0.00"
        );
    }

    #[test]
    fn test_write_csv_empty_has_no_rows() {
        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_to_json_keeps_full_precision() {
        let rows = order_history(&orders());
        let json: serde_json::Value = serde_json::from_str(&to_json(&rows).unwrap()).unwrap();

        assert_eq!(json[0]["breakdown"]["revenue"], serde_json::json!(142.5));
        assert_eq!(json[0]["breakdown"]["orderId"], serde_json::json!("ord-a"));
        assert_eq!(json[1]["reference"], serde_json::Value::Null);
    }
}
