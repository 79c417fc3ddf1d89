//! # Seed Data Generator
//!
//! Populates the database with orders in every shape the cost engine accepts.
//!
//! ## Usage
//! ```bash
//! # Generate 200 orders (default)
//! cargo run -p pharma-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p pharma-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p pharma-db --bin seed -- --db ./data/pharma.db
//! ```
//!
//! ## Generated Orders
//! Cycles through four recording styles:
//! - Itemized with numeric fields
//! - Itemized with string fields (`"12.50"`)
//! - Pre-computed `materialsCost` / `packagingCost`
//! - Legacy lump-sum `totalMaterialCost` with no line items

use chrono::{Duration, Utc};
use pharma_core::costing::aggregate::sum_line_items;
use pharma_core::report::order_history;
use pharma_core::{LineItem, NumericValue, Order};
use pharma_db::{generate_order_id, Database, DbConfig};
use std::env;

/// Active ingredients and excipients for realistic line items
const RAW_MATERIALS: &[(&str, f64)] = &[
    ("Paracetamol API", 14.2),
    ("Ibuprofen API", 21.75),
    ("Microcrystalline Cellulose", 3.4),
    ("Magnesium Stearate", 6.1),
    ("Lactose Monohydrate", 2.85),
    ("Povidone K30", 9.3),
];

/// Packaging unit prices
const PACKAGING: &[(&str, f64)] = &[
    ("Blister Foil", 0.42),
    ("PVC Film", 0.18),
    ("Carton Box", 0.65),
    ("Leaflet", 0.07),
];

const CUSTOMERS: &[&str] = &[
    "Nile Pharmacy",
    "Delta Medical Stores",
    "Cairo Health Group",
    "Alexandria Clinics",
];

/// Stored margins, percent of revenue
const MARGINS: &[f64] = &[0.0, 12.5, 20.0, 25.0, 35.0];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./pharma_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pharma ERP Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of orders to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./pharma_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Pharma ERP Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Orders:   {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.orders().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} orders", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating orders...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let order = generate_order(seed);
        if let Err(e) = db.orders().insert(&order).await {
            eprintln!("Failed to insert {}: {}", order.id, e);
            continue;
        }
        generated += 1;

        if generated % 50 == 0 {
            println!("  Generated {} orders...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} orders in {:?}", generated, elapsed);

    println!();
    println!("Sample breakdowns (newest first):");
    let recent = db.orders().list_recent(5).await?;
    for row in order_history(&recent) {
        let b = &row.breakdown;
        println!(
            "  {:<14} cost {:>12}  margin {:>5}%  revenue {:>12}",
            row.reference.as_deref().unwrap_or("-"),
            b.total_with_tax,
            b.profit_margin,
            b.revenue
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one order; `seed` picks the recording style and the amounts.
fn generate_order(seed: usize) -> Order {
    let fees = 25.0 + (seed % 7) as f64 * 12.5;
    let margin = MARGINS[seed % MARGINS.len()];

    let mut order = Order {
        reference: Some(format!("PO-{:05}", seed + 1)),
        customer_name: Some(CUSTOMERS[seed % CUSTOMERS.len()].to_string()),
        total_additional_fees: Some(NumericValue::Number(fees)),
        profit_margin_percentage: Some(NumericValue::Number(margin)),
        created_at: Some(Utc::now() - Duration::hours(seed as i64)),
        ..Order::new(generate_order_id())
    };

    let raw_items = line_items(RAW_MATERIALS, seed, 3);
    let packaging_items = line_items(PACKAGING, seed, 2);

    match seed % 4 {
        0 => {
            order.raw_materials = Some(raw_items);
            order.packaging_materials = Some(packaging_items);
        }
        1 => {
            order.raw_materials = Some(as_text(raw_items));
            order.packaging_materials = Some(as_text(packaging_items));
            order.total_additional_fees = Some(NumericValue::Text(format!("{:.2}", fees)));
        }
        2 => {
            order.materials_cost = Some(total(&raw_items));
            order.packaging_cost = Some(total(&packaging_items));
            order.raw_materials = Some(raw_items);
        }
        _ => {
            let lump_sum = sum_line_items(Some(raw_items.as_slice()));
            order.total_material_cost = Some(NumericValue::Text(lump_sum.to_string()));
        }
    }

    order
}

fn line_items(catalog: &[(&str, f64)], seed: usize, count: usize) -> Vec<LineItem> {
    (0..count)
        .map(|offset| {
            let (_, unit_price) = catalog[(seed + offset) % catalog.len()];
            let quantity = 10.0 * (1 + (seed * 7 + offset * 3) % 20) as f64;
            LineItem::new(quantity, unit_price)
        })
        .collect()
}

/// Re-records numeric fields as strings, like older imports did.
fn as_text(items: Vec<LineItem>) -> Vec<LineItem> {
    items
        .into_iter()
        .map(|item| LineItem {
            quantity: item.quantity.map(text_of),
            unit_price: item.unit_price.map(text_of),
        })
        .collect()
}

fn text_of(value: NumericValue) -> NumericValue {
    match value {
        NumericValue::Number(n) => NumericValue::Text(n.to_string()),
        other => other,
    }
}

fn total(items: &[LineItem]) -> NumericValue {
    NumericValue::from(sum_line_items(Some(items)).amount())
}
