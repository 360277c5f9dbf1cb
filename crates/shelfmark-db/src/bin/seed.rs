//! # Seed Data Generator
//!
//! Populates the database with a demo cloth-store catalog for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p shelfmark-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p shelfmark-db --bin seed -- --count 500 --db ./data/shop.db
//! ```
//!
//! Each product has:
//! - Unique code: `{CATEGORY}-{NAME}-{INDEX}`
//! - Name with size/variant
//! - Price: ₹149.00 - ₹2,646.50
//! - Stock: 0 - 40
//! - Every third product carries an EAN-style barcode value

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;
use shelfmark_core::{new_id, Money, Product};
use shelfmark_db::{Database, DbConfig};
use std::env;

/// Product categories for realistic test data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "SAR",
        &[
            "Cotton Saree",
            "Silk Saree",
            "Georgette Saree",
            "Chiffon Saree",
            "Pochampally Ikat Saree",
            "Gadwal Saree",
            "Kanjeevaram Saree",
            "Chanderi Saree",
        ],
    ),
    (
        "MEN",
        &[
            "Cotton Dhoti",
            "Silk Dhoti",
            "Lungi",
            "Formal Shirt",
            "Kurta",
            "Pyjama",
            "Towel",
            "Angavastram",
        ],
    ),
    (
        "KID",
        &[
            "Frock",
            "Pattu Pavadai",
            "Boys Shirt",
            "Shorts",
            "School Uniform",
            "Kids Kurta Set",
        ],
    ),
    (
        "FAB",
        &[
            "Blouse Piece",
            "Lining Cloth",
            "Shirting Fabric",
            "Suiting Fabric",
            "Dress Material",
            "Petticoat",
        ],
    ),
];

/// Size/variant suffixes and the price they add, in paise.
const VARIANTS: &[(&str, i64)] = &[
    ("Plain", 0),
    ("Printed", 5_000),
    ("Zari Border", 25_000),
    ("Small", 0),
    ("Medium", 2_000),
    ("Large", 4_000),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./shelfmark_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1]
                        .parse()
                        .with_context(|| format!("invalid --count {:?}", args[i + 1]))?;
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
                println!("Shelfmark Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./shelfmark_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Shelfmark Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (category_idx, (category_code, names)) in CATEGORIES.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for (variant_idx, (variant, price_addon)) in VARIANTS.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let product = generate_product(
                    category_code,
                    name,
                    variant,
                    *price_addon,
                    category_idx * 1000 + name_idx * 20 + variant_idx,
                );

                if let Err(e) = db.products().insert(&product).await {
                    eprintln!("Failed to insert {}: {}", product.product_code, e);
                    continue;
                }

                generated += 1;

                if generated % 50 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    println!();
    println!("✓ Generated {} products in {:?}", generated, start.elapsed());

    println!();
    println!("Verifying lookup...");
    let sample = db.products().get_by_code("SAR-COT-000").await?;
    match sample {
        Some(p) => println!("  SAR-COT-000: {} @ {} ({} in stock)", p.name, p.price, p.quantity),
        None => println!("  SAR-COT-000 not generated"),
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with plausible data.
fn generate_product(category: &str, name: &str, variant: &str, price_addon: i64, seed: usize) -> Product {
    let now = Utc::now();

    let short: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    let product_code = format!("{}-{}-{:03}", category, short, seed);

    let barcode_value = (seed % 3 == 0).then(|| format!("890{:010}", seed));

    // ₹149.00 - ₹2,396.50 base, plus the variant addon
    let base_paise = 14_900 + ((seed * 1_750) % 225_000) as i64;
    let price = Money::new(Decimal::new(base_paise + price_addon, 2));

    Product {
        id: new_id(),
        product_code,
        name: format!("{} {}", name, variant),
        price,
        quantity: (seed % 41) as i64,
        barcode_value,
        created_at: now,
        updated_at: now,
    }
}
