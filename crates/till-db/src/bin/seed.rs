//! # Seed Data Generator
//!
//! Fills a database with a run of sample trading days for development.
//!
//! ## Usage
//! ```bash
//! # 30 days ending yesterday (default)
//! cargo run -p till-db --bin seed
//!
//! # Custom amount
//! cargo run -p till-db --bin seed -- --days 90
//!
//! # Specify database path
//! cargo run -p till-db --bin seed -- --db ./data/till.db
//! ```
//!
//! ## Generated Days
//! - Float made up exactly as the float planner would suggest for a full till
//! - Takings of roughly £120 to £475, mostly notes
//! - Every fifth day has no expected figure; the rest land on, above or
//!   below takings in turn
//!
//! Existing dates are overwritten, so running twice is harmless.

use chrono::{Days, Local, NaiveDate};
use std::env;
use till_core::float_plan::suggest_float;
use till_core::{Denomination, Money, TillCounts, TillSubmission};
use till_db::migrations::migration_status;
use till_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut days: u64 = 30;
    let mut db_path = String::from("./till_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(30);
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
                println!("Till Counter Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>     Number of days to generate (default: 30)");
                println!("  -d, --db <PATH>    Database file path (default: ./till_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Till Counter Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("Days:     {}", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let today = Local::now().date_naive();
    let start = std::time::Instant::now();
    let mut written = 0;

    for offset in 1..=days {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        let submission = sample_day(date, offset);

        if let Err(e) = db.till_records().upsert(&submission).await {
            eprintln!("Failed to write {}: {}", date, e);
            continue;
        }
        written += 1;
    }

    println!();
    println!("✓ Wrote {} days in {:?}", written, start.elapsed());
    println!("  Records in database: {}", db.till_records().count().await?);

    if let Some(latest) = db.till_records().latest().await? {
        println!("  Latest: {} (takings {})", latest.date, latest.takings);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one sample day. `seed` only varies the figures.
fn sample_day(date: NaiveDate, seed: u64) -> TillSubmission {
    let seed = seed as i64;

    // Start from a well-stocked drawer and take the float out of it.
    let mut stock = TillCounts::default();
    for d in Denomination::ALL {
        stock.set(d, 100);
    }
    let float = suggest_float(&stock).counts;

    // Takings: mostly notes, some change.
    let mut till = TillCounts::default();
    for (d, count) in float.iter() {
        till.set(d, count);
    }
    let extra = [
        (Denomination::Note50, seed % 3),
        (Denomination::Note20, 4 + seed % 9),
        (Denomination::Note10, 3 + seed % 7),
        (Denomination::Note5, 2 + seed % 5),
        (Denomination::Coin100, seed % 11),
        (Denomination::Coin20, seed % 13),
    ];
    for (d, count) in extra {
        till.set(d, till.get(d) + count);
    }

    let float_total = float.total();
    let total_cash = till.total();
    let takings = total_cash - float_total;

    let expected_takings = match seed % 5 {
        0 => None,
        1 | 3 => Some(takings),
        2 => Some(takings - Money::from_cents(250)),
        _ => Some(takings + Money::from_cents(1_000)),
    };

    TillSubmission {
        date,
        total_cash,
        float_total,
        takings,
        expected_takings,
        denominations: till,
        floats: float,
    }
}
