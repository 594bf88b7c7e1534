//! # Seed Data Generator
//!
//! Populates the database with demo buses and a demo rider for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p busline-db --bin seed
//!
//! # Specify database path
//! cargo run -p busline-db --bin seed -- --db ./data/busline.db
//! ```
//!
//! ## Generated Data
//! - A handful of routes out of Tiruvannamalai, each with a 40-seat coach
//!   (4 seats per row), every seat Available at the route's base fare
//! - One demo rider: `demo@busline.dev` / `busline-demo`

use std::env;

use busline_core::{NewBus, DEFAULT_SEAT_COUNT};
use busline_db::{Database, DbConfig};

/// Demo routes: (name, origin, destination, km, depart, arrive, duration, fare cents)
const ROUTES: &[(&str, &str, &str, i64, &str, &str, &str, i64)] = &[
    (
        "Subash Express",
        "Tiruvannamalai",
        "Chennai",
        190,
        "07:00:00",
        "11:00:00",
        "4h",
        12000,
    ),
    (
        "Vaigai Deluxe",
        "Tiruvannamalai",
        "Madurai",
        280,
        "09:30:00",
        "15:00:00",
        "5h 30m",
        18500,
    ),
    (
        "Kaveri Liner",
        "Tiruvannamalai",
        "Bengaluru",
        210,
        "06:15:00",
        "10:45:00",
        "4h 30m",
        16000,
    ),
    (
        "Nilgiri Night Rider",
        "Tiruvannamalai",
        "Coimbatore",
        320,
        "21:00:00",
        "04:30:00",
        "7h 30m",
        22000,
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./busline_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Busline Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./busline_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Busline Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing buses
    let existing = db.buses().list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} buses", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating buses...");

    let start = std::time::Instant::now();

    for (name, origin, destination, km, depart, arrive, duration, fare) in ROUTES {
        let bus = db
            .buses()
            .insert_with_seats(
                &NewBus {
                    name: name.to_string(),
                    origin: origin.to_string(),
                    destination: destination.to_string(),
                    distance_km: *km,
                    start_time: depart.to_string(),
                    end_time: arrive.to_string(),
                    travel_time: duration.to_string(),
                    seat_price_cents: *fare,
                },
                DEFAULT_SEAT_COUNT,
            )
            .await?;

        println!(
            "  {} ({} → {}), {} seats at {} cents",
            bus.name, bus.origin, bus.destination, bus.available_seats, bus.seat_price_cents
        );
    }

    println!();
    println!("Creating demo rider...");

    let rider = db
        .accounts()
        .register("Demo Rider", "demo@busline.dev", "9000000001", "busline-demo")
        .await?;
    println!("  demo@busline.dev / busline-demo (user id {})", rider.id);

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Seeded {} buses ({} seats each) in {:?}",
        ROUTES.len(),
        DEFAULT_SEAT_COUNT,
        elapsed
    );
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
