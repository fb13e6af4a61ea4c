//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p slotbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p slotbook-db --bin seed -- --db ./data/slotbook.db
//! ```
//!
//! ## Generated Catalog
//! - "Water Sports" category taxed at 18%
//! - "Rentals" subcategory inheriting that rate
//! - One item per pricing kind (STATIC, COMPLIMENTARY, DISCOUNTED,
//!   TIERED, DYNAMIC), two of them bookable with weekly templates
//! - A few addons on the bookable items

use chrono::{DateTime, Utc};
use std::env;
use uuid::Uuid;

use slotbook_core::{
    Addon, Availability, Category, Discount, Item, ItemParent, Money, Pricing, Subcategory,
    TaxPolicy, TaxRate, Tier, TimeOfDay, TimeSlot, Weekday, Window,
};
use slotbook_db::{Database, DbConfig};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn time(hour: u8, minute: u8) -> TimeOfDay {
    // Constants below are all in range
    TimeOfDay::new(hour, minute).unwrap_or_else(|| TimeOfDay::from_minutes(0).unwrap())
}

fn weekday_template() -> Availability {
    Availability {
        days: vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        time_slots: vec![
            TimeSlot::new(time(9, 0), time(10, 0)),
            TimeSlot::new(time(10, 0), time(11, 0)),
            TimeSlot::new(time(11, 0), time(12, 0)),
            TimeSlot::new(time(14, 0), time(15, 0)),
            TimeSlot::new(time(15, 0), time(16, 0)),
        ],
    }
}

fn make_item(
    name: &str,
    parent: ItemParent,
    pricing: Pricing,
    bookable: bool,
    now: DateTime<Utc>,
) -> Item {
    Item {
        id: new_id(),
        name: name.to_string(),
        description: None,
        parent,
        tax_policy: TaxPolicy::Inherit,
        pricing,
        is_bookable: bookable,
        availability: bookable.then(weekday_template),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./slotbook_dev.db");

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
                println!("Slotbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./slotbook_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Slotbook Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.categories().list_active().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} categories", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    // Category taxed at 18%; everything below inherits unless it says
    // otherwise.
    let category = Category {
        id: new_id(),
        name: "Water Sports".to_string(),
        description: Some("Lake activities and equipment".to_string()),
        tax_policy: TaxPolicy::Applicable(TaxRate::from_bps(1800)),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.categories().insert(&category).await?;

    let subcategory = Subcategory {
        id: new_id(),
        category_id: category.id.clone(),
        name: "Rentals".to_string(),
        description: None,
        tax_policy: TaxPolicy::Inherit,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.subcategories().insert(&subcategory).await?;

    let items = vec![
        make_item(
            "Kayak Session",
            ItemParent::Subcategory(subcategory.id.clone()),
            Pricing::Static {
                price: Money::from_cents(4_500),
            },
            true,
            now,
        ),
        make_item(
            "Paddleboard Hour",
            ItemParent::Subcategory(subcategory.id.clone()),
            Pricing::Tiered {
                tiers: vec![
                    Tier {
                        up_to: 30,
                        price: Money::from_cents(5_000),
                    },
                    Tier {
                        up_to: 60,
                        price: Money::from_cents(9_000),
                    },
                ],
            },
            true,
            now,
        ),
        make_item(
            "Evening Boat Tour",
            ItemParent::Category(category.id.clone()),
            Pricing::Dynamic {
                windows: vec![
                    Window {
                        start: time(9, 0),
                        end: time(16, 59),
                        price: Money::from_cents(12_000),
                    },
                    Window {
                        start: time(17, 0),
                        end: time(21, 0),
                        price: Money::from_cents(18_000),
                    },
                ],
            },
            false,
            now,
        ),
        make_item(
            "Season Pass",
            ItemParent::Category(category.id.clone()),
            Pricing::Discounted {
                base_price: Money::from_cents(20_000),
                discount: Discount::Percent(1_000),
            },
            false,
            now,
        ),
        make_item(
            "Safety Briefing",
            ItemParent::Category(category.id.clone()),
            Pricing::Complimentary,
            false,
            now,
        ),
    ];

    for item in &items {
        db.items().insert(item).await?;
    }

    let addons = vec![
        Addon {
            id: new_id(),
            item_id: items[0].id.clone(),
            name: "Dry Bag".to_string(),
            price_cents: 500,
            is_mandatory: false,
            group: Some("Equipment".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        },
        Addon {
            id: new_id(),
            item_id: items[0].id.clone(),
            name: "Life Vest".to_string(),
            price_cents: 0,
            is_mandatory: true,
            group: Some("Equipment".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        },
        Addon {
            id: new_id(),
            item_id: items[1].id.clone(),
            name: "Photo Package".to_string(),
            price_cents: 2_500,
            is_mandatory: false,
            group: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        },
    ];

    for addon in &addons {
        db.addons().insert(addon).await?;
    }

    println!();
    println!("✓ Seeded 1 category, 1 subcategory, {} items, {} addons", items.len(), addons.len());
    println!();
    println!("Done! 🎉");

    Ok(())
}
