//! # Seed Data Generator
//!
//! Populates the database with a demo shop for development.
//!
//! ## Usage
//! ```bash
//! # Default database path
//! cargo run -p shoplite-db --bin seed
//!
//! # Custom path and product count
//! cargo run -p shoplite-db --bin seed -- --db ./data/shoplite.db --count 200
//! ```
//!
//! ## Generated Data
//! - One demo shop with an Admin, a Manager, a Finance user and a Sales user
//! - Products across Food, Drink, Electronic, Household and Stationery
//! - A handful of expenses and ledger transactions so the finance
//!   dashboard has something to show

use chrono::Utc;
use std::env;
use uuid::Uuid;

use shoplite_core::{NewExpense, NewProduct, Role, Shop, TransactionKind, User};
use shoplite_db::{Database, DbConfig};

/// Product names per category, with a base price in pesewas.
const CATALOG: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Food",
        "Piece",
        &[
            ("Rice 5kg", 12000),
            ("Sugar 1kg", 1800),
            ("Cooking Oil 1L", 3500),
            ("Tomato Paste", 800),
            ("Gari 2kg", 2500),
            ("Milo 400g", 4200),
            ("Indomie Carton", 9500),
            ("Milk Tin", 1500),
        ],
    ),
    (
        "Drink",
        "Bottle",
        &[
            ("Coca-Cola 500ml", 700),
            ("Fanta 500ml", 700),
            ("Voltic Water 750ml", 350),
            ("Malta Guinness", 950),
            ("Alvaro", 850),
        ],
    ),
    (
        "Electronic",
        "Piece",
        &[
            ("Phone Charger", 2500),
            ("Earphones", 3000),
            ("Extension Board", 4500),
            ("Rechargeable Lamp", 6500),
            ("AA Batteries Pack", 1200),
        ],
    ),
    (
        "Household",
        "Piece",
        &[
            ("Washing Powder 1kg", 2200),
            ("Key Soap", 900),
            ("Mosquito Coil", 600),
            ("Broom", 1500),
            ("Bucket 20L", 2800),
        ],
    ),
    (
        "Stationery",
        "Piece",
        &[
            ("Exercise Book", 300),
            ("Blue Pen", 150),
            ("Pencil", 100),
            ("Ruler", 250),
            ("Notebook A5", 800),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_path = String::from("./shoplite_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(usize::MAX);
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
                println!("Shoplite Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Maximum number of products to generate");
                println!("  -d, --db <PATH>    Database file path (default: ./shoplite_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Shoplite Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if !db.shops().list().await?.is_empty() {
        println!("⚠ Database already seeded, skipping.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    // Demo shop + one user per role
    let admin_id = Uuid::new_v4().to_string();
    let shop = Shop {
        id: Uuid::new_v4().to_string(),
        name: "Shoplite Demo Store".to_string(),
        owner_id: admin_id.clone(),
        location: Some("Osu, Accra".to_string()),
        created_at: now,
    };
    db.shops().insert(&shop).await?;

    let staff = [
        (admin_id.clone(), "admin@shoplite.test", "Abena Owusu", Role::Admin, None),
        (
            Uuid::new_v4().to_string(),
            "manager@shoplite.test",
            "Kofi Mensah",
            Role::Manager,
            Some(shop.id.clone()),
        ),
        (
            Uuid::new_v4().to_string(),
            "finance@shoplite.test",
            "Esi Boateng",
            Role::Finance,
            Some(shop.id.clone()),
        ),
        (
            Uuid::new_v4().to_string(),
            "sales@shoplite.test",
            "Yaw Darko",
            Role::Sales,
            Some(shop.id.clone()),
        ),
    ];

    for (id, email, full_name, role, shop_id) in staff {
        db.users()
            .insert(&User {
                id,
                email: email.to_string(),
                full_name: full_name.to_string(),
                role,
                shop_id,
                must_reset_password: false,
                created_at: now,
            })
            .await?;
    }

    println!("✓ Created demo shop and users");

    // Products
    println!();
    println!("Generating products...");

    let mut generated = 0;
    'outer: for (category, unit, items) in CATALOG {
        for (idx, (name, base_price)) in items.iter().enumerate() {
            if generated >= count {
                break 'outer;
            }

            let input = NewProduct {
                name: (*name).to_string(),
                price_cents: *base_price,
                // cost roughly 60-80% of price, varied per item
                cost_price_cents: Some(base_price * (60 + (idx as i64 * 5) % 20) / 100),
                stock: 10 + (idx as i64 * 7) % 40,
                discount_bps: if idx % 4 == 0 { 1000 } else { 0 },
                category: (*category).to_string(),
                unit: (*unit).to_string(),
                attachment_url: None,
            };

            db.products().create(&shop.id, &input, Role::Manager).await?;
            generated += 1;
        }
    }

    let stored = db.products().count_for_shop(&shop.id).await?;
    println!("✓ Generated {} products ({} in catalog)", generated, stored);

    // Expenses and ledger transactions
    let expenses = [
        ("Shop rent", 50000, "Rent"),
        ("Fuel for generator", 8000, "Utilities"),
        ("Carton delivery", 3000, "Transport"),
    ];
    for (description, amount_cents, category) in expenses {
        db.expenses()
            .create(
                &shop.id,
                &NewExpense {
                    date: now.date_naive(),
                    description: description.to_string(),
                    amount_cents,
                    category: category.to_string(),
                    responsible: "Kofi Mensah".to_string(),
                },
            )
            .await?;
    }

    db.transactions()
        .create(&shop.id, TransactionKind::Income, "Opening float", 20000)
        .await?;
    db.transactions()
        .create(&shop.id, TransactionKind::Expense, "Till shortage", 1500)
        .await?;

    println!("✓ Generated expenses and transactions");
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
