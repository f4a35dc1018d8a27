//! Database seeder for Fiscus development and testing.
//!
//! Seeds a demo user with two months of transactions and savings goals
//! for local development and testing purposes.
//!
//! Usage: cargo run --bin seeder

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use fiscus_core::auth::hash_password;
use fiscus_db::entities::{goals, sea_orm_active_enums::TransactionKind, transactions, users};

/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo account password, hashed at seed time so login works
const DEMO_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = fiscus_db::connect(&database_url, 5, 1)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    seed_demo_user(&db).await;

    println!("Seeding transactions...");
    seed_transactions(&db).await;

    println!("Seeding goals...");
    seed_goals(&db).await;

    println!("Seeding complete!");
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

fn amount(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// The previous and current (year, month) pairs, in that order.
fn seed_months() -> [(i32, u32); 2] {
    let today = Utc::now().date_naive();
    let (year, month) = (today.year(), today.month());
    let previous = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    [previous, (year, month)]
}

/// Seeds the demo user with a real password hash.
async fn seed_demo_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo user already exists, skipping...");
        return;
    }

    let password_hash = hash_password(DEMO_PASSWORD).expect("Failed to hash demo password");

    let user = users::ActiveModel {
        id: Set(demo_user_id()),
        email: Set("demo@fiscus.dev".to_string()),
        password_hash: Set(password_hash),
        full_name: Set("Demo User".to_string()),
        is_active: Set(true),
        last_login_at: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert demo user: {e}");
    } else {
        println!("  Created demo user: demo@fiscus.dev / {DEMO_PASSWORD}");
    }
}

/// Seeds two months of income and expenses for the demo user.
async fn seed_transactions(db: &DatabaseConnection) {
    let existing = transactions::Entity::find()
        .filter(transactions::Column::UserId.eq(demo_user_id()))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Demo transactions already exist, skipping...");
        return;
    }

    let mut rows: Vec<(NaiveDate, Decimal, TransactionKind, &str, &str)> = Vec::new();
    for (year, month) in seed_months() {
        rows.push((
            date(year, month, 1),
            amount("5200.00"),
            TransactionKind::Income,
            "Salary",
            "Monthly salary",
        ));
        rows.push((
            date(year, month, 3),
            amount("850.00"),
            TransactionKind::Expense,
            "Rent",
            "Apartment rent",
        ));
        rows.push((
            date(year, month, 5),
            amount("120.45"),
            TransactionKind::Expense,
            "Food",
            "Groceries",
        ));
        rows.push((
            date(year, month, 9),
            amount("60.00"),
            TransactionKind::Expense,
            "Transport",
            "Fuel",
        ));
        rows.push((
            date(year, month, 14),
            amount("35.99"),
            TransactionKind::Expense,
            "Entertainment",
            "Streaming subscriptions",
        ));
        rows.push((
            date(year, month, 18),
            amount("400.00"),
            TransactionKind::Income,
            "Freelance",
            "Side project invoice",
        ));
        rows.push((
            date(year, month, 21),
            amount("95.30"),
            TransactionKind::Expense,
            "Food",
            "Groceries",
        ));
        rows.push((
            date(year, month, 25),
            amount("180.00"),
            TransactionKind::Expense,
            "Utilities",
            "Electricity and internet",
        ));
    }

    let row_count = rows.len();
    let mut inserted = 0;
    for (transaction_date, value, kind, category, description) in rows {
        let tx = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(demo_user_id()),
            amount: Set(value),
            kind: Set(kind),
            category: Set(category.to_string()),
            description: Set(description.to_string()),
            transaction_date: Set(transaction_date),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = tx.insert(db).await {
            eprintln!("Failed to insert transaction: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} of {row_count} transactions");
}

/// Seeds a savings goal for each seeded month.
async fn seed_goals(db: &DatabaseConnection) {
    let mut inserted = 0;
    for (year, month) in seed_months() {
        let month_value = i32::try_from(month).unwrap();

        let exists = goals::Entity::find()
            .filter(goals::Column::UserId.eq(demo_user_id()))
            .filter(goals::Column::TargetMonth.eq(month_value))
            .filter(goals::Column::TargetYear.eq(year))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            println!("  Goal for {year}-{month:02} already exists, skipping...");
            continue;
        }

        let goal = goals::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(demo_user_id()),
            target_amount: Set(amount("1500.00")),
            target_month: Set(month_value),
            target_year: Set(year),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = goal.insert(db).await {
            eprintln!("Failed to insert goal: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} goals");
}
