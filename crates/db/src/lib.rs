//! Record store: `SeaORM` entities, repositories, and migrations for
//! users, transactions, and savings goals.
//!
//! Everything takes an explicit [`DatabaseConnection`]; there is no
//! global pool.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{GoalRepository, TransactionRepository, UserRepository};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .max_connections(max_connections)
        .min_connections(min_connections);
    Database::connect(options).await
}
