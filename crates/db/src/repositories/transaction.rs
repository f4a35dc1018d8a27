//! Transaction repository for income and expense database operations.

use chrono::{NaiveDate, Utc};
use fiscus_core::period::Period;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::TransactionKind, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found or not owned by the requesting user.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Amount (always positive).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Category label.
    pub category: String,
    /// Description.
    pub description: String,
    /// Date the transaction occurred.
    pub transaction_date: NaiveDate,
}

/// Input for updating a transaction. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New kind.
    pub kind: Option<TransactionKind>,
    /// New category.
    pub category: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New transaction date.
    pub transaction_date: Option<NaiveDate>,
}

/// Transaction repository for CRUD and range queries.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, DbErr> {
        let now = Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            amount: Set(input.amount),
            kind: Set(input.kind),
            category: Set(input.category),
            description: Set(input.description),
            transaction_date: Set(input.transaction_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        transaction.insert(&self.db).await
    }

    /// Finds a transaction by ID, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Lists all transactions for a user, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists a user's transactions with dates in `from..=to`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::TransactionDate.gte(from))
            .filter(transactions::Column::TransactionDate.lte(to))
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists a user's transactions for a calendar month, most recent first.
    ///
    /// Months outside 1-12 match nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_month(
        &self,
        user_id: Uuid,
        month: u32,
        year: i32,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let Some(period) = Period::month(year, month) else {
            return Ok(Vec::new());
        };
        self.list_between(user_id, period.start, period.end).await
    }

    /// Lists a user's transactions for a calendar year, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_year(
        &self,
        user_id: Uuid,
        year: i32,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let Some(period) = Period::year(year) else {
            return Ok(Vec::new());
        };
        self.list_between(user_id, period.start, period.end).await
    }

    /// Updates a transaction owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist, is owned by
    /// another user, or the database operation fails.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let transaction = self
            .find_owned(id, user_id)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let mut active: transactions::ActiveModel = transaction.into();

        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(date) = input.transaction_date {
            active.transaction_date = Set(date);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a transaction owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist, is owned by
    /// another user, or the database operation fails.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }

        Ok(())
    }
}
