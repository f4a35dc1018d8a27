//! Goal repository for monthly savings target database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::goals;

/// Error types for goal operations.
#[derive(Debug, thiserror::Error)]
pub enum GoalError {
    /// Goal not found or not owned by the requesting user.
    #[error("Goal not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a goal.
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Savings target for the month.
    pub target_amount: Decimal,
    /// Target month (1-12).
    pub target_month: u32,
    /// Target year.
    pub target_year: i32,
}

/// Input for updating a goal. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalInput {
    /// New target amount.
    pub target_amount: Option<Decimal>,
    /// New target month (1-12).
    pub target_month: Option<u32>,
    /// New target year.
    pub target_year: Option<i32>,
}

/// Goal repository for CRUD and month lookups.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    db: DatabaseConnection,
}

impl GoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, including when the
    /// `(user_id, target_month, target_year)` uniqueness constraint is hit.
    pub async fn create(&self, input: CreateGoalInput) -> Result<goals::Model, DbErr> {
        let now = Utc::now().into();
        let goal = goals::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            target_amount: Set(input.target_amount),
            target_month: Set(month_column(input.target_month)),
            target_year: Set(input.target_year),
            created_at: Set(now),
            updated_at: Set(now),
        };

        goal.insert(&self.db).await
    }

    /// Finds a goal by ID, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<goals::Model>, DbErr> {
        goals::Entity::find_by_id(id)
            .filter(goals::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Finds a user's goal for a specific month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_month(
        &self,
        user_id: Uuid,
        month: u32,
        year: i32,
    ) -> Result<Option<goals::Model>, DbErr> {
        goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .filter(goals::Column::TargetMonth.eq(month_column(month)))
            .filter(goals::Column::TargetYear.eq(year))
            .one(&self.db)
            .await
    }

    /// Lists all goals for a user, most recent month first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<goals::Model>, DbErr> {
        goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .order_by_desc(goals::Column::TargetYear)
            .order_by_desc(goals::Column::TargetMonth)
            .all(&self.db)
            .await
    }

    /// Lists a user's goals for a year, January first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_year(&self, user_id: Uuid, year: i32) -> Result<Vec<goals::Model>, DbErr> {
        goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .filter(goals::Column::TargetYear.eq(year))
            .order_by_asc(goals::Column::TargetMonth)
            .all(&self.db)
            .await
    }

    /// Updates a goal owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the goal does not exist, is owned by another
    /// user, or the database operation fails.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        input: UpdateGoalInput,
    ) -> Result<goals::Model, GoalError> {
        let goal = self
            .find_owned(id, user_id)
            .await?
            .ok_or(GoalError::NotFound(id))?;

        let mut active: goals::ActiveModel = goal.into();

        if let Some(amount) = input.target_amount {
            active.target_amount = Set(amount);
        }
        if let Some(month) = input.target_month {
            active.target_month = Set(month_column(month));
        }
        if let Some(year) = input.target_year {
            active.target_year = Set(year);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a goal owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the goal does not exist, is owned by another
    /// user, or the database operation fails.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), GoalError> {
        let result = goals::Entity::delete_many()
            .filter(goals::Column::Id.eq(id))
            .filter(goals::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(GoalError::NotFound(id));
        }

        Ok(())
    }
}

/// Widens a month to the INTEGER column type.
///
/// Callers validate months to 1-12; anything that cannot widen is mapped
/// to a value the table CHECK constraint rejects.
fn month_column(month: u32) -> i32 {
    i32::try_from(month).unwrap_or(i32::MAX)
}
