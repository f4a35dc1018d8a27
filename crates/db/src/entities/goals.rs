//! `SeaORM` Entity for goals table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use fiscus_core::types::GoalRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_amount: Decimal,
    pub target_month: i32,
    pub target_year: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for GoalRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            target_amount: model.target_amount,
            // The CHECK constraint keeps target_month in 1..=12.
            target_month: model.target_month.unsigned_abs(),
            target_year: model.target_year,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_model_maps_to_record() {
        let created = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let model = Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            target_amount: dec!(500.00),
            target_month: 2,
            target_year: 2024,
            created_at: created.into(),
            updated_at: created.into(),
        };

        let record = GoalRecord::from(model.clone());
        assert_eq!(record.id, model.id);
        assert_eq!(record.target_amount, dec!(500.00));
        assert_eq!(record.target_month, 2u32);
        assert_eq!(record.target_year, 2024);
        assert_eq!(record.created_at, created);
    }
}
