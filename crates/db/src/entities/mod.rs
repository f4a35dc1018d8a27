//! `SeaORM` entity definitions.

pub mod goals;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
