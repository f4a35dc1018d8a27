//! Core business logic for Fiscus.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `analytics` - Transaction aggregation, breakdowns, and chart series
//! - `goals` - Savings goal status, classification, and pacing
//! - `health` - Financial health scoring and recommendations
//! - `reports` - Report payload assembly
//! - `period` - Calendar period handling
//! - `auth` - Password hashing
//! - `validate` - Input validation rules

pub mod analytics;
pub mod auth;
pub mod goals;
pub mod health;
pub mod period;
pub mod reports;
pub mod types;
pub mod validate;
