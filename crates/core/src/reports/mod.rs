//! Financial report assembly.
//!
//! This module composes analytics, goal, and health outputs into the
//! named report payloads:
//! - Monthly and yearly reports
//! - Category breakdown
//! - Goal progress and goal pace
//! - Financial health
//! - Transaction details
//!
//! Callers fetch the record slices; everything here derives fresh
//! values from those slices and never fails.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
