//! Nutrition Meter Library
//!
//! Food logging, nutrient totals and daily macro recommendations.

pub mod build_info;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod session;
pub mod store;
pub mod tools;
