//! Nutrition Meter Tools module
//!
//! Tool implementations over a meter session, returning serializable responses.

pub mod items;
pub mod profile;
pub mod status;
