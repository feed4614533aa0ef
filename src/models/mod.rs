//! Data models
//!
//! Plain Rust structs for logged items, profile data and raw form input.

mod nutrition;
mod nutrition_item;
mod profile;
mod raw_input;

pub use nutrition::{Nutrition, Totals};
pub use nutrition_item::{ItemCandidate, ItemField, ItemId, ItemUpdate, NutritionItem};
pub use profile::{ActivityLevel, Gender, ProfileField, UserProfile};
pub use raw_input::RawInput;
