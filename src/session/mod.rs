//! Session module
//!
//! One user's working state: items, the item form, and the profile.

mod draft;
mod meter;

pub use draft::ItemDraft;
pub use meter::{MeterSession, MeterSnapshot};
