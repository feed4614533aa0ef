//! Item store
//!
//! Ordered in-memory collection of logged items. Every write goes through the
//! validator.

use thiserror::Error;

use crate::models::{ItemCandidate, ItemId, ItemUpdate, NutritionItem};
use crate::nutrition::{validate, ValidationError};

/// Store error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Item not found with id: {0}")]
    NotFound(ItemId),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct ItemStore {
    items: Vec<NutritionItem>,
    next_id: u64,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Items in insertion order
    pub fn items(&self) -> &[NutritionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&NutritionItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Validate and append a new item with quantity 1
    pub fn add(&mut self, candidate: &ItemCandidate) -> StoreResult<&NutritionItem> {
        let nutrition = validate(candidate)?;

        // Ids are never reused, even after clear()
        let id = ItemId(self.next_id);
        self.next_id += 1;

        self.items.push(NutritionItem {
            id,
            name: candidate.name.trim().to_string(),
            nutrition,
            quantity: 1,
        });

        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Replace an item's name and nutrients, keeping its id and quantity
    pub fn update(&mut self, id: ItemId, candidate: &ItemCandidate) -> StoreResult<&NutritionItem> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        let nutrition = validate(candidate)?;

        let item = &mut self.items[index];
        item.name = candidate.name.trim().to_string();
        item.nutrition = nutrition;
        Ok(&*item)
    }

    /// Merge a partial edit over the current item, then update
    pub fn patch(&mut self, id: ItemId, update: &ItemUpdate) -> StoreResult<&NutritionItem> {
        let candidate = self
            .get(id)
            .map(|item| update.merge_onto(item))
            .ok_or(StoreError::NotFound(id))?;
        self.update(id, &candidate)
    }

    /// Remove an item, returning it if it existed
    pub fn remove(&mut self, id: ItemId) -> Option<NutritionItem> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Remove every item, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Set quantity to `max(quantity + delta, 1)`; `None` if the id is absent
    pub fn adjust_quantity(&mut self, id: ItemId, delta: i64) -> Option<u32> {
        let index = self.position(id)?;
        let item = &mut self.items[index];
        let adjusted = (i64::from(item.quantity).saturating_add(delta)).clamp(1, i64::from(u32::MAX));
        item.quantity = adjusted as u32;
        Some(item.quantity)
    }
}
