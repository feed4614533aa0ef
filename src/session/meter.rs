//! Meter session
//!
//! The command surface a presentation layer drives. Each mutating command
//! finishes by recomputing the derived state it affects, so any read after a
//! command sees values consistent with it.

use serde::Serialize;

use super::ItemDraft;
use crate::models::{
    ItemCandidate, ItemField, ItemId, ItemUpdate, NutritionItem, ProfileField, RawInput, Totals,
    UserProfile,
};
use crate::nutrition::{
    compute_totals, is_over_limit, macro_breakdown, EnergyEstimate, MacroSlice, Recommendation,
    RecommendationEngine, ValidationError,
};
use crate::store::{ItemStore, StoreError, StoreResult};

/// Everything a view needs after a command
#[derive(Debug, Clone, Serialize)]
pub struct MeterSnapshot {
    pub items: Vec<NutritionItem>,
    pub totals: Totals,
    pub over_limit: bool,
    pub macro_breakdown: [MacroSlice; 3],
    pub recommendation: Recommendation,
    pub energy: Option<EnergyEstimate>,
    pub profile: UserProfile,
    pub profile_panel_open: bool,
    pub editing: Option<ItemId>,
    pub draft: ItemDraft,
    pub input_error: Option<ValidationError>,
}

#[derive(Debug, Clone, Default)]
pub struct MeterSession {
    store: ItemStore,
    draft: ItemDraft,
    editing: Option<ItemId>,
    input_error: Option<ValidationError>,
    profile: UserProfile,
    profile_panel_open: bool,
    engine: RecommendationEngine,
    // Written only by recompute_totals()
    totals: Totals,
    over_limit: bool,
}

impl MeterSession {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Observation ---

    pub fn items(&self) -> &[NutritionItem] {
        self.store.items()
    }

    pub fn item(&self, id: ItemId) -> Option<&NutritionItem> {
        self.store.get(id)
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn over_limit(&self) -> bool {
        self.over_limit
    }

    pub fn recommendation(&self) -> Recommendation {
        self.engine.current()
    }

    pub fn energy(&self) -> Option<EnergyEstimate> {
        self.engine.estimate()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn profile_panel_open(&self) -> bool {
        self.profile_panel_open
    }

    pub fn editing(&self) -> Option<ItemId> {
        self.editing
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn input_error(&self) -> Option<&ValidationError> {
        self.input_error.as_ref()
    }

    pub fn snapshot(&self) -> MeterSnapshot {
        MeterSnapshot {
            items: self.store.items().to_vec(),
            totals: self.totals,
            over_limit: self.over_limit,
            macro_breakdown: macro_breakdown(&self.totals),
            recommendation: self.engine.current(),
            energy: self.engine.estimate(),
            profile: self.profile.clone(),
            profile_panel_open: self.profile_panel_open,
            editing: self.editing,
            draft: self.draft.clone(),
            input_error: self.input_error.clone(),
        }
    }

    // --- Item form ---

    pub fn set_draft_field(&mut self, field: ItemField, raw: RawInput) {
        self.draft.set(field, raw);
    }

    /// Submit the draft: update the item under edit, or add a new one.
    ///
    /// On success the draft is cleared and edit mode ends. On failure the
    /// draft is kept and the error is recorded for the form.
    pub fn submit(&mut self) -> StoreResult<ItemId> {
        let candidate = self.draft.candidate();
        let result = match self.editing {
            Some(id) => self.update_item(id, &candidate).map(|item| item.id),
            None => self.add_item(&candidate).map(|item| item.id),
        };

        if result.is_ok() {
            self.draft = ItemDraft::default();
            self.editing = None;
        }
        result
    }

    /// Enter edit mode for `id`, loading the item into the draft
    pub fn start_edit(&mut self, id: ItemId) -> StoreResult<()> {
        let item = self.store.get(id).ok_or(StoreError::NotFound(id))?;
        self.draft = ItemDraft::from_item(item);
        self.editing = Some(id);
        self.input_error = None;
        Ok(())
    }

    /// Leave edit mode and reset the draft
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft = ItemDraft::default();
        self.input_error = None;
    }

    // --- Item commands ---

    pub fn add_item(&mut self, candidate: &ItemCandidate) -> StoreResult<NutritionItem> {
        let result = self.store.add(candidate).map(NutritionItem::clone);
        self.record_outcome(&result);
        if let Ok(item) = &result {
            tracing::info!(id = %item.id, name = %item.name, "Item added");
            self.recompute_totals();
        }
        result
    }

    pub fn update_item(&mut self, id: ItemId, candidate: &ItemCandidate) -> StoreResult<NutritionItem> {
        let result = self.store.update(id, candidate).map(NutritionItem::clone);
        self.record_outcome(&result);
        if result.is_ok() {
            tracing::info!(id = %id, "Item updated");
            self.recompute_totals();
        }
        result
    }

    /// Partial edit: merge the changed fields over the item and re-validate
    pub fn patch_item(&mut self, id: ItemId, update: &ItemUpdate) -> StoreResult<NutritionItem> {
        let result = self.store.patch(id, update).map(NutritionItem::clone);
        self.record_outcome(&result);
        if result.is_ok() {
            tracing::info!(id = %id, "Item patched");
            self.recompute_totals();
        }
        result
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<NutritionItem> {
        let removed = self.store.remove(id)?;
        if self.editing == Some(id) {
            self.editing = None;
        }
        tracing::info!(id = %id, name = %removed.name, "Item removed");
        self.recompute_totals();
        Some(removed)
    }

    pub fn clear_items(&mut self) -> usize {
        let removed = self.store.clear();
        self.editing = None;
        tracing::info!(removed, "All items cleared");
        self.recompute_totals();
        removed
    }

    pub fn adjust_quantity(&mut self, id: ItemId, delta: i64) -> Option<u32> {
        let quantity = self.store.adjust_quantity(id, delta)?;
        tracing::debug!(id = %id, delta, quantity, "Quantity adjusted");
        self.recompute_totals();
        Some(quantity)
    }

    pub fn increment(&mut self, id: ItemId) -> Option<u32> {
        self.adjust_quantity(id, 1)
    }

    pub fn decrement(&mut self, id: ItemId) -> Option<u32> {
        self.adjust_quantity(id, -1)
    }

    // --- Profile commands ---

    pub fn set_profile_field(&mut self, field: ProfileField, raw: &RawInput) {
        self.profile.set_field(field, raw);
        self.recompute_recommendation();
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
        self.recompute_recommendation();
    }

    /// Flip profile panel visibility, returning the new state
    pub fn toggle_profile_panel(&mut self) -> bool {
        self.profile_panel_open = !self.profile_panel_open;
        self.profile_panel_open
    }

    // --- Recompute ---

    fn record_outcome<T>(&mut self, result: &StoreResult<T>) {
        match result {
            Ok(_) => self.input_error = None,
            Err(StoreError::Validation(e)) => {
                tracing::warn!(error = %e, "Rejected item");
                self.input_error = Some(e.clone());
            }
            Err(StoreError::NotFound(id)) => {
                tracing::warn!(id = %id, "Item not found");
            }
        }
    }

    fn recompute_totals(&mut self) {
        self.totals = compute_totals(self.store.items());
        self.over_limit = is_over_limit(&self.totals);
        tracing::debug!(
            items = self.store.len(),
            calories = self.totals.calories,
            over_limit = self.over_limit,
            "Totals recomputed"
        );
    }

    fn recompute_recommendation(&mut self) {
        self.engine.refresh(&self.profile);
    }
}
