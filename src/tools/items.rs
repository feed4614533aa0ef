//! Item Tools
//!
//! Tools for logging, editing and removing items in the meter session.

use serde::Serialize;

use crate::models::{ItemCandidate, ItemField, ItemId, ItemUpdate, NutritionItem, RawInput, Totals};
use crate::nutrition::{macro_breakdown, FieldIssue, MacroSlice, ValidationError, CALORIE_LIMIT};
use crate::session::{ItemDraft, MeterSession};
use crate::store::StoreError;

/// Flat view of an item for list results
#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub quantity: u32,
    pub total_calories: f64,
}

impl From<&NutritionItem> for ItemSummary {
    fn from(item: &NutritionItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            calories: item.nutrition.calories,
            protein: item.nutrition.protein,
            carbs: item.nutrition.carbs,
            fat: item.nutrition.fat,
            quantity: item.quantity,
            total_calories: item.contribution().calories,
        }
    }
}

/// Returned whenever a candidate is rejected
#[derive(Debug, Serialize)]
pub struct ValidationFailedResponse {
    pub success: bool,
    pub error: String,
    pub fields: Vec<ItemField>,
    pub issues: Vec<FieldIssue>,
}

impl From<ValidationError> for ValidationFailedResponse {
    fn from(e: ValidationError) -> Self {
        Self {
            success: false,
            error: e.to_string(),
            fields: e.fields(),
            issues: e.issues,
        }
    }
}

/// Response for add/update/submit
#[derive(Debug, Serialize)]
pub struct ItemMutationResponse {
    pub success: bool,
    pub item: ItemSummary,
    pub totals: Totals,
    pub over_limit: bool,
}

impl ItemMutationResponse {
    fn new(session: &MeterSession, item: &NutritionItem) -> Self {
        Self {
            success: true,
            item: ItemSummary::from(item),
            totals: session.totals(),
            over_limit: session.over_limit(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListItemsResponse {
    pub items: Vec<ItemSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub totals: Totals,
    pub over_limit: bool,
    pub calorie_limit: f64,
    pub macro_breakdown: [MacroSlice; 3],
}

#[derive(Debug, Serialize)]
pub struct DeleteItemResponse {
    pub success: bool,
    pub removed: bool,
    pub id: ItemId,
    pub totals: Totals,
    pub over_limit: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearItemsResponse {
    pub success: bool,
    pub removed: usize,
    pub totals: Totals,
    pub over_limit: bool,
}

/// Response for adjust_quantity; `quantity` is None when the id was unknown
#[derive(Debug, Serialize)]
pub struct AdjustQuantityResponse {
    pub id: ItemId,
    pub found: bool,
    pub quantity: Option<u32>,
    pub totals: Totals,
    pub over_limit: bool,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub editing: Option<ItemId>,
    pub draft: ItemDraft,
}

/// Add a new item
pub fn add_item(
    session: &mut MeterSession,
    candidate: ItemCandidate,
) -> Result<ItemMutationResponse, ValidationFailedResponse> {
    match session.add_item(&candidate) {
        Ok(item) => Ok(ItemMutationResponse::new(session, &item)),
        Err(StoreError::Validation(e)) => Err(e.into()),
        Err(e) => Err(ValidationFailedResponse {
            success: false,
            error: e.to_string(),
            fields: Vec::new(),
            issues: Vec::new(),
        }),
    }
}

/// Update an item with a partial edit. Outer error is a missing id.
pub fn update_item(
    session: &mut MeterSession,
    id: ItemId,
    update: ItemUpdate,
) -> Result<Result<ItemMutationResponse, ValidationFailedResponse>, String> {
    match session.patch_item(id, &update) {
        Ok(item) => Ok(Ok(ItemMutationResponse::new(session, &item))),
        Err(StoreError::Validation(e)) => Ok(Err(e.into())),
        Err(e @ StoreError::NotFound(_)) => Err(e.to_string()),
    }
}

/// Submit the item form (add, or update when editing)
pub fn submit_draft(
    session: &mut MeterSession,
) -> Result<Result<ItemMutationResponse, ValidationFailedResponse>, String> {
    match session.submit() {
        Ok(id) => {
            let item = session
                .item(id)
                .cloned()
                .ok_or_else(|| format!("Item not found with id: {}", id))?;
            Ok(Ok(ItemMutationResponse::new(session, &item)))
        }
        Err(StoreError::Validation(e)) => Ok(Err(e.into())),
        Err(e @ StoreError::NotFound(_)) => Err(e.to_string()),
    }
}

/// Set one field of the item form
pub fn set_draft_field(
    session: &mut MeterSession,
    field: &str,
    value: RawInput,
) -> Result<DraftResponse, String> {
    let field = ItemField::parse(field)
        .ok_or_else(|| format!("Unknown item field: {} (expected name, calories, protein, carbs or fat)", field))?;
    session.set_draft_field(field, value);
    Ok(draft_response(session))
}

/// Load an item into the form for editing
pub fn start_edit(session: &mut MeterSession, id: ItemId) -> Result<DraftResponse, String> {
    session.start_edit(id).map_err(|e| e.to_string())?;
    Ok(draft_response(session))
}

pub fn cancel_edit(session: &mut MeterSession) -> DraftResponse {
    session.cancel_edit();
    draft_response(session)
}

fn draft_response(session: &MeterSession) -> DraftResponse {
    DraftResponse {
        editing: session.editing(),
        draft: session.draft().clone(),
    }
}

/// Delete an item; unknown ids are a no-op
pub fn delete_item(session: &mut MeterSession, id: ItemId) -> DeleteItemResponse {
    let removed = session.remove_item(id).is_some();
    DeleteItemResponse {
        success: true,
        removed,
        id,
        totals: session.totals(),
        over_limit: session.over_limit(),
    }
}

pub fn clear_items(session: &mut MeterSession) -> ClearItemsResponse {
    let removed = session.clear_items();
    ClearItemsResponse {
        success: true,
        removed,
        totals: session.totals(),
        over_limit: session.over_limit(),
    }
}

/// Change an item's quantity by `delta`, never going below 1
pub fn adjust_quantity(session: &mut MeterSession, id: ItemId, delta: i64) -> AdjustQuantityResponse {
    let quantity = session.adjust_quantity(id, delta);
    AdjustQuantityResponse {
        id,
        found: quantity.is_some(),
        quantity,
        totals: session.totals(),
        over_limit: session.over_limit(),
    }
}

pub fn list_items(session: &MeterSession) -> ListItemsResponse {
    let items: Vec<ItemSummary> = session.items().iter().map(ItemSummary::from).collect();
    let total = items.len();
    ListItemsResponse { items, total }
}

pub fn get_totals(session: &MeterSession) -> TotalsResponse {
    let totals = session.totals();
    TotalsResponse {
        totals,
        over_limit: session.over_limit(),
        calorie_limit: CALORIE_LIMIT,
        macro_breakdown: macro_breakdown(&totals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn egg() -> ItemCandidate {
        ItemCandidate::new("Egg", 70.0, 6.0, 1.0, 5.0)
    }

    #[test]
    fn test_add_item_reports_totals() {
        let mut session = MeterSession::new();
        let response = add_item(&mut session, egg()).unwrap();
        assert!(response.success);
        assert_eq!(response.item.quantity, 1);
        assert_eq!(response.totals.calories, 70.0);
        assert!(!response.over_limit);
    }

    #[test]
    fn test_add_item_rejects_invalid() {
        let mut session = MeterSession::new();
        let candidate = ItemCandidate {
            name: String::new(),
            calories: Some(-1.0),
            ..Default::default()
        };
        let rejected = add_item(&mut session, candidate).unwrap_err();
        assert!(!rejected.success);
        assert_eq!(
            rejected.fields,
            vec![ItemField::Name, ItemField::Calories, ItemField::Protein, ItemField::Carbs, ItemField::Fat]
        );
        assert_eq!(list_items(&session).total, 0);
    }

    #[test]
    fn test_update_item_unknown_id_is_error() {
        let mut session = MeterSession::new();
        let err = update_item(&mut session, ItemId(9), ItemUpdate::default()).unwrap_err();
        assert_eq!(err, "Item not found with id: 9");
    }

    #[test]
    fn test_update_item_validation_failure() {
        let mut session = MeterSession::new();
        let id = add_item(&mut session, egg()).unwrap().item.id;
        let update = ItemUpdate {
            name: Some(RawInput::from("   ")),
            ..Default::default()
        };
        let rejected = update_item(&mut session, id, update).unwrap().unwrap_err();
        assert_eq!(rejected.fields, vec![ItemField::Name]);
        assert_eq!(list_items(&session).items[0].name, "Egg");
    }

    #[test]
    fn test_form_flow() {
        let mut session = MeterSession::new();
        assert!(set_draft_field(&mut session, "fiber", RawInput::from("3")).is_err());

        set_draft_field(&mut session, "name", RawInput::from("Egg")).unwrap();
        set_draft_field(&mut session, "calories", RawInput::Number(70.0)).unwrap();
        set_draft_field(&mut session, "protein", RawInput::from("6")).unwrap();
        set_draft_field(&mut session, "carbs", RawInput::from("1")).unwrap();
        set_draft_field(&mut session, "fat", RawInput::from("5")).unwrap();

        let added = submit_draft(&mut session).unwrap().unwrap();
        let id = added.item.id;

        let editing = start_edit(&mut session, id).unwrap();
        assert_eq!(editing.editing, Some(id));
        set_draft_field(&mut session, "fat", RawInput::from("4")).unwrap();
        let updated = submit_draft(&mut session).unwrap().unwrap();
        assert_eq!(updated.item.id, id);
        assert_eq!(updated.totals.fat, 4.0);

        let cancelled = cancel_edit(&mut session);
        assert_eq!(cancelled.editing, None);
    }

    #[test]
    fn test_adjust_delete_and_clear() {
        let mut session = MeterSession::new();
        let id = add_item(&mut session, egg()).unwrap().item.id;

        let adjusted = adjust_quantity(&mut session, id, 2);
        assert_eq!(adjusted.quantity, Some(3));
        assert_eq!(adjusted.totals.calories, 210.0);

        let missing = adjust_quantity(&mut session, ItemId(77), 1);
        assert!(!missing.found);

        let lowered = adjust_quantity(&mut session, id, -5);
        assert_eq!(lowered.quantity, Some(1));

        let deleted = delete_item(&mut session, id);
        assert!(deleted.removed);
        assert!(!delete_item(&mut session, id).removed);

        add_item(&mut session, egg()).unwrap();
        add_item(&mut session, egg()).unwrap();
        let cleared = clear_items(&mut session);
        assert_eq!(cleared.removed, 2);
        assert_eq!(cleared.totals, Totals::zero());
    }

    #[test]
    fn test_get_totals_over_limit() {
        let mut session = MeterSession::new();
        let id = add_item(&mut session, ItemCandidate::new("Burger", 550.0, 25.0, 40.0, 30.0))
            .unwrap()
            .item
            .id;
        adjust_quantity(&mut session, id, 1);

        let response = get_totals(&session);
        assert_eq!(response.totals.calories, 1100.0);
        assert!(response.over_limit);
        assert_eq!(response.calorie_limit, 1000.0);
    }
}
