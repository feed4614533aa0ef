//! Item form draft
//!
//! Raw contents of the add/edit form, kept unparsed until submit.

use serde::Serialize;

use crate::models::{ItemCandidate, ItemField, NutritionItem, RawInput};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemDraft {
    pub name: RawInput,
    pub calories: RawInput,
    pub protein: RawInput,
    pub carbs: RawInput,
    pub fat: RawInput,
}

impl ItemDraft {
    /// Draft pre-filled from an existing item (edit-start)
    pub fn from_item(item: &NutritionItem) -> Self {
        Self {
            name: RawInput::Text(item.name.clone()),
            calories: RawInput::Number(item.nutrition.calories),
            protein: RawInput::Number(item.nutrition.protein),
            carbs: RawInput::Number(item.nutrition.carbs),
            fat: RawInput::Number(item.nutrition.fat),
        }
    }

    pub fn set(&mut self, field: ItemField, raw: RawInput) {
        let slot = match field {
            ItemField::Name => &mut self.name,
            ItemField::Calories => &mut self.calories,
            ItemField::Protein => &mut self.protein,
            ItemField::Carbs => &mut self.carbs,
            ItemField::Fat => &mut self.fat,
        };
        *slot = raw;
    }

    /// Parse the draft into a candidate for validation
    pub fn candidate(&self) -> ItemCandidate {
        ItemCandidate::from_raw(&self.name, &self.calories, &self.protein, &self.carbs, &self.fat)
    }

    pub fn is_blank(&self) -> bool {
        [&self.name, &self.calories, &self.protein, &self.carbs, &self.fat]
            .iter()
            .all(|raw| raw.is_missing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, Nutrition};

    #[test]
    fn test_set_and_parse() {
        let mut draft = ItemDraft::default();
        assert!(draft.is_blank());

        draft.set(ItemField::Name, RawInput::from("Egg"));
        draft.set(ItemField::Calories, RawInput::from("70"));
        draft.set(ItemField::Protein, RawInput::Number(6.0));
        draft.set(ItemField::Carbs, RawInput::from("1"));
        draft.set(ItemField::Fat, RawInput::from("5"));

        assert!(!draft.is_blank());
        assert_eq!(draft.candidate(), ItemCandidate::new("Egg", 70.0, 6.0, 1.0, 5.0));
    }

    #[test]
    fn test_from_item_round_trips_to_same_candidate() {
        let item = NutritionItem {
            id: ItemId(3),
            name: "Rice".to_string(),
            nutrition: Nutrition { calories: 206.0, protein: 4.3, carbs: 45.0, fat: 0.4 },
            quantity: 2,
        };
        let draft = ItemDraft::from_item(&item);
        assert_eq!(draft.candidate(), ItemCandidate::new("Rice", 206.0, 4.3, 45.0, 0.4));
    }
}
