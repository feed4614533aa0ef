//! Nutrition Item model
//!
//! A logged food item, plus the candidate and partial-edit shapes that feed it.

use serde::{Deserialize, Serialize};

use super::{Nutrition, RawInput};
use crate::nutrition::parse_amount;

/// Identifier of a logged item, stable for the item's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editable field of an item form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Name,
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl ItemField {
    pub const NUMERIC: [ItemField; 4] = [
        ItemField::Calories,
        ItemField::Protein,
        ItemField::Carbs,
        ItemField::Fat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Name => "name",
            ItemField::Calories => "calories",
            ItemField::Protein => "protein",
            ItemField::Carbs => "carbs",
            ItemField::Fat => "fat",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(ItemField::Name),
            "calories" => Some(ItemField::Calories),
            "protein" => Some(ItemField::Protein),
            "carbs" => Some(ItemField::Carbs),
            "fat" => Some(ItemField::Fat),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionItem {
    pub id: ItemId,
    pub name: String,
    pub nutrition: Nutrition,
    pub quantity: u32,
}

impl NutritionItem {
    /// Nutrient contribution of this item at its current quantity
    pub fn contribution(&self) -> Nutrition {
        self.nutrition * f64::from(self.quantity)
    }
}

/// Parsed candidate for a new or edited item.
///
/// Numeric fields are `None` when the raw input was missing or unparsable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCandidate {
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl ItemCandidate {
    /// Candidate with every field present
    pub fn new(name: impl Into<String>, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            name: name.into(),
            calories: Some(calories),
            protein: Some(protein),
            carbs: Some(carbs),
            fat: Some(fat),
        }
    }

    /// Build a candidate from raw form values, running the parse step on each number
    pub fn from_raw(
        name: &RawInput,
        calories: &RawInput,
        protein: &RawInput,
        carbs: &RawInput,
        fat: &RawInput,
    ) -> Self {
        Self {
            name: name.as_text(),
            calories: parse_amount(calories),
            protein: parse_amount(protein),
            carbs: parse_amount(carbs),
            fat: parse_amount(fat),
        }
    }

    pub fn amount(&self, field: ItemField) -> Option<f64> {
        match field {
            ItemField::Name => None,
            ItemField::Calories => self.calories,
            ItemField::Protein => self.protein,
            ItemField::Carbs => self.carbs,
            ItemField::Fat => self.fat,
        }
    }
}

/// Partial edit of an existing item; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<RawInput>,
    pub calories: Option<RawInput>,
    pub protein: Option<RawInput>,
    pub carbs: Option<RawInput>,
    pub fat: Option<RawInput>,
}

impl ItemUpdate {
    /// Reconstruct the full candidate this edit would produce for `item`.
    ///
    /// Supplied raw values go through the parse step, so an unparsable
    /// replacement turns into a missing field rather than keeping the old one.
    pub fn merge_onto(&self, item: &NutritionItem) -> ItemCandidate {
        let merge = |raw: &Option<RawInput>, current: f64| match raw {
            Some(raw) => parse_amount(raw),
            None => Some(current),
        };

        ItemCandidate {
            name: self
                .name
                .as_ref()
                .map_or_else(|| item.name.clone(), RawInput::as_text),
            calories: merge(&self.calories, item.nutrition.calories),
            protein: merge(&self.protein, item.nutrition.protein),
            carbs: merge(&self.carbs, item.nutrition.carbs),
            fat: merge(&self.fat, item.nutrition.fat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn egg() -> NutritionItem {
        NutritionItem {
            id: ItemId(1),
            name: "Egg".to_string(),
            nutrition: Nutrition { calories: 70.0, protein: 6.0, carbs: 1.0, fat: 5.0 },
            quantity: 3,
        }
    }

    #[test]
    fn test_contribution_is_quantity_weighted() {
        let contribution = egg().contribution();
        assert_eq!(contribution, Nutrition { calories: 210.0, protein: 18.0, carbs: 3.0, fat: 15.0 });
    }

    #[test]
    fn test_from_raw_parses_numbers_and_text() {
        let candidate = ItemCandidate::from_raw(
            &RawInput::from("Toast"),
            &RawInput::from(" 80 "),
            &RawInput::Number(3.0),
            &RawInput::from("abc"),
            &RawInput::Missing,
        );
        assert_eq!(candidate.name, "Toast");
        assert_eq!(candidate.calories, Some(80.0));
        assert_eq!(candidate.protein, Some(3.0));
        assert_eq!(candidate.carbs, None);
        assert_eq!(candidate.fat, None);
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let update = ItemUpdate {
            calories: Some(RawInput::from("75")),
            ..Default::default()
        };
        let merged = update.merge_onto(&egg());
        assert_eq!(merged, ItemCandidate::new("Egg", 75.0, 6.0, 1.0, 5.0));
    }

    #[test]
    fn test_merge_with_garbage_marks_field_missing() {
        let update = ItemUpdate {
            fat: Some(RawInput::from("lots")),
            ..Default::default()
        };
        assert_eq!(update.merge_onto(&egg()).fat, None);
    }

    #[test]
    fn test_merge_with_missing_name_blanks_it() {
        let update = ItemUpdate {
            name: Some(RawInput::Missing),
            ..Default::default()
        };
        assert_eq!(update.merge_onto(&egg()).name, "");
    }

    #[test]
    fn test_item_field_parse() {
        assert_eq!(ItemField::parse("Calories"), Some(ItemField::Calories));
        assert_eq!(ItemField::parse(" fat "), Some(ItemField::Fat));
        assert_eq!(ItemField::parse("fiber"), None);
    }
}
