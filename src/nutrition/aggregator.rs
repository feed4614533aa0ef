//! Nutrient aggregation
//!
//! Totals are always recomputed from the full item list; nothing is cached.

use serde::Serialize;

use crate::models::{NutritionItem, Totals};

/// Calorie total above which the over-limit warning is raised
pub const CALORIE_LIMIT: f64 = 1000.0;

/// Quantity-weighted sum of every item's nutrients
pub fn compute_totals(items: &[NutritionItem]) -> Totals {
    items.iter().map(NutritionItem::contribution).sum()
}

/// Strictly above [`CALORIE_LIMIT`]
pub fn is_over_limit(totals: &Totals) -> bool {
    totals.calories > CALORIE_LIMIT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
    Protein,
    Carbs,
    Fat,
}

/// One slice of the macro breakdown chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroSlice {
    #[serde(rename = "macro")]
    pub macro_kind: Macro,
    pub grams: f64,
    /// Fraction of total macro grams, 0.0 when nothing is logged
    pub share: f64,
}

/// Protein/carbs/fat grams with their share of the combined weight
pub fn macro_breakdown(totals: &Totals) -> [MacroSlice; 3] {
    let total_grams = totals.macro_grams();
    let slice = |macro_kind, grams: f64| MacroSlice {
        macro_kind,
        grams,
        share: if total_grams > 0.0 { grams / total_grams } else { 0.0 },
    };

    [
        slice(Macro::Protein, totals.protein),
        slice(Macro::Carbs, totals.carbs),
        slice(Macro::Fat, totals.fat),
    ]
}
