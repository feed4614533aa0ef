//! Nutrition calculation module
//!
//! Validation, aggregation and recommendation math. Everything here is pure.

pub mod aggregator;
pub mod recommendation;
pub mod validator;

pub use aggregator::{compute_totals, is_over_limit, macro_breakdown, Macro, MacroSlice, CALORIE_LIMIT};
pub use recommendation::{
    calculate_bmr, compute_recommendation, estimate_energy, recommendation_from_tdee,
    EnergyEstimate, Recommendation, RecommendationEngine,
};
pub use validator::{is_valid, parse_amount, validate, FieldIssue, IssueKind, ValidationError};
