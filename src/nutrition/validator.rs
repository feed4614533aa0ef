//! Item validation
//!
//! Parse step for raw numeric input and the predicate shared by the add and
//! update paths.

use serde::Serialize;
use thiserror::Error;

use crate::models::{ItemCandidate, ItemField, Nutrition, RawInput};

/// Parse a raw numeric field.
///
/// Returns `None` for missing, blank, unparsable or non-finite input. Sign is
/// not checked here.
pub fn parse_amount(raw: &RawInput) -> Option<f64> {
    let value = match raw {
        RawInput::Missing => return None,
        RawInput::Number(n) => *n,
        RawInput::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
    };
    value.is_finite().then_some(value)
}

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Empty,
    Missing,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: ItemField,
    pub issue: IssueKind,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.issue {
            IssueKind::Empty => "cannot be empty",
            IssueKind::Missing => "is missing or not a number",
            IssueKind::Negative => "cannot be negative",
        };
        write!(f, "{} {}", self.field, reason)
    }
}

/// A candidate item failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid item: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Fields to highlight in the form
    pub fn fields(&self) -> Vec<ItemField> {
        self.issues.iter().map(|i| i.field).collect()
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a candidate and return its nutrient values when well-formed
pub fn validate(candidate: &ItemCandidate) -> Result<Nutrition, ValidationError> {
    let mut issues = Vec::new();

    if candidate.name.trim().is_empty() {
        issues.push(FieldIssue { field: ItemField::Name, issue: IssueKind::Empty });
    }

    for field in ItemField::NUMERIC {
        let issue = match candidate.amount(field) {
            Some(v) if !v.is_finite() => Some(IssueKind::Missing),
            Some(v) if v < 0.0 => Some(IssueKind::Negative),
            Some(_) => None,
            None => Some(IssueKind::Missing),
        };
        if let Some(issue) = issue {
            issues.push(FieldIssue { field, issue });
        }
    }

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    Ok(Nutrition {
        calories: candidate.calories.unwrap_or_default(),
        protein: candidate.protein.unwrap_or_default(),
        carbs: candidate.carbs.unwrap_or_default(),
        fat: candidate.fat.unwrap_or_default(),
    })
}

pub fn is_valid(candidate: &ItemCandidate) -> bool {
    validate(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&RawInput::Number(5.5)), Some(5.5));
        assert_eq!(parse_amount(&RawInput::from(" 12 ")), Some(12.0));
        assert_eq!(parse_amount(&RawInput::from("-3")), Some(-3.0));
        assert_eq!(parse_amount(&RawInput::from("")), None);
        assert_eq!(parse_amount(&RawInput::from("12g")), None);
        assert_eq!(parse_amount(&RawInput::from("NaN")), None);
        assert_eq!(parse_amount(&RawInput::Number(f64::INFINITY)), None);
        assert_eq!(parse_amount(&RawInput::Missing), None);
    }

    #[test]
    fn test_valid_candidate() {
        let candidate = ItemCandidate::new("Egg", 70.0, 6.0, 1.0, 5.0);
        assert!(is_valid(&candidate));
        let nutrition = validate(&candidate).unwrap();
        assert_eq!(nutrition, Nutrition { calories: 70.0, protein: 6.0, carbs: 1.0, fat: 5.0 });
    }

    #[test]
    fn test_zero_values_are_valid() {
        assert!(is_valid(&ItemCandidate::new("Water", 0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_reports_every_offending_field() {
        let candidate = ItemCandidate {
            name: "  ".to_string(),
            calories: Some(-1.0),
            protein: None,
            carbs: Some(2.0),
            fat: Some(f64::NAN),
        };
        let err = validate(&candidate).unwrap_err();
        assert_eq!(
            err.issues,
            vec![
                FieldIssue { field: ItemField::Name, issue: IssueKind::Empty },
                FieldIssue { field: ItemField::Calories, issue: IssueKind::Negative },
                FieldIssue { field: ItemField::Protein, issue: IssueKind::Missing },
                FieldIssue { field: ItemField::Fat, issue: IssueKind::Missing },
            ]
        );
        assert_eq!(
            err.fields(),
            vec![ItemField::Name, ItemField::Calories, ItemField::Protein, ItemField::Fat]
        );
    }

    #[test]
    fn test_error_message_lists_issues() {
        let err = validate(&ItemCandidate::new("", 1.0, 1.0, 1.0, -1.0)).unwrap_err();
        assert_eq!(err.to_string(), "invalid item: name cannot be empty, fat cannot be negative");
    }
}
