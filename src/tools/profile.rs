//! Profile Tools
//!
//! Tools for editing body metrics and reading the daily recommendation.

use serde::Serialize;

use crate::models::{ProfileField, RawInput, UserProfile};
use crate::nutrition::{EnergyEstimate, Recommendation};
use crate::session::MeterSession;

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: Recommendation,
    pub energy: Option<EnergyEstimate>,
    pub profile: UserProfile,
    /// False while age, height or weight is unset; the recommendation shown
    /// is then the last one computed from a complete profile
    pub profile_complete: bool,
}

#[derive(Debug, Serialize)]
pub struct ProfilePanelResponse {
    pub open: bool,
}

/// Set one profile field from raw input
pub fn set_profile_field(
    session: &mut MeterSession,
    field: &str,
    value: RawInput,
) -> Result<RecommendationResponse, String> {
    let field = ProfileField::parse(field).ok_or_else(|| {
        format!(
            "Unknown profile field: {} (expected age, height, weight, gender or activity_level)",
            field
        )
    })?;
    session.set_profile_field(field, &value);
    Ok(get_recommendation(session))
}

pub fn get_recommendation(session: &MeterSession) -> RecommendationResponse {
    let profile = session.profile().clone();
    RecommendationResponse {
        recommendation: session.recommendation(),
        energy: session.energy(),
        profile_complete: profile.is_complete(),
        profile,
    }
}

pub fn toggle_profile_panel(session: &mut MeterSession) -> ProfilePanelResponse {
    ProfilePanelResponse {
        open: session.toggle_profile_panel(),
    }
}
