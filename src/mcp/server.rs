//! Nutrition Meter MCP Server Implementation
//!
//! Exposes one in-memory meter session as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{ItemCandidate, ItemId, ItemUpdate, RawInput};
use crate::session::MeterSession;
use crate::tools::items;
use crate::tools::profile;
use crate::tools::status::StatusTracker;

/// Nutrition Meter MCP Service
#[derive(Clone)]
pub struct MeterService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    session: Arc<Mutex<MeterSession>>,
    tool_router: ToolRouter<MeterService>,
}

impl MeterService {
    pub fn new(session: MeterSession) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            session: Arc::new(Mutex::new(session)),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn raw(value: Option<serde_json::Value>) -> RawInput {
    value.map(RawInput::from).unwrap_or_default()
}

// ============================================================================
// Item Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddItemParams {
    /// Item name (must not be empty)
    pub name: Option<serde_json::Value>,
    /// Calories per serving, number or numeric text
    pub calories: Option<serde_json::Value>,
    /// Protein grams per serving
    pub protein: Option<serde_json::Value>,
    /// Carbohydrate grams per serving
    pub carbs: Option<serde_json::Value>,
    /// Fat grams per serving
    pub fat: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateItemParams {
    pub id: u64,
    pub name: Option<serde_json::Value>,
    pub calories: Option<serde_json::Value>,
    pub protein: Option<serde_json::Value>,
    pub carbs: Option<serde_json::Value>,
    pub fat: Option<serde_json::Value>,
}

impl AddItemParams {
    fn into_candidate(self) -> ItemCandidate {
        ItemCandidate::from_raw(
            &raw(self.name),
            &raw(self.calories),
            &raw(self.protein),
            &raw(self.carbs),
            &raw(self.fat),
        )
    }
}

impl UpdateItemParams {
    fn into_update(self) -> ItemUpdate {
        ItemUpdate {
            name: self.name.map(RawInput::from),
            calories: self.calories.map(RawInput::from),
            protein: self.protein.map(RawInput::from),
            carbs: self.carbs.map(RawInput::from),
            fat: self.fat.map(RawInput::from),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ItemIdParams {
    /// Item ID
    pub id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AdjustQuantityParams {
    pub id: u64,
    /// Change in quantity, e.g. 1 or -1 (default 1)
    #[serde(default = "default_delta")]
    pub delta: i64,
}

fn default_delta() -> i64 {
    1
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetDraftFieldParams {
    /// One of: name, calories, protein, carbs, fat
    pub field: String,
    /// Raw value as typed into the form
    pub value: Option<serde_json::Value>,
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileFieldParams {
    /// One of: age, height, weight, gender, activity_level
    pub field: String,
    /// Raw value; numbers for age/height/weight, text for gender/activity_level
    pub value: Option<serde_json::Value>,
}

#[tool_router]
impl MeterService {
    // --- Status ---

    #[tool(description = "Get the current status of the Nutrition Meter service including build info, uptime, and process information")]
    async fn meter_status(&self) -> Result<CallToolResult, McpError> {
        let item_count = self.session.lock().await.items().len();
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status(item_count))
    }

    #[tool(description = "Get instructions for logging items and reading totals and recommendations. Call this when starting a session or when unsure how to use the meter tools.")]
    fn meter_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::METER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(METER_INSTRUCTIONS)]))
    }

    // --- Items ---

    #[tool(description = "Log a food item with per-serving calories, protein, carbs and fat. Starts at quantity 1. Rejected items return success=false with the offending fields.")]
    async fn add_item(&self, Parameters(p): Parameters<AddItemParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        match items::add_item(&mut session, p.into_candidate()) {
            Ok(added) => to_json(&added),
            Err(rejected) => to_json(&rejected),
        }
    }

    #[tool(description = "Update fields of a logged item. Omitted fields keep their value; the merged item is validated again.")]
    async fn update_item(&self, Parameters(p): Parameters<UpdateItemParams>) -> Result<CallToolResult, McpError> {
        let id = ItemId(p.id);
        let mut session = self.session.lock().await;
        let result = items::update_item(&mut session, id, p.into_update())
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Ok(updated) => to_json(&updated),
            Err(rejected) => to_json(&rejected),
        }
    }

    #[tool(description = "Delete a logged item. Unknown ids are ignored (removed=false).")]
    async fn delete_item(&self, Parameters(p): Parameters<ItemIdParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&items::delete_item(&mut session, ItemId(p.id)))
    }

    #[tool(description = "Remove all logged items")]
    async fn clear_items(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&items::clear_items(&mut session))
    }

    #[tool(description = "Increase or decrease an item's quantity. Quantity never drops below 1.")]
    async fn adjust_quantity(&self, Parameters(p): Parameters<AdjustQuantityParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&items::adjust_quantity(&mut session, ItemId(p.id), p.delta))
    }

    #[tool(description = "List logged items in the order they were added")]
    async fn list_items(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        to_json(&items::list_items(&session))
    }

    #[tool(description = "Get quantity-weighted nutrient totals, the over-1000-calorie warning flag, and the protein/carbs/fat breakdown")]
    async fn get_totals(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        to_json(&items::get_totals(&session))
    }

    // --- Item Form ---

    #[tool(description = "Set one field of the item form (name, calories, protein, carbs, fat)")]
    async fn set_draft_field(&self, Parameters(p): Parameters<SetDraftFieldParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = items::set_draft_field(&mut session, &p.field, raw(p.value))
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Submit the item form: adds a new item, or updates the item being edited")]
    async fn submit_draft(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = items::submit_draft(&mut session).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Ok(item) => to_json(&item),
            Err(rejected) => to_json(&rejected),
        }
    }

    #[tool(description = "Load a logged item into the item form for editing")]
    async fn start_edit(&self, Parameters(p): Parameters<ItemIdParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = items::start_edit(&mut session, ItemId(p.id));
        match result {
            Ok(draft) => to_json(&draft),
            Err(_) => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Item not found", "id": {}}}"#,
                p.id
            ))])),
        }
    }

    #[tool(description = "Leave edit mode and clear the item form")]
    async fn cancel_edit(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&items::cancel_edit(&mut session))
    }

    // --- Profile ---

    #[tool(description = "Set a profile field (age, height, weight, gender, activity_level). The recommendation is recomputed once age, height and weight are all set.")]
    async fn set_profile_field(&self, Parameters(p): Parameters<SetProfileFieldParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = profile::set_profile_field(&mut session, &p.field, raw(p.value))
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the daily calorie and macro recommendation with the BMR/TDEE behind it")]
    async fn get_recommendation(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        to_json(&profile::get_recommendation(&session))
    }

    #[tool(description = "Show or hide the profile panel")]
    async fn toggle_profile_panel(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&profile::toggle_profile_panel(&mut session))
    }

    // --- Overview ---

    #[tool(description = "Get the full meter state: items, totals, warning flag, macro breakdown, recommendation, profile and item form")]
    async fn get_dashboard(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        to_json(&session.snapshot())
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MeterService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrition-meter".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition Meter".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrition Meter - food logging with live totals and a daily macro recommendation. \
                 Call meter_instructions first. \
                 Items: add_item/update_item/delete_item/clear_items/adjust_quantity/list_items/get_totals. \
                 Form: set_draft_field/submit_draft/start_edit/cancel_edit. \
                 Profile: set_profile_field/get_recommendation/toggle_profile_panel. \
                 Overview: get_dashboard. State is kept in memory for this session only."
                    .into(),
            ),
        }
    }
}
