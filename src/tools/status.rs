//! Status Tool
//!
//! Runtime status of the Nutrition Meter service and usage instructions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Meter usage instructions for AI assistants
pub const METER_INSTRUCTIONS: &str = r#"
# Nutrition Meter Instructions

The meter keeps one in-memory list of food items for this session and derives
nutrient totals and a daily recommendation from it. Nothing is saved when the
server stops.

## Logging Items

Call `add_item` with a name and per-serving `calories`, `protein`, `carbs` and
`fat` (grams). Numbers may be sent as JSON numbers or as text. Every item starts
at quantity 1.

An item is rejected when:
- the name is empty
- any of calories/protein/carbs/fat is missing, not a number, or negative

A rejected item returns `"success": false` with the offending `fields`. Nothing
is added.

## Form Workflow

For a field-by-field form:
1. `set_draft_field` for each of name, calories, protein, carbs, fat
2. `submit_draft` adds the item (or updates it when editing)
3. `start_edit` loads an existing item into the form; `cancel_edit` discards

## Quantities

`adjust_quantity` with `delta` +1 / -1 (or any integer). Quantity never drops
below 1.

## Totals

`get_totals` returns the quantity-weighted sums and `over_limit`, which is true
when total calories are strictly above 1000.

## Daily Recommendation

Set `age` (years), `height` (cm), `weight` (kg), `gender` (male/female) and
`activity_level` (sedentary, lightly_active, moderately_active, very_active,
extra_active) with `set_profile_field`.

The recommendation is recomputed only once age, height and weight are all set.
While any of them is missing the last computed recommendation is kept.

| Level | Factor |
|-------|--------|
| sedentary | 1.2 |
| lightly_active | 1.375 |
| moderately_active | 1.55 |
| very_active | 1.725 |
| extra_active | 1.9 |

Macro split: 20% protein, 50% carbs, 30% fat of calories (4/4/9 kcal per gram).

## Overview

`get_dashboard` returns items, totals, warning flag, macro breakdown,
recommendation, profile and form state in one call.
"#;

/// Runtime status information
#[derive(Debug, Serialize)]
pub struct MeterStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub item_count: usize,
}

/// Tracks service start for uptime reporting
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, item_count: usize) -> MeterStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MeterStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            started_at: self.started_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            item_count,
        }
    }
}
