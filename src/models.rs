// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- PERSISTED CONFIGURATION TIERS ---

/// One remembered destination: what was resolved, when, and how often.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub destination: String,
    pub last_used: DateTime<Utc>,
    pub count: u64,
}

/// On-disk shape of a configuration tier.
///
/// Two tiers exist: the user-global file (`~/.config/xcpilot/config.json`)
/// and an optional project-local file (`.xcpilot.json` in the project root).
/// The usage history lives exclusively in the user-global tier; the
/// project-local tier only contributes scalar overrides.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_simulator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_recent_history: Option<usize>,
    pub recent_simulators: Vec<UsageEntry>,
}

/// The result of merging the tiers with built-in defaults.
/// Precedence for scalars: project > user > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub default_simulator: Option<String>,
    pub max_recent_history: usize,
    pub recent_simulators: Vec<UsageEntry>,
}

// --- SIMULATOR INVENTORY ---

/// One device parsed from a `simctl list devices` listing.
///
/// Ephemeral: rebuilt from every inventory query, never cached across
/// resolution calls.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorRecord {
    pub name: String,
    pub udid: String,
    pub runtime: String,
    pub os_version: String,
    pub state: String,
    pub available: bool,
}

// --- DESTINATION RESOLUTION ---

/// Outcome of a destination resolution attempt.
///
/// Resolution is best-effort: `destination` is always usable, and every
/// environmental failure is expressed as a `warning`, never an error.
/// `was_resolved` is true only when an `OS=` clause was discovered and
/// appended to the input.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub destination: String,
    pub was_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ResolutionResult {
    /// A pass-through result: the input is echoed back unchanged.
    pub fn passthrough(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            was_resolved: false,
            explanation: None,
            warning: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}

// --- COMMAND OUTPUT ENVELOPE ---

/// The uniform success/failure envelope every command prints to stdout.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Envelope {
    pub fn ok(data: serde_json::Value) -> Self {
        Self { success: true, data: Some(data), error: None, details: None }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()), details: None }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
