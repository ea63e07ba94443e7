// src/core/destination.rs

//! Destination resolution: completing a partial simulator destination
//! (`platform=iOS Simulator,name=iPhone 15`) into a fully-qualified one
//! (`...,OS=18.1`) by querying live simulator inventory.
//!
//! Resolution is a best-effort enhancement over a usable fallback: every
//! environmental failure (missing tool, unparseable output, no match)
//! degrades to a warning plus the original input, never an error. The caller
//! can always try the string it gets back.

use crate::constants::{INVENTORY_TIMEOUT, MAX_ALTERNATIVES_IN_WARNING, XCRUN};
use crate::core::inventory::{compare_versions, parse_device_inventory};
use crate::core::usage::UsageTracker;
use crate::models::{ResolutionResult, SimulatorRecord};
use crate::system::executor::{self, ProcessRequest};
use std::path::Path;

/// The shape of a destination string. Classification is a pure function of
/// the string contents and is always computed before any inventory query:
/// UDID-qualified and fully-qualified specs never trigger a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationKind {
    /// `id=<UDID>`
    Udid,
    /// Carries an explicit `OS=` clause.
    FullyQualified,
    /// `name=` present but no `OS=`; the carried value is the device name.
    Partial(String),
    /// No `name=` to resolve against.
    Anonymous,
}

pub fn classify(spec: &str) -> DestinationKind {
    if spec.contains("id=") {
        DestinationKind::Udid
    } else if spec.contains("OS=") {
        DestinationKind::FullyQualified
    } else if let Some(name) = extract_name(spec) {
        DestinationKind::Partial(name)
    } else {
        DestinationKind::Anonymous
    }
}

fn extract_name(spec: &str) -> Option<String> {
    spec.split(',')
        .find_map(|pair| pair.trim().strip_prefix("name="))
        .map(str::to_string)
        .filter(|name| !name.is_empty())
}

/// Where the resolver gets its device listing from. The production source
/// shells out to `simctl`; tests substitute canned listings or failures.
pub trait InventorySource {
    /// The full `simctl list devices` text, or a human-readable warning
    /// describing why it could not be obtained.
    fn list_devices(&self) -> Result<String, String>;
}

/// The live source: `xcrun simctl list devices` through the bounded
/// executor. A process-level error or a non-zero exit both degrade to a
/// warning string.
#[derive(Debug, Default)]
pub struct SimctlInventory;

impl InventorySource for SimctlInventory {
    fn list_devices(&self) -> Result<String, String> {
        let args = vec!["simctl".to_string(), "list".to_string(), "devices".to_string()];
        let request = ProcessRequest::new(XCRUN, args).with_timeout(INVENTORY_TIMEOUT);
        match executor::execute(&request) {
            Ok(result) if result.success() => Ok(result.stdout),
            Ok(result) => Err(format!(
                "Simulator inventory query exited with code {}: {}",
                result.code, result.stderr
            )),
            Err(e) => Err(format!("Simulator inventory query failed: {}", e)),
        }
    }
}

/// Resolves destination specs against live inventory, feeding successful
/// destinations back into the usage tracker.
#[derive(Debug)]
pub struct DestinationResolver<'a, S = SimctlInventory> {
    tracker: &'a UsageTracker,
    inventory: S,
}

impl<'a> DestinationResolver<'a> {
    pub fn new(tracker: &'a UsageTracker) -> Self {
        Self {
            tracker,
            inventory: SimctlInventory,
        }
    }
}

impl<'a, S: InventorySource> DestinationResolver<'a, S> {
    pub fn with_inventory(tracker: &'a UsageTracker, inventory: S) -> Self {
        Self { tracker, inventory }
    }

    /// Turns a possibly-partial destination into a concrete one.
    ///
    /// The only way this fails is a caller contract violation; every
    /// environmental problem comes back as a pass-through value with a
    /// warning attached.
    pub fn resolve(&self, spec: &str, project_root: Option<&Path>) -> ResolutionResult {
        match classify(spec) {
            DestinationKind::Udid | DestinationKind::FullyQualified => {
                // Nothing to compute, but the destination is known-good:
                // record it so future partial specs rank it by recency.
                self.tracker.record_usage(spec, project_root);
                ResolutionResult::passthrough(spec)
                    .with_explanation("Destination is already in explicit format.")
            }
            DestinationKind::Anonymous => ResolutionResult::passthrough(spec).with_warning(
                "No device name found in destination; passing it through unchanged.",
            ),
            DestinationKind::Partial(name) => match self.inventory.list_devices() {
                Ok(listing) => self.complete_from_inventory(spec, &name, &listing, project_root),
                Err(warning) => {
                    log::warn!("Destination resolution degraded: {}", warning);
                    ResolutionResult::passthrough(spec).with_warning(warning)
                }
            },
        }
    }

    fn complete_from_inventory(
        &self,
        spec: &str,
        name: &str,
        listing: &str,
        project_root: Option<&Path>,
    ) -> ResolutionResult {
        let records = parse_device_inventory(listing);
        let best = records
            .iter()
            .filter(|r| r.available && r.name == name)
            .max_by(|a, b| compare_versions(&a.os_version, &b.os_version));

        let Some(device) = best else {
            return ResolutionResult::passthrough(spec)
                .with_warning(no_match_warning(name, &records));
        };

        // Only ever append; existing clauses are never rewritten or removed.
        let resolved = format!("{},OS={}", spec, device.os_version);
        self.tracker.record_usage(&resolved, project_root);
        ResolutionResult {
            destination: resolved,
            was_resolved: true,
            explanation: Some(format!(
                "Auto-selected {} ({} {}) [{}]",
                device.name, device.runtime, device.os_version, device.udid
            )),
            warning: None,
        }
    }
}

/// Builds the no-match warning: up to five distinct available device names,
/// sorted, with an ellipsis indicator when more exist. Callers rely on this
/// to recover from typos without a second round trip.
fn no_match_warning(requested: &str, records: &[SimulatorRecord]) -> String {
    let mut names: Vec<&str> = records
        .iter()
        .filter(|r| r.available)
        .map(|r| r.name.as_str())
        .collect();
    names.sort_unstable();
    names.dedup();

    if names.is_empty() {
        return format!(
            "No available simulator named '{}', and the inventory lists no available devices.",
            requested
        );
    }

    let truncated = names.len() > MAX_ALTERNATIVES_IN_WARNING;
    let shown = names
        .iter()
        .take(MAX_ALTERNATIVES_IN_WARNING)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "No available simulator named '{}'. Available: {}{}",
        requested,
        shown,
        if truncated { ", ..." } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox() -> (tempfile::TempDir, UsageTracker) {
        let dir = tempfile::tempdir().unwrap();
        let tracker = UsageTracker::new(dir.path());
        (dir, tracker)
    }

    const LISTING: &str = "\
-- iOS 18.0 --
    iPhone 15 (AAAA1111-0000-0000-0000-000000000001) (Shutdown)
    iPhone 15 Pro (AAAA1111-0000-0000-0000-000000000002) (Shutdown)
-- iOS 18.1 --
    iPhone 15 (AAAA1111-0000-0000-0000-000000000003) (Shutdown)
";

    /// A source that always produces the same listing.
    struct CannedInventory(&'static str);

    impl InventorySource for CannedInventory {
        fn list_devices(&self) -> Result<String, String> {
            Ok(self.0.to_string())
        }
    }

    /// A source standing in for a broken toolchain (missing simctl, timeout).
    struct BrokenInventory;

    impl InventorySource for BrokenInventory {
        fn list_devices(&self) -> Result<String, String> {
            Err("Simulator inventory query failed: simctl not found".to_string())
        }
    }

    #[test]
    fn test_classification_is_pure_and_exhaustive() {
        assert_eq!(classify("id=ABC-123-DEF"), DestinationKind::Udid);
        assert_eq!(
            classify("platform=iOS Simulator,name=iPhone 15,OS=17.5"),
            DestinationKind::FullyQualified
        );
        assert_eq!(
            classify("platform=iOS Simulator,name=iPhone 15"),
            DestinationKind::Partial("iPhone 15".to_string())
        );
        assert_eq!(classify("platform=iOS Simulator"), DestinationKind::Anonymous);
    }

    #[test]
    fn test_explicit_format_is_idempotent() {
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::new(&tracker);
        let spec = "platform=iOS Simulator,name=iPhone 15,OS=17.5";

        let result = resolver.resolve(spec, None);
        assert_eq!(result.destination, spec);
        assert!(!result.was_resolved);
        assert!(result.warning.is_none());
        assert!(result.explanation.is_some());
    }

    #[test]
    fn test_udid_passes_through_and_still_records_usage() {
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::new(&tracker);

        let result = resolver.resolve("id=ABC-123-DEF", None);
        assert_eq!(result.destination, "id=ABC-123-DEF");
        assert!(!result.was_resolved);

        let ranked = tracker.load_ranked(None);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].destination, "id=ABC-123-DEF");
    }

    #[test]
    fn test_anonymous_spec_warns_and_does_not_record() {
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::new(&tracker);

        let result = resolver.resolve("platform=iOS Simulator", None);
        assert_eq!(result.destination, "platform=iOS Simulator");
        assert!(!result.was_resolved);
        assert!(result.warning.is_some());
        assert!(tracker.load_ranked(None).is_empty());
    }

    #[test]
    fn test_partial_spec_resolves_end_to_end_through_the_source() {
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::with_inventory(&tracker, CannedInventory(LISTING));
        let spec = "platform=iOS Simulator,name=iPhone 15";

        let result = resolver.resolve(spec, None);
        assert_eq!(result.destination, format!("{},OS=18.1", spec));
        assert!(result.was_resolved);
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_inventory_failure_degrades_to_warning_and_passthrough() {
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::with_inventory(&tracker, BrokenInventory);
        let spec = "platform=iOS Simulator,name=iPhone 15";

        let result = resolver.resolve(spec, None);
        assert_eq!(result.destination, spec);
        assert!(!result.was_resolved);
        let warning = result.warning.unwrap();
        assert!(warning.contains("simctl not found"));
        // A degraded resolution records nothing.
        assert!(tracker.load_ranked(None).is_empty());
    }

    #[test]
    fn test_auto_resolution_picks_highest_os_version() {
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::new(&tracker);
        let spec = "platform=iOS Simulator,name=iPhone 15";

        let result = resolver.complete_from_inventory(spec, "iPhone 15", LISTING, None);
        assert_eq!(result.destination, format!("{},OS=18.1", spec));
        assert!(result.was_resolved);
        let explanation = result.explanation.unwrap();
        assert!(explanation.contains("iPhone 15"));
        assert!(explanation.contains("18.1"));

        // The *resolved* string is what gets recorded.
        let ranked = tracker.load_ranked(None);
        assert_eq!(ranked[0].destination, format!("{},OS=18.1", spec));
    }

    #[test]
    fn test_resolution_appends_an_os_clause_the_input_lacked() {
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::new(&tracker);
        let spec = "platform=iOS Simulator,name=iPhone 15";
        assert!(!spec.contains("OS="));

        let result = resolver.complete_from_inventory(spec, "iPhone 15", LISTING, None);
        assert!(result.was_resolved);
        assert_ne!(result.destination, spec);
        assert!(result.destination.contains("OS="));
        assert!(result.destination.starts_with(spec));
    }

    #[test]
    fn test_unavailable_devices_are_never_selected() {
        let listing = "\
-- iOS 18.0 --
    iPhone 15 (AAAA1111-0000-0000-0000-000000000001) (Unavailable)
-- iOS 18.1 --
    iPhone 15 (AAAA1111-0000-0000-0000-000000000002) (Shutdown)
";
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::new(&tracker);
        let result = resolver.complete_from_inventory(
            "platform=iOS Simulator,name=iPhone 15",
            "iPhone 15",
            listing,
            None,
        );
        assert!(result.destination.ends_with("OS=18.1"));
    }

    #[test]
    fn test_no_match_lists_sorted_alternatives() {
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::new(&tracker);
        let spec = "platform=iOS Simulator,name=iPhone 99";

        let result = resolver.complete_from_inventory(spec, "iPhone 99", LISTING, None);
        assert_eq!(result.destination, spec);
        assert!(!result.was_resolved);
        let warning = result.warning.unwrap();
        assert!(warning.contains("Available:"));
        assert!(warning.contains("iPhone 15"));
        // Nothing resolved, so nothing is recorded.
        assert!(tracker.load_ranked(None).is_empty());
    }

    #[test]
    fn test_no_match_warning_truncates_after_five_names() {
        let mut listing = String::from("-- iOS 18.0 --\n");
        for i in 0..7 {
            listing.push_str(&format!(
                "    Device {} (AAAA1111-0000-0000-0000-00000000000{}) (Shutdown)\n",
                i, i
            ));
        }
        let (_dir, tracker) = sandbox();
        let resolver = DestinationResolver::new(&tracker);

        let result =
            resolver.complete_from_inventory("name=Device 9", "Device 9", &listing, None);
        let warning = result.warning.unwrap();
        assert!(warning.contains("Device 0"));
        assert!(warning.contains("Device 4"));
        assert!(!warning.contains("Device 5"));
        assert!(warning.ends_with(", ..."));
    }
}
