// src/core/inventory.rs

//! Parsing of `simctl list devices` text into structured simulator records.
//!
//! The listing groups devices under runtime headers:
//!
//! ```text
//! -- iOS 18.0 --
//!     iPhone 15 (ABCDEF12-...) (Shutdown)
//!     iPhone 15 Pro (GHIJKL34-...) (Booted)
//! ```
//!
//! Any line matching neither the header nor the device shape is ignored,
//! which keeps the parser tolerant of annotations future tool versions may
//! append.

use crate::models::SimulatorRecord;
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;

lazy_static! {
    /// `-- <Runtime> <version> --`
    static ref SECTION_RE: Regex =
        Regex::new(r"^-- (.+?) ([0-9][0-9.]*) --$").expect("section regex must compile");
    /// `<name> (<udid>) (<state>)`, indented under a section header. The name
    /// may itself contain parentheses ("iPad Pro (11-inch)"), so the UDID
    /// group is restricted to hex-and-dash and the state must close the line.
    static ref DEVICE_RE: Regex =
        Regex::new(r"^\s+(.+?) \(([0-9A-Fa-f-]{8,})\) \(([A-Za-z][A-Za-z ]*)\)$")
            .expect("device regex must compile");
}

/// States in which a device can actually be used as a build/run target.
/// Anything else (`Unavailable`, `Creating`, ...) is reported but not usable.
fn state_is_available(state: &str) -> bool {
    state == "Shutdown" || state == "Booted"
}

/// Parses a full device listing into records.
///
/// Device lines are attributed to the most recent runtime header; device
/// lines seen before any header are dropped. One deliberate strictness on
/// top of plain line-skipping: a `--` header the grammar does not recognize
/// (notably `-- Unavailable: com.apple.CoreSimulator... --`) *closes* the
/// current section instead of being ignored, so the devices listed under it
/// are never misattributed to the previous runtime.
pub fn parse_device_inventory(text: &str) -> Vec<SimulatorRecord> {
    let mut records = Vec::new();
    let mut section: Option<(String, String)> = None;

    for line in text.lines() {
        if let Some(caps) = SECTION_RE.captures(line) {
            if let (Some(runtime), Some(version)) = (caps.get(1), caps.get(2)) {
                section = Some((runtime.as_str().to_string(), version.as_str().to_string()));
            }
            continue;
        }
        if line.starts_with("--") {
            section = None;
            continue;
        }
        if let (Some((runtime, os_version)), Some(caps)) = (&section, DEVICE_RE.captures(line)) {
            let (Some(name), Some(udid), Some(state)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            let state = state.as_str().to_string();
            records.push(SimulatorRecord {
                name: name.as_str().to_string(),
                udid: udid.as_str().to_string(),
                runtime: runtime.clone(),
                os_version: os_version.clone(),
                available: state_is_available(&state),
                state,
            });
        }
    }

    log::debug!("Parsed {} simulator records from inventory", records.len());
    records
}

/// Segment-wise numeric comparison of dotted version strings.
///
/// Each version splits on `.` into integer segments compared pairwise
/// left-to-right, with a missing segment treated as `0`. This is explicitly
/// not lexicographic: `"19.0"` sorts above `"18.9"`, and `"9.1"` above
/// `"9.0.5"`. Segments that fail to parse count as `0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|segment| segment.parse::<u64>().unwrap_or(0))
            .collect()
    };
    let left = parse(a);
    let right = parse(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
