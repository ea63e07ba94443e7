// src/core/usage.rs

//! Cross-invocation tracking of recently-resolved destinations.
//!
//! Two JSON tiers feed the tracker: the user-global `config.json` and an
//! optional project-local `.xcpilot.json`. Scalars merge with project-local
//! precedence, but the usage history array is owned and persisted only at the
//! user-global tier — cross-project recency is intentional, since most
//! developers iterate on one active project at a time.
//!
//! Tracking is advisory: it must never block or fail the caller's primary
//! operation, so every internal error is logged and swallowed. The
//! read-modify-write cycle is unlocked; two racing invocations may lose an
//! increment, which costs ranking staleness and nothing else.

use crate::constants::DEFAULT_MAX_RECENT_HISTORY;
use crate::core::paths::{self, PathError};
use crate::models::{EffectiveConfig, ToolConfig, UsageEntry};
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Tracks destination usage under an explicitly injected config directory,
/// so tests can redirect the user-global tier to a sandbox.
#[derive(Debug)]
pub struct UsageTracker {
    config_dir: PathBuf,
}

impl UsageTracker {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self { config_dir: config_dir.into() }
    }

    /// A tracker rooted at the well-known user config directory.
    pub fn from_default_location() -> Result<Self, PathError> {
        Ok(Self::new(paths::get_config_dir()?))
    }

    fn user_tier_path(&self) -> PathBuf {
        paths::user_config_path(&self.config_dir)
    }

    /// Records one successful destination usage. Never fails observably.
    pub fn record_usage(&self, destination: &str, project_root: Option<&Path>) {
        if let Err(e) = self.try_record(destination, project_root) {
            log::warn!("Usage tracking for '{}' skipped: {}", destination, e);
        }
    }

    fn try_record(&self, destination: &str, project_root: Option<&Path>) -> anyhow::Result<()> {
        let mut user = load_tier(&self.user_tier_path());
        let project = load_project_tier(project_root);
        let max_history = project
            .max_recent_history
            .or(user.max_recent_history)
            .unwrap_or(DEFAULT_MAX_RECENT_HISTORY);

        upsert(&mut user.recent_simulators, destination);
        user.recent_simulators.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        // Recency wins over frequency: truncation drops the oldest entries.
        user.recent_simulators.truncate(max_history);

        self.write_user_tier(&user)
    }

    /// The merged usage history, most-recent-first.
    pub fn load_ranked(&self, project_root: Option<&Path>) -> Vec<UsageEntry> {
        self.effective_config(project_root).recent_simulators
    }

    /// Merges both tiers with built-in defaults.
    pub fn effective_config(&self, project_root: Option<&Path>) -> EffectiveConfig {
        let user = load_tier(&self.user_tier_path());
        let project = load_project_tier(project_root);
        merge_configs(&user, &project)
    }

    /// Atomically replaces the user-global tier (write to a sibling temp
    /// file, then rename into place).
    fn write_user_tier(&self, config: &ToolConfig) -> anyhow::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.config_dir)?;
        serde_json::to_writer_pretty(&mut tmp, config)?;
        tmp.write_all(b"\n")?;
        tmp.persist(self.user_tier_path())?;
        Ok(())
    }
}

/// Pure two-tier merge with documented precedence: project > user > defaults
/// for scalar settings. The history array always comes from the user tier.
pub fn merge_configs(user: &ToolConfig, project: &ToolConfig) -> EffectiveConfig {
    let mut history = user.recent_simulators.clone();
    history.sort_by(|a, b| b.last_used.cmp(&a.last_used));
    EffectiveConfig {
        default_simulator: project
            .default_simulator
            .clone()
            .or_else(|| user.default_simulator.clone()),
        max_recent_history: project
            .max_recent_history
            .or(user.max_recent_history)
            .unwrap_or(DEFAULT_MAX_RECENT_HISTORY),
        recent_simulators: history,
    }
}

/// Exact-string upsert: bump an existing entry's count and timestamp, or
/// insert a fresh one with count 1.
fn upsert(entries: &mut Vec<UsageEntry>, destination: &str) {
    let now = Utc::now();
    match entries.iter_mut().find(|e| e.destination == destination) {
        Some(entry) => {
            entry.count += 1;
            entry.last_used = now;
        }
        None => entries.push(UsageEntry {
            destination: destination.to_string(),
            last_used: now,
            count: 1,
        }),
    }
}

/// Reads one tier. An absent file is an empty store; an unreadable or
/// malformed file degrades the same way (with a log line), never an error.
fn load_tier(path: &Path) -> ToolConfig {
    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed config tier '{}': {}", path.display(), e);
                ToolConfig::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ToolConfig::default(),
        Err(e) => {
            log::warn!("Could not read config tier '{}': {}", path.display(), e);
            ToolConfig::default()
        }
    }
}

fn load_project_tier(project_root: Option<&Path>) -> ToolConfig {
    match project_root {
        Some(root) => load_tier(&paths::project_config_path(root)),
        None => ToolConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tracker_in(dir: &Path) -> UsageTracker {
        UsageTracker::new(dir)
    }

    fn seed_user_tier(dir: &Path, config: &ToolConfig) {
        let path = paths::user_config_path(dir);
        fs::write(path, serde_json::to_string_pretty(config).unwrap()).unwrap();
    }

    fn entry(destination: &str, age_secs: i64) -> UsageEntry {
        UsageEntry {
            destination: destination.to_string(),
            last_used: Utc::now() - Duration::seconds(age_secs),
            count: 1,
        }
    }

    #[test]
    fn test_upsert_increments_without_duplicating() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker_in(dir.path());
        let dest = "platform=iOS Simulator,name=iPhone 15,OS=18.1";

        tracker.record_usage(dest, None);
        let first = tracker.load_ranked(None);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].count, 1);

        tracker.record_usage(dest, None);
        let second = tracker.load_ranked(None);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].count, 2);
        assert!(second[0].last_used >= first[0].last_used);
    }

    #[test]
    fn test_eleventh_entry_drops_exactly_the_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker_in(dir.path());
        let seeded: Vec<UsageEntry> =
            (0..10).map(|i| entry(&format!("name=Device {}", i), 100 + i)).collect();
        seed_user_tier(dir.path(), &ToolConfig { recent_simulators: seeded, ..Default::default() });

        tracker.record_usage("name=Device New", None);

        let ranked = tracker.load_ranked(None);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].destination, "name=Device New");
        // "Device 9" carried the oldest timestamp and must be the one dropped.
        assert!(ranked.iter().all(|e| e.destination != "name=Device 9"));
        assert!(ranked.windows(2).all(|w| w[0].last_used >= w[1].last_used));
    }

    #[test]
    fn test_project_tier_overrides_history_limit_but_is_never_written() {
        let config_dir = tempfile::tempdir().unwrap();
        let project_dir = tempfile::tempdir().unwrap();
        let tracker = tracker_in(config_dir.path());

        let project_path = paths::project_config_path(project_dir.path());
        let project_json = r#"{ "maxRecentHistory": 2 }"#;
        fs::write(&project_path, project_json).unwrap();

        for i in 0..5 {
            tracker.record_usage(&format!("name=Device {}", i), Some(project_dir.path()));
        }

        let ranked = tracker.load_ranked(Some(project_dir.path()));
        assert_eq!(ranked.len(), 2);
        // The project tier is read-only input to the merge.
        assert_eq!(fs::read_to_string(&project_path).unwrap(), project_json);
    }

    #[test]
    fn test_missing_files_are_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = UsageTracker::new(dir.path().join("never-created"));
        assert!(tracker.load_ranked(None).is_empty());
    }

    #[test]
    fn test_malformed_tier_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(paths::user_config_path(dir.path()), "{ not json").unwrap();
        let tracker = tracker_in(dir.path());
        assert!(tracker.load_ranked(None).is_empty());
        // Recording over a malformed tier repairs it.
        tracker.record_usage("id=ABC", None);
        assert_eq!(tracker.load_ranked(None).len(), 1);
    }

    #[test]
    fn test_user_scalars_survive_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker_in(dir.path());
        seed_user_tier(
            dir.path(),
            &ToolConfig {
                default_simulator: Some("iPhone 15".to_string()),
                ..Default::default()
            },
        );

        tracker.record_usage("name=iPhone 15", None);

        let user: ToolConfig = serde_json::from_str(
            &fs::read_to_string(paths::user_config_path(dir.path())).unwrap(),
        )
        .unwrap();
        assert_eq!(user.default_simulator.as_deref(), Some("iPhone 15"));
    }

    #[test]
    fn test_merge_precedence_is_project_then_user_then_defaults() {
        let user = ToolConfig {
            default_simulator: Some("user-sim".to_string()),
            max_recent_history: Some(7),
            recent_simulators: vec![entry("a", 10), entry("b", 5)],
        };
        let project = ToolConfig {
            default_simulator: Some("project-sim".to_string()),
            ..Default::default()
        };

        let effective = merge_configs(&user, &project);
        assert_eq!(effective.default_simulator.as_deref(), Some("project-sim"));
        assert_eq!(effective.max_recent_history, 7);
        // History comes from the user tier, most-recent-first.
        assert_eq!(effective.recent_simulators[0].destination, "b");

        let defaults_only = merge_configs(&ToolConfig::default(), &ToolConfig::default());
        assert_eq!(defaults_only.max_recent_history, DEFAULT_MAX_RECENT_HISTORY);
    }
}
