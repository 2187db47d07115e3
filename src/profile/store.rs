//! File-backed profile storage.
//!
//! One TOML document per profile under the store root, plus a
//! `controllers.toml` map recording which profile each controller prefers.
//! The store does whole-file reads and writes; profiles have a single
//! editor at a time, so no locking is involved.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{AxisRole, Profile, State};
use crate::controller::ControllerModel;
use crate::error::{PadError, Result, ResultExt};

const PROFILE_EXT: &str = "toml";
const ASSIGNMENTS_FILE: &str = "controllers.toml";

/// Reduce a profile display name to a safe file stem: path separators and
/// other filesystem-hostile characters are dropped, whitespace collapsed.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| {
            !matches!(c, '/' | '\\' | '%' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
                && !c.is_control()
        })
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() { "profile".to_string() } else { cleaned }
}

/// Name of the built-in fallback profile for given input counts.
#[must_use]
pub fn standard_profile_name(buttons: u8, axes: u8) -> String {
    format!("Standard Gamepad ({buttons} Buttons {axes} Axes)")
}

/// Stock bindings for the built-in fallback profile, per state. Entries
/// beyond the controller's button count are skipped at build time.
const STANDARD_BINDINGS: [(State, &[(u8, &str)]); 7] = [
    (State::All, &[(0, "Enter"), (4, "Undo"), (7, "Toggle Quick Select")]),
    (State::DeckBrowser, &[(0, "Select"), (1, "Collapse/Expand"), (2, "Browser")]),
    (State::Overview, &[(0, "Select"), (1, "Rebuild")]),
    (
        State::Review,
        &[(0, "Enter"), (8, "Card Info"), (13, "Replay Audio"), (14, "Flag"), (15, "Mark Note")],
    ),
    (State::Question, &[(0, "Flip Card")]),
    (State::Answer, &[(0, "Good"), (1, "Again"), (2, "Hard"), (3, "Easy")]),
    (State::Dialog, &[(0, "Select"), (4, "Escape")]),
];

const STANDARD_AXIS_ROLES: [AxisRole; 4] = [
    AxisRole::Buttons,
    AxisRole::ScrollVertical,
    AxisRole::CursorHorizontal,
    AxisRole::CursorVertical,
];

const STANDARD_QUICK_SELECT: [&str; 5] =
    ["Suspend Card", "Suspend Note", "Bury Card", "Bury Note", "Card Info"];

/// Build the built-in fallback profile for given input counts.
///
/// Used when a connecting controller has neither an assigned profile nor a
/// profile named after it. The controller reference is the closest registry
/// match by counts, defaulting to a DualShock 4 layout.
#[must_use]
pub fn standard_profile(buttons: u8, axes: u8) -> Profile {
    let controller = ControllerModel::ALL
        .into_iter()
        .find(|model| model.button_count() == buttons && model.axis_count() == axes)
        .unwrap_or(ControllerModel::DualShock4);

    let mut profile = Profile::new(
        standard_profile_name(buttons, axes),
        controller.display_name(),
        (buttons, axes),
    );
    for (state, entries) in STANDARD_BINDINGS {
        for &(button, action) in entries {
            if button < buttons {
                // Seed data stays within the profile invariants, so this
                // cannot fail
                let _ = profile.set_binding(state, 0, button, action);
            }
        }
    }
    for (axis, role) in STANDARD_AXIS_ROLES.into_iter().enumerate() {
        let axis = axis as u8;
        if axis < axes {
            let _ = profile.set_axis_role(axis, role);
        }
    }
    profile.quick_select.actions.insert(
        State::Review,
        STANDARD_QUICK_SELECT.into_iter().map(str::to_string).collect(),
    );
    profile
}

/// Profile storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    /// Open a store at an explicit directory. The directory is created
    /// lazily on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_dir().ok_or(PadError::NoDataDir)?;
        Ok(Self::new(base.join("cardpad").join("profiles")))
    }

    /// The store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{PROFILE_EXT}", sanitize_name(name)))
    }

    /// Find the file backing a profile name: the sanitized path when it
    /// exists, else any document whose `name` field matches exactly.
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let direct = self.path_for(name);
        if direct.is_file() {
            return Some(direct);
        }
        for (doc_name, path) in self.scan().ok()? {
            if doc_name == name {
                return Some(path);
            }
        }
        None
    }

    fn scan(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut found = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(found),
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PROFILE_EXT)
                || path.file_name().and_then(|f| f.to_str()) == Some(ASSIGNMENTS_FILE)
            {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            match Profile::from_toml(&text) {
                Ok(profile) => found.push((profile.name, path)),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable profile");
                }
            }
        }
        Ok(found)
    }

    /// Whether a profile exists under this name.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    /// Load a profile by name.
    ///
    /// # Errors
    ///
    /// [`PadError::ProfileNotFound`] when no document matches the name.
    pub fn load(&self, name: &str) -> Result<Profile> {
        let path = self
            .locate(name)
            .ok_or_else(|| PadError::ProfileNotFound { name: name.to_string() })?;
        debug!(name, path = %path.display(), "Loading profile");
        Profile::from_toml(&fs::read_to_string(path)?)
    }

    /// Write a profile to disk under its (sanitized) name.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating profile directory {}", self.root.display()))?;
        let path = self.path_for(&profile.name);
        info!(name = %profile.name, path = %path.display(), "Saving profile");
        fs::write(path, profile.to_toml()?)?;
        Ok(())
    }

    /// Delete a profile by name.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self
            .locate(name)
            .ok_or_else(|| PadError::ProfileNotFound { name: name.to_string() })?;
        info!(name, path = %path.display(), "Deleting profile");
        fs::remove_file(path)?;
        Ok(())
    }

    /// All stored profile names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.scan()?.into_iter().map(|(name, _)| name).collect();
        names.sort();
        Ok(names)
    }

    /// Rename a profile, moving its backing file.
    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        if self.exists(new) {
            return Err(PadError::ProfileExists { name: new.to_string() });
        }
        let mut profile = self.load(old)?;
        profile.name = new.to_string();
        self.save(&profile)?;
        self.delete(old)
    }

    /// Create a new profile by copying an existing one.
    pub fn copy(&self, source: &str, new_name: &str) -> Result<Profile> {
        if self.exists(new_name) {
            return Err(PadError::ProfileExists { name: new_name.to_string() });
        }
        let copy = self.load(source)?.copy_as(new_name);
        self.save(&copy)?;
        Ok(copy)
    }

    fn assignments_path(&self) -> PathBuf {
        self.root.join(ASSIGNMENTS_FILE)
    }

    fn load_assignments(&self) -> Result<BTreeMap<String, String>> {
        let path = self.assignments_path();
        if !path.is_file() {
            return Ok(BTreeMap::new());
        }
        toml::from_str(&fs::read_to_string(path)?)
            .map_err(|e| PadError::ProfileParse(format!("controller assignments: {e}")))
    }

    /// The profile name assigned to a controller, if any.
    pub fn assigned_profile(&self, controller: &str) -> Result<Option<String>> {
        Ok(self.load_assignments()?.remove(controller))
    }

    /// Record a controller's preferred profile.
    pub fn assign(&self, controller: &str, profile: &str) -> Result<()> {
        if !self.exists(profile) {
            return Err(PadError::ProfileNotFound { name: profile.to_string() });
        }
        let mut assignments = self.load_assignments()?;
        assignments.insert(controller.to_string(), profile.to_string());
        fs::create_dir_all(&self.root)?;
        let text = toml::to_string_pretty(&assignments)
            .map_err(|e| PadError::ProfileParse(format!("controller assignments: {e}")))?;
        fs::write(self.assignments_path(), text)?;
        info!(controller, profile, "Assigned profile to controller");
        Ok(())
    }

    /// Pick the profile for a connecting controller: its assigned profile
    /// first, then a stored profile named after the controller, then the
    /// built-in standard fallback for the reported input counts.
    pub fn find_profile(&self, controller: &str, buttons: u8, axes: u8) -> Result<Profile> {
        if let Some(assigned) = self.assigned_profile(controller)? {
            if self.exists(&assigned) {
                debug!(controller, profile = %assigned, "Using assigned profile");
                return self.load(&assigned);
            }
            warn!(controller, profile = %assigned, "Assigned profile is missing");
        }
        if self.exists(controller) {
            return self.load(controller);
        }
        let fallback = standard_profile_name(buttons, axes);
        if self.exists(&fallback) {
            return self.load(&fallback);
        }
        debug!(controller, buttons, axes, "No stored profile, using standard fallback");
        Ok(standard_profile(buttons, axes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ProfileStore) {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name(r"Test \/ % :"), "Test");
        assert_eq!(sanitize_name("My Profile"), "My Profile");
        assert_eq!(sanitize_name("///"), "profile");
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = store();
        let mut profile = standard_profile(16, 4);
        profile.set_binding(State::All, 0, 0, "Sync").unwrap();
        store.save(&profile).unwrap();

        let loaded = store.load(&profile.name).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_load_missing_profile() {
        let (_dir, store) = store();
        let err = store.load("nope").unwrap_err();
        assert!(matches!(err, PadError::ProfileNotFound { name } if name == "nope"));
    }

    #[test]
    fn test_load_by_display_name_with_hostile_characters() {
        let (_dir, store) = store();
        let mut profile = standard_profile(16, 4);
        profile.name = r"Test \/ % :".to_string();
        store.save(&profile).unwrap();

        // Both the display name and its sanitized stem resolve
        assert!(store.exists(r"Test \/ % :"));
        assert!(store.exists("Test"));
        assert_eq!(store.load(r"Test \/ % :").unwrap().name, r"Test \/ % :");
    }

    #[test]
    fn test_list_is_sorted_and_skips_assignments() {
        let (_dir, store) = store();
        store.save(&standard_profile(16, 4)).unwrap();
        let mut second = standard_profile(16, 4);
        second.name = "Alpha".to_string();
        store.save(&second).unwrap();
        store.assign("Xbox One", "Alpha").unwrap();

        let names = store.list().unwrap();
        assert_eq!(names, vec!["Alpha".to_string(), standard_profile_name(16, 4)]);
    }

    #[test]
    fn test_rename_and_copy() {
        let (_dir, store) = store();
        store.save(&standard_profile(16, 4)).unwrap();
        let original = standard_profile_name(16, 4);

        store.copy(&original, "Copy").unwrap();
        assert!(store.exists("Copy"));
        assert!(store.exists(&original));

        store.rename("Copy", "Renamed").unwrap();
        assert!(!store.exists("Copy"));
        assert_eq!(store.load("Renamed").unwrap().name, "Renamed");

        let err = store.copy(&original, "Renamed").unwrap_err();
        assert!(matches!(err, PadError::ProfileExists { .. }));
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = store();
        store.save(&standard_profile(16, 4)).unwrap();
        store.delete(&standard_profile_name(16, 4)).unwrap();
        assert!(!store.exists(&standard_profile_name(16, 4)));
        assert!(store.delete("gone").is_err());
    }

    #[test]
    fn test_find_profile_preference_chain() {
        let (_dir, store) = store();

        // Nothing stored: the built-in fallback applies
        let fallback = store.find_profile("Xbox One", 17, 4).unwrap();
        assert_eq!(fallback.name, standard_profile_name(17, 4));

        // A profile named after the controller wins over the fallback
        let mut named = standard_profile(17, 4);
        named.name = "Xbox One".to_string();
        store.save(&named).unwrap();
        assert_eq!(store.find_profile("Xbox One", 17, 4).unwrap().name, "Xbox One");

        // An explicit assignment wins over the name match
        let mut custom = standard_profile(17, 4);
        custom.name = "My Setup".to_string();
        store.save(&custom).unwrap();
        store.assign("Xbox One", "My Setup").unwrap();
        assert_eq!(store.find_profile("Xbox One", 17, 4).unwrap().name, "My Setup");
    }

    #[test]
    fn test_assign_requires_existing_profile() {
        let (_dir, store) = store();
        let err = store.assign("Xbox One", "ghost").unwrap_err();
        assert!(matches!(err, PadError::ProfileNotFound { .. }));
    }

    #[test]
    fn test_standard_profile_contents() {
        let profile = standard_profile(16, 4);
        assert_eq!(profile.binding(State::All, 0, 0), "Enter");
        assert_eq!(profile.binding(State::Answer, 0, 1), "Again");
        assert_eq!(profile.axis_role(1), AxisRole::ScrollVertical);
        assert_eq!(profile.quick_select.actions_for(State::Review).len(), 5);

        // Small pads only get bindings that fit
        let tiny = standard_profile(8, 0);
        assert_eq!(tiny.binding(State::Review, 0, 13), "");
        assert_eq!(tiny.binding(State::All, 0, 4), "Undo");
    }
}
