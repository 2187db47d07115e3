//! Shared fixtures for integration tests.
#![allow(dead_code)] // Not every test file uses every helper

use anyhow::Result;
use tempfile::TempDir;

use cardpad::profile::{Profile, ProfileStore, State};

/// A profile store rooted in a fresh temporary directory.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn temp_store() -> Result<(TempDir, ProfileStore)> {
    let dir = TempDir::new()?;
    let store = ProfileStore::new(dir.path().join("profiles"));
    Ok((dir, store))
}

/// An Xbox One profile with one modifier (the Xbox button) and a small,
/// known binding set exercising every inheritance layer.
pub fn xbox_profile(name: &str) -> Result<Profile> {
    let mut profile = Profile::for_controller(name, "Xbox One")?;
    profile.set_mods(vec![16])?;
    profile.set_binding(State::All, 0, 0, "Enter")?;
    profile.set_binding(State::All, 0, 4, "Undo")?;
    profile.set_binding(State::All, 1, 0, "Sync")?;
    profile.set_binding(State::Review, 0, 1, "Again")?;
    profile.set_binding(State::DeckBrowser, 0, 0, "Select")?;
    Ok(profile)
}
