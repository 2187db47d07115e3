//! Quick-select menu model.
//!
//! A radial menu of per-state actions driven by stick direction or D-pad,
//! data only: rendering belongs to the host. Two reserved action names open
//! and close the menu from ordinary bindings; the session layer intercepts
//! them before dispatch.

use tracing::debug;

use crate::profile::{QuickSelect, State};

/// Reserved action name: toggle the quick-select menu.
pub const TOGGLE_ACTION: &str = "Toggle Quick Select";

/// Reserved action name: show the menu while held, act on release.
pub const SHOW_ACTION: &str = "Show Quick Select";

/// Minimum stick deflection for a selection to register.
const SELECT_DEADZONE: f32 = 0.5;

/// Selection state for the quick-select menu.
#[derive(Debug, Clone)]
pub struct QuickSelectMenu {
    config: QuickSelect,
    entries: Vec<String>,
    selected: Option<usize>,
    state: Option<State>,
}

impl QuickSelectMenu {
    #[must_use]
    pub fn new(config: QuickSelect) -> Self {
        Self { config, entries: Vec::new(), selected: None, state: None }
    }

    /// The menu configuration in use.
    #[must_use]
    pub const fn config(&self) -> &QuickSelect {
        &self.config
    }

    /// Open the menu for a state. Returns false (and stays closed) when the
    /// state has no quick-select actions configured.
    pub fn open(&mut self, state: State) -> bool {
        let entries = self.config.actions_for(state);
        if entries.is_empty() {
            debug!(%state, "No quick-select actions for state");
            return false;
        }
        self.entries = entries.to_vec();
        self.selected = None;
        self.state = Some(state);
        debug!(%state, entries = self.entries.len(), "Quick-select menu opened");
        true
    }

    /// Close the menu, returning the selected action when `take_action` is
    /// set and something was selected.
    pub fn close(&mut self, take_action: bool) -> Option<String> {
        let action = if take_action {
            self.selected.and_then(|index| self.entries.get(index).cloned())
        } else {
            None
        };
        self.entries.clear();
        self.selected = None;
        self.state = None;
        if let Some(ref name) = action {
            debug!(action = %name, "Quick-select menu closed with selection");
        }
        action
    }

    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.state.is_some()
    }

    /// The state the menu is open for.
    #[must_use]
    pub const fn state(&self) -> Option<State> {
        self.state
    }

    /// The actions on display.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Currently selected action, if any.
    #[must_use]
    pub fn selected_action(&self) -> Option<&str> {
        self.selected.and_then(|index| self.entries.get(index)).map(String::as_str)
    }

    /// Select by stick direction. Entries are arranged radially, clockwise
    /// from the top; deflection inside the deadzone keeps the previous
    /// selection.
    pub fn select_with_stick(&mut self, x: f32, y: f32) {
        if !self.config.select_with_stick || !self.is_shown() {
            return;
        }
        self.select_by_direction(x, y);
    }

    /// Select by D-pad, treating the held directions as a direction vector
    /// into the same radial arrangement as the stick.
    pub fn select_with_dpad(&mut self, up: bool, down: bool, left: bool, right: bool) {
        if !self.config.select_with_dpad || !self.is_shown() {
            return;
        }
        let x = f32::from(u8::from(right)) - f32::from(u8::from(left));
        let y = f32::from(u8::from(down)) - f32::from(u8::from(up));
        self.select_by_direction(x, y);
    }

    fn select_by_direction(&mut self, x: f32, y: f32) {
        if self.entries.is_empty() || x.hypot(y) < SELECT_DEADZONE {
            return;
        }
        // Angle measured clockwise from straight up, one slot per entry
        let angle = x.atan2(-y).rem_euclid(std::f32::consts::TAU);
        let slot = std::f32::consts::TAU / self.entries.len() as f32;
        let index = ((angle / slot).round() as usize) % self.entries.len();
        self.selected = Some(index);
    }
}
