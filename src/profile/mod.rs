//! Profile data model: per-state button bindings, modifier layers, axis
//! roles, and quick-select configuration for one controller setup.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::{self, ControllerDescriptor, axis_of_button};
use crate::error::{BindingError, PadError, Result};

mod bindings;
pub mod schema;
mod store;

pub use bindings::{
    Bindings, BindingKey, EffectiveAction, INHERITED_SUFFIX, INHERITED_TAG, inherited_label,
    is_inherited_text,
};
pub use store::{ProfileStore, sanitize_name, standard_profile, standard_profile_name};

/// Application modes a binding can target.
///
/// `All` is the default layer every other state inherits from; `Question`
/// and `Answer` additionally inherit from `Review`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum State {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "deckBrowser")]
    DeckBrowser,
    #[serde(rename = "overview")]
    Overview,
    #[serde(rename = "review")]
    Review,
    #[serde(rename = "question")]
    Question,
    #[serde(rename = "answer")]
    Answer,
    #[serde(rename = "dialog")]
    Dialog,
}

impl State {
    /// All states, in display order.
    pub const ALL_STATES: [Self; 7] = [
        Self::All,
        Self::DeckBrowser,
        Self::Overview,
        Self::Review,
        Self::Question,
        Self::Answer,
        Self::Dialog,
    ];

    /// Stable identifier used in profile files and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::DeckBrowser => "deckBrowser",
            Self::Overview => "overview",
            Self::Review => "review",
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Dialog => "dialog",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::All => "Default",
            Self::DeckBrowser => "Deck Browser",
            Self::Overview => "Overview",
            Self::Review => "Review",
            Self::Question => "Question",
            Self::Answer => "Answer",
            Self::Dialog => "Dialogs",
        }
    }

    /// Whether this state falls back to the review layer.
    #[must_use]
    pub const fn inherits_review(self) -> bool {
        matches!(self, Self::Question | Self::Answer)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for State {
    type Err = PadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL_STATES
            .into_iter()
            .find(|state| state.key() == s || state.display_name() == s)
            .ok_or_else(|| PadError::UnknownState { name: s.to_string() })
    }
}

/// What an analog axis is used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisRole {
    #[default]
    Unassigned,
    /// Past-threshold deflection acts as a pair of virtual buttons.
    Buttons,
    #[serde(rename = "Cursor Horizontal")]
    CursorHorizontal,
    #[serde(rename = "Cursor Vertical")]
    CursorVertical,
    #[serde(rename = "Scroll Horizontal")]
    ScrollHorizontal,
    #[serde(rename = "Scroll Vertical")]
    ScrollVertical,
}

impl AxisRole {
    /// All roles, in selector order.
    pub const ALL_ROLES: [Self; 6] = [
        Self::Unassigned,
        Self::Buttons,
        Self::CursorHorizontal,
        Self::CursorVertical,
        Self::ScrollHorizontal,
        Self::ScrollVertical,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Unassigned => "Unassigned",
            Self::Buttons => "Buttons",
            Self::CursorHorizontal => "Cursor Horizontal",
            Self::CursorVertical => "Cursor Vertical",
            Self::ScrollHorizontal => "Scroll Horizontal",
            Self::ScrollVertical => "Scroll Vertical",
        }
    }
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AxisRole {
    type Err = PadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL_ROLES
            .into_iter()
            .find(|role| role.display_name() == s)
            .ok_or_else(|| PadError::Other(format!("Unknown axis role: {s}")))
    }
}

/// Quick-select menu configuration: how the menu is driven plus the action
/// names it offers per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickSelect {
    pub select_with_stick: bool,
    pub select_with_dpad: bool,
    pub do_action_on_release: bool,
    pub do_action_on_stick_press: bool,
    pub do_action_on_stick_flick: bool,
    pub actions: BTreeMap<State, Vec<String>>,
}

impl Default for QuickSelect {
    fn default() -> Self {
        Self {
            select_with_stick: true,
            select_with_dpad: true,
            do_action_on_release: true,
            do_action_on_stick_press: true,
            do_action_on_stick_flick: false,
            actions: BTreeMap::new(),
        }
    }
}

impl QuickSelect {
    /// Action names offered for a state (empty slice when none configured).
    #[must_use]
    pub fn actions_for(&self, state: State) -> &[String] {
        self.actions.get(&state).map_or(&[], Vec::as_slice)
    }
}

/// One controller setup: a named, persistable set of bindings.
///
/// Profiles are plain owned values with a single editor at a time; all
/// mutation goes through methods that uphold the binding invariants
/// (modifier buttons are never bindable, indices stay in range).
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Unique display name, also the persistence key.
    pub name: String,
    /// Controller name, resolved against the registry on demand. The
    /// profile never owns the descriptor.
    pub controller: String,
    size: (u8, u8),
    mods: Vec<u8>,
    bindings: Bindings,
    axes_bindings: BTreeMap<u8, AxisRole>,
    invert_axis: BTreeMap<u8, bool>,
    pub quick_select: QuickSelect,
}

impl Profile {
    /// Create an empty profile for `(buttons, axes)` input counts.
    #[must_use]
    pub fn new(name: impl Into<String>, controller: impl Into<String>, size: (u8, u8)) -> Self {
        Self {
            name: name.into(),
            controller: controller.into(),
            size,
            mods: Vec::new(),
            bindings: Bindings::new(),
            axes_bindings: BTreeMap::new(),
            invert_axis: BTreeMap::new(),
            quick_select: QuickSelect::default(),
        }
    }

    /// Create an empty profile sized for a registered controller.
    pub fn for_controller(name: impl Into<String>, controller: &str) -> Result<Self> {
        let descriptor = controller::describe(controller)?;
        Ok(Self::new(name, controller, (descriptor.button_count(), descriptor.axis_count())))
    }

    /// Clone this profile under a new name.
    #[must_use]
    pub fn copy_as(&self, name: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.name = name.into();
        copy
    }

    /// Resolve this profile's controller descriptor from the registry.
    pub fn descriptor(&self) -> Result<&'static ControllerDescriptor> {
        controller::describe(&self.controller)
    }

    /// Number of physical buttons this profile was built for.
    #[must_use]
    pub const fn button_count(&self) -> u8 {
        self.size.0
    }

    /// Number of axes this profile was built for.
    #[must_use]
    pub const fn axis_count(&self) -> u8 {
        self.size.1
    }

    /// Modifier button indices, in layer order.
    #[must_use]
    pub fn mods(&self) -> &[u8] {
        &self.mods
    }

    /// Replace the modifier buttons. Bindings on buttons that become
    /// modifiers are dropped, since modifier buttons are not bindable.
    pub fn set_mods(&mut self, mods: Vec<u8>) -> Result<()> {
        for &button in &mods {
            if button >= self.size.0 {
                return Err(
                    BindingError::ButtonRange { button, buttons: self.size.0 }.into()
                );
            }
        }
        for &button in &mods {
            self.bindings.clear_button(button);
        }
        debug!(profile = %self.name, ?mods, "Updated modifier buttons");
        self.mods = mods;
        Ok(())
    }

    /// 1-based modifier number for a held button, if it is a modifier.
    #[must_use]
    pub fn modifier_for_button(&self, button: u8) -> Option<u8> {
        self.mods
            .iter()
            .position(|&m| m == button)
            .map(|index| u8::try_from(index + 1).unwrap_or(u8::MAX))
    }

    /// Raw binding for one slot, without inheritance. Empty when unset. Out
    /// of range indices simply read as unset.
    #[must_use]
    pub fn binding(&self, state: State, modifier: u8, button: u8) -> &str {
        self.bindings.get(state, modifier, button)
    }

    /// Effective action for a slot, applying layer inheritance.
    ///
    /// # Errors
    ///
    /// Rejects modifier buttons and out-of-range button/modifier indices
    /// with [`PadError::InvalidBinding`].
    pub fn effective_action(
        &self,
        state: State,
        modifier: u8,
        button: u8,
    ) -> Result<EffectiveAction> {
        self.validate_slot(modifier, button)?;
        Ok(self.bindings.resolve(state, modifier, button))
    }

    /// Store, replace, or clear one binding.
    ///
    /// Action text carrying the inherited-display marker clears the slot
    /// instead of being stored: selecting an inherited entry in an editor
    /// must never persist the display text as a literal action name. Action
    /// names are otherwise accepted without validation; the dispatch table
    /// owns that namespace.
    pub fn set_binding(
        &mut self,
        state: State,
        modifier: u8,
        button: u8,
        action: &str,
    ) -> Result<()> {
        self.validate_slot(modifier, button)?;
        let stored = if is_inherited_text(action) { "" } else { action };
        debug!(profile = %self.name, %state, modifier, button, action = stored, "Setting binding");
        self.bindings.set(state, modifier, button, stored);
        Ok(())
    }

    /// Button indices available for binding: every physical button that is
    /// not a modifier, in ascending order.
    #[must_use]
    pub fn bindable_buttons(&self) -> Vec<u8> {
        (0..self.size.0).filter(|button| !self.mods.contains(button)).collect()
    }

    /// The role assigned to an axis (`Unassigned` when unset).
    #[must_use]
    pub fn axis_role(&self, axis: u8) -> AxisRole {
        self.axes_bindings.get(&axis).copied().unwrap_or_default()
    }

    /// All explicit axis role assignments.
    #[must_use]
    pub const fn axes_bindings(&self) -> &BTreeMap<u8, AxisRole> {
        &self.axes_bindings
    }

    /// Assign a role to an axis.
    pub fn set_axis_role(&mut self, axis: u8, role: AxisRole) -> Result<()> {
        if axis >= self.size.1 {
            return Err(BindingError::AxisRange { axis, axes: self.size.1 }.into());
        }
        self.axes_bindings.insert(axis, role);
        Ok(())
    }

    /// Whether an axis reads inverted.
    #[must_use]
    pub fn axis_inverted(&self, axis: u8) -> bool {
        self.invert_axis.get(&axis).copied().unwrap_or(false)
    }

    /// All explicit axis inversion flags.
    #[must_use]
    pub const fn invert_axis_map(&self) -> &BTreeMap<u8, bool> {
        &self.invert_axis
    }

    /// Set an axis's inversion flag.
    pub fn set_axis_inverted(&mut self, axis: u8, inverted: bool) -> Result<()> {
        if axis >= self.size.1 {
            return Err(BindingError::AxisRange { axis, axes: self.size.1 }.into());
        }
        self.invert_axis.insert(axis, inverted);
        Ok(())
    }

    /// All stored bindings, in key order.
    pub fn bindings(&self) -> impl Iterator<Item = (BindingKey, &str)> {
        self.bindings.iter()
    }

    /// Display name for a button index: the descriptor's name when the
    /// controller is registered and the index is in range, else a numeric
    /// fallback.
    #[must_use]
    pub fn button_name(&self, button: u8) -> String {
        if let Ok(descriptor) = self.descriptor() {
            if let Some(name) = descriptor.button_name(button) {
                return name;
            }
        }
        if let Some((axis, positive)) = axis_of_button(button) {
            let sign = if positive { '+' } else { '-' };
            format!("Axis {axis} {sign}")
        } else {
            format!("Button {button}")
        }
    }

    fn validate_slot(&self, modifier: u8, button: u8) -> Result<()> {
        if self.mods.contains(&button) {
            return Err(BindingError::ModifierButton { button }.into());
        }
        if let Some((axis, _)) = axis_of_button(button) {
            if axis >= self.size.1 {
                return Err(BindingError::AxisRange { axis, axes: self.size.1 }.into());
            }
        } else if button >= self.size.0 {
            return Err(BindingError::ButtonRange { button, buttons: self.size.0 }.into());
        }
        if modifier as usize > self.mods.len() {
            return Err(
                BindingError::ModifierRange { modifier, mods: self.mods.len() }.into()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xbox_profile() -> Profile {
        let mut profile = Profile::for_controller("test", "Xbox One").unwrap();
        profile.set_mods(vec![16]).unwrap();
        profile
    }

    #[test]
    fn test_state_round_trip() {
        for state in State::ALL_STATES {
            assert_eq!(state.key().parse::<State>().unwrap(), state);
        }
        assert_eq!("Deck Browser".parse::<State>().unwrap(), State::DeckBrowser);
        assert!("reviewing".parse::<State>().is_err());
    }

    #[test]
    fn test_for_controller_sizes_from_registry() {
        let profile = Profile::for_controller("test", "Xbox One").unwrap();
        assert_eq!(profile.button_count(), 17);
        assert_eq!(profile.axis_count(), 4);
        assert!(Profile::for_controller("test", "Power Glove").is_err());
    }

    #[test]
    fn test_modifier_button_not_bindable() {
        let mut profile = xbox_profile();
        let err = profile.set_binding(State::All, 0, 16, "Sync").unwrap_err();
        assert!(matches!(
            err,
            PadError::InvalidBinding(BindingError::ModifierButton { button: 16 })
        ));
        assert!(profile.effective_action(State::All, 0, 16).is_err());
    }

    #[test]
    fn test_out_of_range_indices_rejected() {
        let mut profile = xbox_profile();
        assert!(matches!(
            profile.set_binding(State::All, 0, 50, "Sync").unwrap_err(),
            PadError::InvalidBinding(BindingError::ButtonRange { button: 50, buttons: 17 })
        ));
        assert!(matches!(
            profile.set_binding(State::All, 2, 0, "Sync").unwrap_err(),
            PadError::InvalidBinding(BindingError::ModifierRange { modifier: 2, mods: 1 })
        ));
        // Virtual buttons validate against the axis count
        assert!(profile.set_binding(State::All, 0, 107, "Scroll Down").is_ok());
        assert!(matches!(
            profile.set_binding(State::All, 0, 108, "Scroll Down").unwrap_err(),
            PadError::InvalidBinding(BindingError::AxisRange { axis: 4, axes: 4 })
        ));
    }

    #[test]
    fn test_raw_binding_reads_out_of_range_as_unset() {
        let profile = xbox_profile();
        assert_eq!(profile.binding(State::All, 0, 50), "");
    }

    #[test]
    fn test_effective_action_inheritance() {
        let mut profile = xbox_profile();
        profile.set_binding(State::All, 0, 0, "Undo").unwrap();

        let resolved = profile.effective_action(State::Question, 0, 0).unwrap();
        assert_eq!(resolved.action, "Undo");
        assert!(resolved.inherited);

        profile.set_binding(State::Review, 0, 0, "Again").unwrap();
        let resolved = profile.effective_action(State::Question, 0, 0).unwrap();
        assert_eq!(resolved.action, "Again");
        assert!(resolved.inherited);
    }

    #[test]
    fn test_inherited_display_text_is_never_stored() {
        let mut profile = xbox_profile();
        profile.set_binding(State::Review, 0, 0, "Again").unwrap();
        profile
            .set_binding(State::Review, 0, 0, &inherited_label("Undo"))
            .unwrap();
        assert_eq!(profile.binding(State::Review, 0, 0), "");
    }

    #[test]
    fn test_clearing_reexposes_inheritance() {
        let mut profile = xbox_profile();
        profile.set_binding(State::All, 0, 0, "Undo").unwrap();
        profile.set_binding(State::Review, 0, 0, "Again").unwrap();

        profile.set_binding(State::Review, 0, 0, "").unwrap();
        let resolved = profile.effective_action(State::Review, 0, 0).unwrap();
        assert_eq!(resolved.action, "Undo");
        assert!(resolved.inherited);
    }

    #[test]
    fn test_bindable_buttons_excludes_mods() {
        let profile = xbox_profile();
        let buttons = profile.bindable_buttons();
        assert_eq!(buttons.len(), 16);
        assert!(!buttons.contains(&16));
    }

    #[test]
    fn test_set_mods_drops_bindings_on_new_modifiers() {
        let mut profile = Profile::for_controller("test", "Xbox One").unwrap();
        profile.set_binding(State::All, 0, 9, "Sync").unwrap();
        profile.set_mods(vec![9]).unwrap();
        assert_eq!(profile.binding(State::All, 0, 9), "");
        assert_eq!(profile.modifier_for_button(9), Some(1));
        assert_eq!(profile.modifier_for_button(0), None);
    }

    #[test]
    fn test_axis_role_assignment() {
        let mut profile = xbox_profile();
        profile.set_axis_role(1, AxisRole::ScrollVertical).unwrap();
        assert_eq!(profile.axis_role(1), AxisRole::ScrollVertical);
        assert_eq!(profile.axis_role(0), AxisRole::Unassigned);
        assert!(profile.set_axis_role(4, AxisRole::Buttons).is_err());
    }

    #[test]
    fn test_button_names_fall_back_for_unknown_controllers() {
        let profile = Profile::new("test", "Mystery Pad", (10, 2));
        assert_eq!(profile.button_name(3), "Button 3");
        assert_eq!(profile.button_name(101), "Axis 0 +");

        let xbox = xbox_profile();
        assert_eq!(xbox.button_name(0), "A");
    }
}
