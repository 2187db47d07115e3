//! Layered binding table with state inheritance.
//!
//! Bindings are keyed by `(state, modifier, button)`. Resolution falls back
//! from the specific state to the "all" layer, and for question/answer also
//! to the "review" layer. Precedence is fixed policy: an explicit binding
//! beats "review", which beats "all". See [`Bindings::resolve`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use super::State;

/// Substring marking action text that displays an inherited value rather
/// than naming a real action. Such text must never be stored as a binding.
pub const INHERITED_TAG: &str = "inherit";

/// Suffix appended to an action name when displaying an inherited value.
pub const INHERITED_SUFFIX: &str = " (inherited)";

/// Display text for an action resolved through inheritance.
#[must_use]
pub fn inherited_label(action: &str) -> String {
    format!("{action}{INHERITED_SUFFIX}")
}

/// Whether an action string is inherited-display text rather than an action
/// name.
#[must_use]
pub fn is_inherited_text(action: &str) -> bool {
    action.contains(INHERITED_TAG)
}

/// One slot in the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingKey {
    pub state: State,
    /// 0 = no modifier held; i > 0 = the profile's i-th modifier button.
    pub modifier: u8,
    pub button: u8,
}

/// The action a `(state, modifier, button)` triple resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveAction {
    /// Resolved action name; empty when the slot is unbound everywhere.
    pub action: String,
    /// True when the action came from the "all" or "review" layer rather
    /// than the requested state.
    pub inherited: bool,
}

impl EffectiveAction {
    /// The unbound result.
    #[must_use]
    pub const fn none() -> Self {
        Self { action: String::new(), inherited: false }
    }

    /// True when no layer binds this slot.
    #[must_use]
    pub fn is_unbound(&self) -> bool {
        self.action.is_empty()
    }

    /// Display text: the action name, suffixed when inherited.
    #[must_use]
    pub fn label(&self) -> String {
        if self.inherited {
            inherited_label(&self.action)
        } else {
            self.action.clone()
        }
    }
}

/// Sparse layered binding table. Empty actions are never stored; clearing a
/// slot removes its entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    map: BTreeMap<BindingKey, String>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw lookup of one slot, without inheritance. Empty string when unset.
    #[must_use]
    pub fn get(&self, state: State, modifier: u8, button: u8) -> &str {
        self.map
            .get(&BindingKey { state, modifier, button })
            .map_or("", String::as_str)
    }

    /// Store or clear one slot. An empty action removes the entry.
    pub fn set(&mut self, state: State, modifier: u8, button: u8, action: &str) {
        let key = BindingKey { state, modifier, button };
        if action.is_empty() {
            self.map.remove(&key);
        } else {
            self.map.insert(key, action.to_string());
        }
    }

    /// Resolve the effective action for a slot.
    ///
    /// Layer precedence, most specific first:
    /// 1. the requested state's own binding;
    /// 2. for question/answer, the "review" layer;
    /// 3. for any state other than "all", the "all" layer.
    pub fn resolve(&self, state: State, modifier: u8, button: u8) -> EffectiveAction {
        let explicit = self.get(state, modifier, button);
        if !explicit.is_empty() {
            return EffectiveAction { action: explicit.to_string(), inherited: false };
        }

        let mut action = "";
        if state != State::All {
            action = self.get(State::All, modifier, button);
        }
        if state.inherits_review() {
            let review = self.get(State::Review, modifier, button);
            if !review.is_empty() {
                action = review;
            }
        }

        trace!(%state, modifier, button, action, "Resolved inherited binding");
        EffectiveAction { action: action.to_string(), inherited: !action.is_empty() }
    }

    /// Remove every binding for a button, across all states and modifiers.
    pub fn clear_button(&mut self, button: u8) {
        self.map.retain(|key, _| key.button != button);
    }

    /// Iterate all stored bindings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (BindingKey, &str)> {
        self.map.iter().map(|(key, action)| (*key, action.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
