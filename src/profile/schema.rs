//! Serialized profile document format.
//!
//! Profiles persist as TOML. Binding layers serialize as arrays of tables
//! per state, one table per modifier number:
//!
//! ```toml
//! name = "Xbox One"
//! size = [17, 4]
//! controller = "Xbox One"
//! mods = [16]
//!
//! [[bindings.all]]       # modifier 0 (none held)
//! 0 = "Enter"
//! 4 = "Undo"
//!
//! [[bindings.all]]       # modifier 1 (first modifier held)
//! 0 = "Sync"
//! ```
//!
//! Document types here are serde-facing only; [`ProfileDoc::into_profile`]
//! converts into the validated runtime [`Profile`], enforcing every binding
//! invariant on load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AxisRole, Profile, QuickSelect, State};
use crate::error::{PadError, Result};

/// On-disk profile document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDoc {
    pub name: String,
    /// `[buttons, axes]` input counts the profile was built for.
    pub size: [u8; 2],
    pub controller: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<u8>,
    #[serde(default)]
    pub quick_select: QuickSelectDoc,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub invert_axis: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub axes_bindings: BTreeMap<String, AxisRole>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, Vec<BTreeMap<String, String>>>,
}

/// On-disk quick-select table. Field names match the option labels shown in
/// configuration dialogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickSelectDoc {
    #[serde(rename = "Select with Stick", default = "default_true")]
    pub select_with_stick: bool,
    #[serde(rename = "Select with D-Pad", default = "default_true")]
    pub select_with_dpad: bool,
    #[serde(rename = "Do Action on Release", default = "default_true")]
    pub do_action_on_release: bool,
    #[serde(rename = "Do Action on Stick Press", default = "default_true")]
    pub do_action_on_stick_press: bool,
    #[serde(rename = "Do Action on Stick Flick", default)]
    pub do_action_on_stick_flick: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub actions: BTreeMap<String, Vec<String>>,
}

const fn default_true() -> bool {
    true
}

impl Default for QuickSelectDoc {
    fn default() -> Self {
        QuickSelect::default().into()
    }
}

impl From<QuickSelect> for QuickSelectDoc {
    fn from(quick_select: QuickSelect) -> Self {
        Self {
            select_with_stick: quick_select.select_with_stick,
            select_with_dpad: quick_select.select_with_dpad,
            do_action_on_release: quick_select.do_action_on_release,
            do_action_on_stick_press: quick_select.do_action_on_stick_press,
            do_action_on_stick_flick: quick_select.do_action_on_stick_flick,
            actions: quick_select
                .actions
                .into_iter()
                .map(|(state, actions)| (state.key().to_string(), actions))
                .collect(),
        }
    }
}

impl QuickSelectDoc {
    fn into_quick_select(self) -> Result<QuickSelect> {
        let mut actions = BTreeMap::new();
        for (key, names) in self.actions {
            actions.insert(key.parse::<State>()?, names);
        }
        Ok(QuickSelect {
            select_with_stick: self.select_with_stick,
            select_with_dpad: self.select_with_dpad,
            do_action_on_release: self.do_action_on_release,
            do_action_on_stick_press: self.do_action_on_stick_press,
            do_action_on_stick_flick: self.do_action_on_stick_flick,
            actions,
        })
    }
}

fn parse_index(key: &str) -> Result<u8> {
    key.parse::<u8>()
        .map_err(|_| PadError::ProfileParse(format!("invalid index key: {key:?}")))
}

impl ProfileDoc {
    /// Convert into a validated runtime profile.
    ///
    /// # Errors
    ///
    /// Fails when a state key is unknown, an index does not parse, or a
    /// binding violates the profile invariants (modifier buttons bound,
    /// out-of-range indices, more layers than modifiers).
    pub fn into_profile(self) -> Result<Profile> {
        let name = self.name.clone();
        let invalid = |err: PadError| PadError::ProfileInvalid {
            name: name.clone(),
            reason: err.to_string(),
        };

        let mut profile = Profile::new(self.name, self.controller, (self.size[0], self.size[1]));
        profile.set_mods(self.mods).map_err(invalid)?;
        profile.quick_select = self.quick_select.into_quick_select()?;

        for (key, inverted) in self.invert_axis {
            profile.set_axis_inverted(parse_index(&key)?, inverted).map_err(invalid)?;
        }
        for (key, role) in self.axes_bindings {
            profile.set_axis_role(parse_index(&key)?, role).map_err(invalid)?;
        }

        for (state_key, layers) in self.bindings {
            let state = state_key.parse::<State>()?;
            for (modifier, layer) in layers.into_iter().enumerate() {
                let modifier = u8::try_from(modifier).map_err(|_| {
                    PadError::ProfileParse(format!("too many binding layers for {state_key}"))
                })?;
                for (button_key, action) in layer {
                    let button = parse_index(&button_key)?;
                    profile.set_binding(state, modifier, button, &action).map_err(invalid)?;
                }
            }
        }

        Ok(profile)
    }
}

impl From<&Profile> for ProfileDoc {
    fn from(profile: &Profile) -> Self {
        let mut bindings: BTreeMap<String, Vec<BTreeMap<String, String>>> = BTreeMap::new();
        for (key, action) in profile.bindings() {
            let layers = bindings.entry(key.state.key().to_string()).or_default();
            let modifier = usize::from(key.modifier);
            while layers.len() <= modifier {
                layers.push(BTreeMap::new());
            }
            layers[modifier].insert(key.button.to_string(), action.to_string());
        }

        Self {
            name: profile.name.clone(),
            size: [profile.button_count(), profile.axis_count()],
            controller: profile.controller.clone(),
            mods: profile.mods().to_vec(),
            quick_select: profile.quick_select.clone().into(),
            invert_axis: profile
                .invert_axis_map()
                .iter()
                .map(|(axis, inverted)| (axis.to_string(), *inverted))
                .collect(),
            axes_bindings: profile
                .axes_bindings()
                .iter()
                .map(|(axis, role)| (axis.to_string(), *role))
                .collect(),
            bindings,
        }
    }
}

impl Profile {
    /// Parse a profile from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let doc: ProfileDoc =
            toml::from_str(text).map_err(|e| PadError::ProfileParse(e.to_string()))?;
        doc.into_profile()
    }

    /// Serialize this profile to TOML text.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&ProfileDoc::from(self))
            .map_err(|e| PadError::ProfileParse(e.to_string()))
    }
}
