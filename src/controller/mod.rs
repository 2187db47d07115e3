//! Static controller metadata: button and axis layouts per controller model.
//!
//! Every supported controller model is described by a [`ControllerDescriptor`]
//! held in a process-wide read-only registry. Profiles refer to controllers by
//! display name and resolve the descriptor on demand via [`describe`].

use std::sync::LazyLock;

use serde::Serialize;
use tracing::trace;

use crate::error::{PadError, Result};

mod identify;

pub use identify::identify;

/// Button indices at or above this value are virtual buttons derived from an
/// axis held past its threshold (two per axis: negative then positive
/// direction).
pub const AXIS_BUTTON_BASE: u8 = 100;

/// Virtual button index for an axis direction.
#[must_use]
pub const fn axis_button(axis: u8, positive: bool) -> u8 {
    AXIS_BUTTON_BASE + axis * 2 + positive as u8
}

/// Inverse of [`axis_button`]: the `(axis, positive)` pair a virtual button
/// index stands for, or `None` for a physical button index.
#[must_use]
pub const fn axis_of_button(button: u8) -> Option<(u8, bool)> {
    if button >= AXIS_BUTTON_BASE {
        let offset = button - AXIS_BUTTON_BASE;
        Some((offset / 2, offset % 2 == 1))
    } else {
        None
    }
}

/// Supported controller models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerModel {
    DualShock3,
    DualShock4,
    DualSense,
    XboxOne,
    XboxSeries,
    Xbox360,
    SwitchPro,
    SteamController,
    WiiRemote,
    JoyConLeft,
    JoyConRight,
    SuperNintendo,
}

const DUALSHOCK_3_BUTTONS: [&str; 16] = [
    "Cross",
    "Circle",
    "Square",
    "Triangle",
    "Left Shoulder",
    "Right Shoulder",
    "Left Trigger",
    "Right Trigger",
    "Select",
    "Start",
    "Left Stick",
    "Right Stick",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
];

const DUALSHOCK_4_BUTTONS: [&str; 18] = [
    "Cross",
    "Circle",
    "Square",
    "Triangle",
    "Left Shoulder",
    "Right Shoulder",
    "Left Trigger",
    "Right Trigger",
    "Share",
    "Options",
    "Left Stick",
    "Right Stick",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
    "PS",
    "Pad",
];

const XBOX_ONE_BUTTONS: [&str; 17] = [
    "A",
    "B",
    "X",
    "Y",
    "Left Shoulder",
    "Right Shoulder",
    "Left Trigger",
    "Right Trigger",
    "View",
    "Menu",
    "Left Stick",
    "Right Stick",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
    "Xbox",
];

const XBOX_SERIES_BUTTONS: [&str; 18] = [
    "A",
    "B",
    "X",
    "Y",
    "Left Shoulder",
    "Right Shoulder",
    "Left Trigger",
    "Right Trigger",
    "View",
    "Menu",
    "Left Stick",
    "Right Stick",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
    "Xbox",
    "Share",
];

const XBOX_360_BUTTONS: [&str; 17] = [
    "A",
    "B",
    "X",
    "Y",
    "Left Shoulder",
    "Right Shoulder",
    "Left Trigger",
    "Right Trigger",
    "Back",
    "Start",
    "Left Stick",
    "Right Stick",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
    "Xbox",
];

const SWITCH_PRO_BUTTONS: [&str; 18] = [
    "A",
    "B",
    "X",
    "Y",
    "Left Shoulder",
    "Right Shoulder",
    "Left Trigger",
    "Right Trigger",
    "Square",
    "Home",
    "Left Stick",
    "Right Stick",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
    "Minus",
    "Plus",
];

const STEAM_CONTROLLER_BUTTONS: [&str; 23] = [
    "A",
    "B",
    "X",
    "Y",
    "Left Shoulder",
    "Right Shoulder",
    "Left Trigger",
    "Right Trigger",
    "Back",
    "Start",
    "Stick",
    "Right Track",
    "Left Track Up",
    "Left Track Down",
    "Left Track Left",
    "Left Track Right",
    "Left Grip",
    "Right Grip",
    "Right Track Up",
    "Right Track Down",
    "Right Track Left",
    "Right Track Right",
    "Steam",
];

const WII_REMOTE_BUTTONS: [&str; 8] = ["1", "2", "A", "B", "Plus", "Minus", "Home", "Z"];

const JOYCON_RIGHT_BUTTONS: [&str; 13] = [
    "A",
    "X",
    "B",
    "Y",
    "Left Shoulder",
    "Right Shoulder",
    "Plus",
    "Right Stick",
    "Home",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
];

const JOYCON_LEFT_BUTTONS: [&str; 13] = [
    "Left",
    "Down",
    "Up",
    "Right",
    "Left Shoulder",
    "Right Shoulder",
    "Minus",
    "Left Stick",
    "Capture",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
];

const SUPER_NINTENDO_BUTTONS: [&str; 12] = [
    "B",
    "X",
    "A",
    "Y",
    "Left Shoulder",
    "Right Shoulder",
    "Start",
    "Select",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
];

const DUAL_STICK_AXES: [&str; 4] = [
    "Left Stick Horizontal",
    "Left Stick Vertical",
    "Right Stick Horizontal",
    "Right Stick Vertical",
];

const STEAM_CONTROLLER_AXES: [&str; 4] = [
    "Stick Horizontal",
    "Stick Vertical",
    "Right Track Horizontal",
    "Right Track Vertical",
];

const JOYCON_AXES: [&str; 2] = ["Stick Horizontal", "Stick Vertical"];

impl ControllerModel {
    /// All known models, in registry order.
    pub const ALL: [Self; 12] = [
        Self::DualShock3,
        Self::DualShock4,
        Self::DualSense,
        Self::XboxOne,
        Self::XboxSeries,
        Self::Xbox360,
        Self::SwitchPro,
        Self::SteamController,
        Self::WiiRemote,
        Self::JoyConLeft,
        Self::JoyConRight,
        Self::SuperNintendo,
    ];

    /// Returns a human-readable name for this controller model.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DualShock3 => "DualShock 3",
            Self::DualShock4 => "DualShock 4",
            Self::DualSense => "DualSense",
            Self::XboxOne => "Xbox One",
            Self::XboxSeries => "Xbox Series",
            Self::Xbox360 => "Xbox 360",
            Self::SwitchPro => "Switch Pro",
            Self::SteamController => "Steam Controller",
            Self::WiiRemote => "Wii Remote",
            Self::JoyConLeft => "Joy-Con Left",
            Self::JoyConRight => "Joy-Con Right",
            Self::SuperNintendo => "Super Nintendo",
        }
    }

    /// Per-index button display names for this model.
    #[must_use]
    pub const fn button_names(self) -> &'static [&'static str] {
        match self {
            Self::DualShock3 => &DUALSHOCK_3_BUTTONS,
            // The DualSense kept the DualShock 4 layout wholesale
            Self::DualShock4 | Self::DualSense => &DUALSHOCK_4_BUTTONS,
            Self::XboxOne => &XBOX_ONE_BUTTONS,
            Self::XboxSeries => &XBOX_SERIES_BUTTONS,
            Self::Xbox360 => &XBOX_360_BUTTONS,
            Self::SwitchPro => &SWITCH_PRO_BUTTONS,
            Self::SteamController => &STEAM_CONTROLLER_BUTTONS,
            Self::WiiRemote => &WII_REMOTE_BUTTONS,
            Self::JoyConLeft => &JOYCON_LEFT_BUTTONS,
            Self::JoyConRight => &JOYCON_RIGHT_BUTTONS,
            Self::SuperNintendo => &SUPER_NINTENDO_BUTTONS,
        }
    }

    /// Per-index axis display names for this model.
    #[must_use]
    pub const fn axis_names(self) -> &'static [&'static str] {
        match self {
            Self::DualShock3
            | Self::DualShock4
            | Self::DualSense
            | Self::XboxOne
            | Self::XboxSeries
            | Self::Xbox360
            | Self::SwitchPro => &DUAL_STICK_AXES,
            Self::SteamController => &STEAM_CONTROLLER_AXES,
            Self::JoyConLeft | Self::JoyConRight => &JOYCON_AXES,
            Self::WiiRemote | Self::SuperNintendo => &[],
        }
    }

    /// Returns the number of physical buttons for this model.
    #[must_use]
    pub const fn button_count(self) -> u8 {
        self.button_names().len() as u8
    }

    /// Returns the number of axes for this model.
    #[must_use]
    pub const fn axis_count(self) -> u8 {
        self.axis_names().len() as u8
    }

    /// Index of the button pressed by clicking the primary stick, if any.
    #[must_use]
    pub const fn stick_button(self) -> Option<u8> {
        match self {
            Self::DualShock3
            | Self::DualShock4
            | Self::DualSense
            | Self::XboxOne
            | Self::XboxSeries
            | Self::Xbox360
            | Self::SwitchPro
            | Self::SteamController => Some(10),
            Self::JoyConLeft | Self::JoyConRight => Some(7),
            Self::WiiRemote | Self::SuperNintendo => None,
        }
    }

    /// D-pad button indices as `[up, down, left, right]`, if the model has a
    /// directional pad (the Steam Controller's left track doubles as one).
    #[must_use]
    pub const fn dpad_buttons(self) -> Option<[u8; 4]> {
        match self {
            Self::DualShock3
            | Self::DualShock4
            | Self::DualSense
            | Self::XboxOne
            | Self::XboxSeries
            | Self::Xbox360
            | Self::SwitchPro
            | Self::SteamController => Some([12, 13, 14, 15]),
            Self::JoyConLeft | Self::JoyConRight => Some([9, 10, 11, 12]),
            Self::SuperNintendo => Some([8, 9, 10, 11]),
            Self::WiiRemote => None,
        }
    }

    /// Look up a model by its display name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.display_name() == name)
            .ok_or_else(|| PadError::UnknownController { name: name.to_string() })
    }
}

/// Static metadata for one controller model.
///
/// Descriptors live in a process-wide registry and are shared read-only by
/// every profile referencing the controller name.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerDescriptor {
    /// Display name, also the registry key (e.g. "Xbox Series").
    pub name: &'static str,
    /// Button display names, indexed by button number.
    pub buttons: &'static [&'static str],
    /// Axis display names, indexed by axis number.
    pub axes: &'static [&'static str],
    /// Whether the controller carries at least one analog stick.
    pub has_stick: bool,
    model: ControllerModel,
}

impl ControllerDescriptor {
    fn from_model(model: ControllerModel) -> Self {
        Self {
            name: model.display_name(),
            buttons: model.button_names(),
            axes: model.axis_names(),
            has_stick: !model.axis_names().is_empty(),
            model,
        }
    }

    /// The model this descriptor was built from.
    #[must_use]
    pub const fn model(&self) -> ControllerModel {
        self.model
    }

    /// Returns the number of physical buttons.
    #[must_use]
    pub const fn button_count(&self) -> u8 {
        self.buttons.len() as u8
    }

    /// Returns the number of axes.
    #[must_use]
    pub const fn axis_count(&self) -> u8 {
        self.axes.len() as u8
    }

    /// Display name for a button index, covering axis-derived virtual buttons
    /// (e.g. "Left Stick Horizontal +"). `None` if the index is out of range.
    #[must_use]
    pub fn button_name(&self, button: u8) -> Option<String> {
        if let Some((axis, positive)) = axis_of_button(button) {
            let axis_name = self.axes.get(usize::from(axis))?;
            let sign = if positive { '+' } else { '-' };
            return Some(format!("{axis_name} {sign}"));
        }
        self.buttons.get(usize::from(button)).map(|name| (*name).to_string())
    }

    /// All physical button indices excluding the given modifier buttons, in
    /// ascending order.
    #[must_use]
    pub fn bindable_buttons(&self, mods: &[u8]) -> Vec<u8> {
        (0..self.button_count()).filter(|index| !mods.contains(index)).collect()
    }

    /// Index of the primary stick click button, if any.
    #[must_use]
    pub const fn stick_button(&self) -> Option<u8> {
        self.model.stick_button()
    }

    /// D-pad indices as `[up, down, left, right]`, if any.
    #[must_use]
    pub const fn dpad_buttons(&self) -> Option<[u8; 4]> {
        self.model.dpad_buttons()
    }
}

static REGISTRY: LazyLock<Vec<ControllerDescriptor>> = LazyLock::new(|| {
    ControllerModel::ALL.into_iter().map(ControllerDescriptor::from_model).collect()
});

/// Look up a controller descriptor by display name.
///
/// # Errors
///
/// Returns [`PadError::UnknownController`] when the name is not in the
/// registry.
pub fn describe(name: &str) -> Result<&'static ControllerDescriptor> {
    trace!(name, "Looking up controller descriptor");
    REGISTRY
        .iter()
        .find(|descriptor| descriptor.name == name)
        .ok_or_else(|| PadError::UnknownController { name: name.to_string() })
}

/// All registered controller names, in registry order.
#[must_use]
pub fn controller_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|descriptor| descriptor.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_counts() {
        assert_eq!(ControllerModel::WiiRemote.button_count(), 8);
        assert_eq!(ControllerModel::SuperNintendo.button_count(), 12);
        assert_eq!(ControllerModel::XboxOne.button_count(), 17);
        assert_eq!(ControllerModel::DualShock4.button_count(), 18);
        assert_eq!(ControllerModel::SteamController.button_count(), 23);
    }

    #[test]
    fn test_button_names_match_layout() {
        let xbox = describe("Xbox One").unwrap();
        assert_eq!(xbox.buttons[0], "A");
        assert_eq!(xbox.buttons[8], "View");
        assert_eq!(xbox.buttons[16], "Xbox");

        let ds4 = describe("DualShock 4").unwrap();
        assert_eq!(ds4.buttons[0], "Cross");
        assert_eq!(ds4.buttons[17], "Pad");
    }

    #[test]
    fn test_describe_unknown_controller() {
        let err = describe("Power Glove").unwrap_err();
        assert!(matches!(err, PadError::UnknownController { name } if name == "Power Glove"));
    }

    #[test]
    fn test_has_stick_derived_from_axes() {
        assert!(describe("DualSense").unwrap().has_stick);
        assert!(describe("Joy-Con Left").unwrap().has_stick);
        assert!(!describe("Wii Remote").unwrap().has_stick);
        assert!(!describe("Super Nintendo").unwrap().has_stick);
    }

    #[test]
    fn test_registry_covers_all_models() {
        let names = controller_names();
        assert_eq!(names.len(), ControllerModel::ALL.len());
        for model in ControllerModel::ALL {
            assert!(names.contains(&model.display_name()));
        }
    }

    #[test]
    fn test_bindable_buttons_excludes_mods() {
        let xbox = describe("Xbox One").unwrap();
        let buttons = xbox.bindable_buttons(&[16]);
        assert_eq!(buttons.len(), 16);
        assert!(!buttons.contains(&16));
        assert_eq!(buttons[0], 0);
    }

    #[test]
    fn test_axis_button_round_trip() {
        assert_eq!(axis_button(0, false), 100);
        assert_eq!(axis_button(0, true), 101);
        assert_eq!(axis_button(3, true), 107);
        assert_eq!(axis_of_button(100), Some((0, false)));
        assert_eq!(axis_of_button(107), Some((3, true)));
        assert_eq!(axis_of_button(16), None);
    }

    #[test]
    fn test_axis_button_names() {
        let xbox = describe("Xbox One").unwrap();
        assert_eq!(xbox.button_name(101).as_deref(), Some("Left Stick Horizontal +"));
        assert_eq!(xbox.button_name(106).as_deref(), Some("Right Stick Vertical -"));
        // Wii Remote has no axes, so no virtual buttons either
        assert_eq!(describe("Wii Remote").unwrap().button_name(100), None);
    }
}
