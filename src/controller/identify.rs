//! Best-effort identification of a connected controller from the raw id
//! string the input source reports, plus its button/axis counts.

use tracing::debug;

use super::ControllerModel;

/// Substring patterns checked against the lowercased id, in order. First
/// match wins, so more specific patterns come first.
const ID_PATTERNS: [(&str, ControllerModel); 16] = [
    ("dualsense", ControllerModel::DualSense),
    ("dualshock 3", ControllerModel::DualShock3),
    ("sixaxis", ControllerModel::DualShock3),
    ("dualshock", ControllerModel::DualShock4),
    ("wireless controller", ControllerModel::DualShock4),
    ("xbox 360", ControllerModel::Xbox360),
    ("x-box 360", ControllerModel::Xbox360),
    ("xbox series", ControllerModel::XboxSeries),
    ("xbox one", ControllerModel::XboxOne),
    ("xbox", ControllerModel::XboxOne),
    ("pro controller", ControllerModel::SwitchPro),
    ("joy-con (l)", ControllerModel::JoyConLeft),
    ("joy-con (r)", ControllerModel::JoyConRight),
    ("steam", ControllerModel::SteamController),
    ("wii remote", ControllerModel::WiiRemote),
    ("wiimote", ControllerModel::WiiRemote),
];

/// Identify a controller model from its reported id and input counts.
///
/// The id is matched against known vendor strings first; when that is
/// inconclusive the button/axis counts are compared against the registry.
/// Returns `None` rather than guessing when neither matches.
#[must_use]
pub fn identify(id: &str, buttons: usize, axes: usize) -> Option<ControllerModel> {
    let id = id.to_lowercase();

    for (pattern, model) in ID_PATTERNS {
        if id.contains(pattern) {
            debug!(%id, pattern, model = model.display_name(), "Identified controller by id");
            return Some(model);
        }
    }

    // Fall back to an exact button/axis count match, but only when a single
    // model fits, since many pads share a count.
    let mut candidates = ControllerModel::ALL.into_iter().filter(|model| {
        usize::from(model.button_count()) == buttons && usize::from(model.axis_count()) == axes
    });
    let first = candidates.next();
    if candidates.next().is_some() {
        debug!(%id, buttons, axes, "Ambiguous controller counts, not guessing");
        return None;
    }
    if let Some(model) = first {
        debug!(%id, buttons, axes, model = model.display_name(), "Identified controller by counts");
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_by_id_string() {
        assert_eq!(
            identify("Sony Interactive DualSense Wireless (054c:0ce6)", 18, 4),
            Some(ControllerModel::DualSense)
        );
        assert_eq!(
            identify("Microsoft Xbox 360 Controller", 17, 4),
            Some(ControllerModel::Xbox360)
        );
        assert_eq!(identify("Nintendo Pro Controller", 18, 4), Some(ControllerModel::SwitchPro));
    }

    #[test]
    fn test_specific_patterns_win_over_generic() {
        // "xbox series" must not fall through to the generic "xbox" pattern
        assert_eq!(
            identify("Xbox Series Wireless Controller", 18, 4),
            Some(ControllerModel::XboxSeries)
        );
        // "dualshock 3" must not be taken for a DualShock 4
        assert_eq!(identify("DUALSHOCK 3 (USB)", 16, 4), Some(ControllerModel::DualShock3));
    }

    #[test]
    fn test_identify_by_counts() {
        // 23 buttons is unique to the Steam Controller
        assert_eq!(identify("Valve product 0x1102", 23, 4), Some(ControllerModel::SteamController));
        // 17/4 is shared by Xbox One and Xbox 360, so counts alone are ambiguous
        assert_eq!(identify("USB Gamepad", 17, 4), None);
    }

    #[test]
    fn test_identify_unknown() {
        assert_eq!(identify("Fight Stick FS-2000", 9, 1), None);
    }
}
