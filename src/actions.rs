//! The action name catalog: which actions can be assigned in each state.
//!
//! Action names are opaque strings to the binding engine; these lists only
//! drive what editors and the CLI offer. Binding a name outside the catalog
//! is always allowed (custom actions register at dispatch time).

use crate::profile::State;
use crate::quick::{SHOW_ACTION, TOGGLE_ACTION};

/// Actions available in every state except dialogs.
pub const COMMON_ACTIONS: &[&str] = &[
    "Add",
    "Back",
    "Browser",
    "Enter",
    "Forward",
    "Fullscreen",
    "Hide Cursor",
    "Main Screen",
    "Overview",
    "Preferences",
    "Quit",
    "Redo",
    "Review",
    "Statistics",
    "Sync",
    "Undo",
    "Volume Down",
    "Volume Up",
    "Click",
    "Secondary Click",
    "Options",
    "Scroll Down",
    "Scroll Up",
    "Select Next",
    "Select Previous",
    "Select",
];

/// Actions specific to reviewing cards.
pub const REVIEW_ACTIONS: &[&str] = &[
    "Again",
    "Audio -5s",
    "Audio +5s",
    "Bury Card",
    "Bury Note",
    "Card Info",
    "Delete Note",
    "Easy",
    "Edit Note",
    "Flag",
    "Flip Card",
    "Good",
    "Hard",
    "Mark Note",
    "Pause Audio",
    "Record Voice",
    "Previous Card Info",
    "Replay Audio",
    "Replay Voice",
    "Set Due Date",
    "Suspend Card",
    "Suspend Note",
];

const DECK_ACTIONS: &[&str] = &[
    "Check Database",
    "Check Media",
    "Collapse/Expand",
    "Empty Cards",
    "Manage Note Types",
    "Next Deck",
    "Next Due Deck",
    "Previous Deck",
    "Previous Due Deck",
    "Study Deck",
];

const OVERVIEW_ACTIONS: &[&str] = &[
    "Collapse/Expand",
    "Empty",
    "Filter",
    "Next Deck",
    "Next Due Deck",
    "Previous Deck",
    "Previous Due Deck",
    "Rebuild",
    "Custom Study",
];

const MAINTENANCE_ACTIONS: &[&str] =
    &["Check Database", "Check Media", "Empty Cards", "Manage Note Types", "Study Deck"];

/// Dialogs accept a reduced set of window and navigation actions.
const DIALOG_ACTIONS: &[&str] = &[
    "",
    "Enter",
    "Fullscreen",
    "Hide Cursor",
    "Quit",
    "Redo",
    "Undo",
    "Volume Down",
    "Volume Up",
    "Click",
    "Secondary Click",
    "Select Next",
    "Select Previous",
    "Select",
    "Focus Main Window",
    "Switch Window",
    "Escape",
    "Up",
    "Down",
    "Up by 10",
    "Down by 10",
    "Scroll Up",
    "Scroll Down",
];

/// All action names assignable in a state, the empty "no action" entry
/// first.
#[must_use]
pub fn actions_for_state(state: State) -> Vec<&'static str> {
    let mut actions: Vec<&'static str> = vec![""];
    match state {
        State::All => {
            actions.extend_from_slice(COMMON_ACTIONS);
            actions.extend_from_slice(MAINTENANCE_ACTIONS);
        }
        State::DeckBrowser => {
            actions.extend_from_slice(COMMON_ACTIONS);
            actions.extend_from_slice(DECK_ACTIONS);
        }
        State::Overview => {
            actions.extend_from_slice(COMMON_ACTIONS);
            actions.extend_from_slice(OVERVIEW_ACTIONS);
        }
        State::Review | State::Question | State::Answer => {
            actions.extend_from_slice(COMMON_ACTIONS);
            actions.extend_from_slice(REVIEW_ACTIONS);
        }
        State::Dialog => return DIALOG_ACTIONS.to_vec(),
    }
    actions.push(TOGGLE_ACTION);
    actions.push(SHOW_ACTION);
    actions
}

/// Action names offered for a state's quick-select menu.
#[must_use]
pub fn quick_select_actions(state: State) -> &'static [&'static str] {
    match state {
        State::Review | State::Question | State::Answer => REVIEW_ACTIONS,
        State::DeckBrowser => DECK_ACTIONS,
        State::Overview => OVERVIEW_ACTIONS,
        State::All | State::Dialog => &[],
    }
}
