//! Input session: turns raw controller events into dispatched actions.
//!
//! The session consumes `(button, pressed)` and axis samples from the
//! external input source together with the current application state, and
//! drives the dispatch tables through the binding resolver. It is
//! single-threaded and edge-triggered: only changes fire.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::controller::axis_button;
use crate::dispatch::Dispatch;
use crate::error::{BindingError, Result};
use crate::profile::{AxisRole, Profile, State};
use crate::quick::{QuickSelectMenu, SHOW_ACTION, TOGGLE_ACTION};

/// Deflection past which an axis with the `Buttons` role counts as pressed.
const AXIS_THRESHOLD: f32 = 0.5;

/// Accumulated cursor and scroll movement for one axis poll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerDelta {
    pub cursor_x: f32,
    pub cursor_y: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

impl PointerDelta {
    /// True when no axis produced movement.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.cursor_x == 0.0 && self.cursor_y == 0.0 && self.scroll_x == 0.0 && self.scroll_y == 0.0
    }
}

/// What a handled event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An action was dispatched (press or release).
    Action(String),
    /// The quick-select menu opened for the given state.
    MenuOpened(State),
    /// The quick-select menu closed; an action may have been taken from it.
    MenuClosed(Option<String>),
}

/// One controller's live input session over a resolved profile.
pub struct Session {
    profile: Profile,
    dispatch: Dispatch,
    quick_select: QuickSelectMenu,
    buttons: Vec<bool>,
    axis_latched: Vec<[bool; 2]>,
    held_actions: HashMap<u8, String>,
    cursor_speed: f32,
    scroll_speed: f32,
}

impl Session {
    #[must_use]
    pub fn new(profile: Profile, dispatch: Dispatch) -> Self {
        let buttons = vec![false; usize::from(profile.button_count())];
        let axis_latched = vec![[false; 2]; usize::from(profile.axis_count())];
        let quick_select = QuickSelectMenu::new(profile.quick_select.clone());
        Self {
            profile,
            dispatch,
            quick_select,
            buttons,
            axis_latched,
            held_actions: HashMap::new(),
            cursor_speed: 1.0,
            scroll_speed: 1.0,
        }
    }

    /// Scale cursor and scroll movement.
    #[must_use]
    pub const fn with_speeds(mut self, cursor: f32, scroll: f32) -> Self {
        self.cursor_speed = cursor;
        self.scroll_speed = scroll;
        self
    }

    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Swap in a different profile, dropping all latched input state.
    pub fn set_profile(&mut self, profile: Profile) {
        debug!(profile = %profile.name, "Switching session profile");
        self.buttons = vec![false; usize::from(profile.button_count())];
        self.axis_latched = vec![[false; 2]; usize::from(profile.axis_count())];
        self.held_actions.clear();
        self.quick_select = QuickSelectMenu::new(profile.quick_select.clone());
        self.profile = profile;
    }

    /// The quick-select menu model, for hosts that render it.
    #[must_use]
    pub const fn quick_select(&self) -> &QuickSelectMenu {
        &self.quick_select
    }

    #[must_use]
    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Register handlers after construction.
    pub fn dispatch_mut(&mut self) -> &mut Dispatch {
        &mut self.dispatch
    }

    /// 1-based modifier number for the currently held modifier button, or 0
    /// when none is held. The first held modifier wins.
    #[must_use]
    pub fn active_modifier(&self) -> u8 {
        for (number, &button) in self.profile.mods().iter().enumerate() {
            if self.buttons.get(usize::from(button)).copied().unwrap_or(false) {
                return number as u8 + 1;
            }
        }
        0
    }

    /// Feed one physical button edge. Returns what happened, or `None` for
    /// repeats, modifier buttons, and unbound slots.
    ///
    /// # Errors
    ///
    /// Rejects button indices beyond the profile's button count.
    pub fn handle_button(
        &mut self,
        state: State,
        button: u8,
        pressed: bool,
    ) -> Result<Option<SessionEvent>> {
        let index = usize::from(button);
        if index >= self.buttons.len() {
            return Err(
                BindingError::ButtonRange { button, buttons: self.profile.button_count() }.into()
            );
        }
        if self.buttons[index] == pressed {
            return Ok(None);
        }
        self.buttons[index] = pressed;

        if self.profile.modifier_for_button(button).is_some() {
            trace!(button, pressed, "Modifier button, no dispatch");
            return Ok(None);
        }

        self.fire(state, button, pressed)
    }

    /// Feed one poll of all axis values. Fires virtual buttons for axes in
    /// the `Buttons` role and returns accumulated cursor/scroll movement.
    pub fn poll_axes(&mut self, state: State, axes: &[f32]) -> Result<PointerDelta> {
        let mut delta = PointerDelta::default();
        let count = usize::from(self.profile.axis_count()).min(axes.len());

        for (axis, &value) in axes.iter().enumerate().take(count) {
            let axis = axis as u8;
            let signed = if self.profile.axis_inverted(axis) { -value } else { value };
            match self.profile.axis_role(axis) {
                AxisRole::Unassigned => {}
                AxisRole::Buttons => {
                    self.poll_axis_buttons(state, axis, value)?;
                }
                AxisRole::CursorHorizontal => delta.cursor_x += signed * self.cursor_speed,
                AxisRole::CursorVertical => delta.cursor_y += signed * self.cursor_speed,
                AxisRole::ScrollHorizontal => delta.scroll_x += signed * self.scroll_speed,
                AxisRole::ScrollVertical => delta.scroll_y += signed * self.scroll_speed,
            }
        }
        Ok(delta)
    }

    fn poll_axis_buttons(&mut self, state: State, axis: u8, value: f32) -> Result<()> {
        let directions = [(false, value < -AXIS_THRESHOLD), (true, value > AXIS_THRESHOLD)];
        for (positive, active) in directions {
            let latch = &mut self.axis_latched[usize::from(axis)][usize::from(positive)];
            if *latch == active {
                continue;
            }
            *latch = active;
            self.fire(state, axis_button(axis, positive), active)?;
        }
        Ok(())
    }

    /// Resolve and dispatch one edge for a bindable (physical or virtual)
    /// button.
    fn fire(&mut self, state: State, button: u8, pressed: bool) -> Result<Option<SessionEvent>> {
        if pressed {
            let resolved = self.profile.effective_action(state, self.active_modifier(), button)?;
            if resolved.is_unbound() {
                return Ok(None);
            }
            let action = resolved.action;
            if action == TOGGLE_ACTION {
                return Ok(self.toggle_menu(state));
            }
            if action == SHOW_ACTION {
                return Ok(self.quick_select.open(state).then_some(SessionEvent::MenuOpened(state)));
            }
            debug!(%state, button, action = %action, "Dispatching press");
            self.dispatch.press(&action);
            self.held_actions.insert(button, action.clone());
            return Ok(Some(SessionEvent::Action(action)));
        }

        // Release pairs with whatever was dispatched at press time, so a
        // modifier released mid-hold cannot strand the release handler.
        let Some(action) = self.held_actions.remove(&button) else {
            // Show-while-held closes on its own release and acts on the
            // selection; toggle ignores its release entirely
            let resolved = self.profile.effective_action(state, self.active_modifier(), button)?;
            if resolved.action == SHOW_ACTION && self.quick_select.is_shown() {
                return Ok(Some(self.close_menu()));
            }
            return Ok(None);
        };
        debug!(button, action = %action, "Dispatching release");
        self.dispatch.release(&action);
        Ok(Some(SessionEvent::Action(action)))
    }

    fn toggle_menu(&mut self, state: State) -> Option<SessionEvent> {
        if self.quick_select.is_shown() {
            Some(self.close_menu())
        } else {
            self.quick_select.open(state).then_some(SessionEvent::MenuOpened(state))
        }
    }

    fn close_menu(&mut self) -> SessionEvent {
        let take_action = self.quick_select.config().do_action_on_release;
        let action = self.quick_select.close(take_action);
        if let Some(ref name) = action {
            self.dispatch.press(name);
        }
        SessionEvent::MenuClosed(action)
    }
}
