//! Action dispatch tables.
//!
//! The binding engine stores and returns action *names*; the host registers
//! callables here. Names with no handler are inert: pressing them is a
//! silent no-op, never an error, so custom actions need no static
//! registration.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

/// A registered action handler.
pub type ActionFn = Box<dyn Fn() + Send + Sync>;

/// Press and release handler tables, keyed by action name.
#[derive(Default)]
pub struct Dispatch {
    press: HashMap<String, ActionFn>,
    release: HashMap<String, ActionFn>,
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("press", &self.press.len())
            .field("release", &self.release.len())
            .finish()
    }
}

impl Dispatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler run when an action's button is pressed.
    pub fn register(&mut self, name: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) {
        let name = name.into();
        debug!(action = %name, "Registering press handler");
        self.press.insert(name, Box::new(handler));
    }

    /// Register the handler run when an action's button is released. Only
    /// press/release pairs (clicks, held navigation) need one.
    pub fn register_release(
        &mut self,
        name: impl Into<String>,
        handler: impl Fn() + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!(action = %name, "Registering release handler");
        self.release.insert(name, Box::new(handler));
    }

    /// Run an action's press handler. Returns whether a handler ran.
    pub fn press(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self.press.get(name) {
            Some(handler) => {
                trace!(action = name, "Dispatching press");
                handler();
                true
            }
            None => {
                trace!(action = name, "No press handler registered");
                false
            }
        }
    }

    /// Run an action's release handler. Returns whether a handler ran.
    pub fn release(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self.release.get(name) {
            Some(handler) => {
                trace!(action = name, "Dispatching release");
                handler();
                true
            }
            None => false,
        }
    }

    /// Whether a press handler exists for an action.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.press.contains_key(name)
    }

    /// All registered press-handler names, sorted.
    #[must_use]
    pub fn registered_actions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.press.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
