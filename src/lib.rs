//! Cardpad - controller bindings engine for flashcard review applications.
//!
//! The core is data and logic only: a static controller registry, a profile
//! data model with layered binding resolution, file-backed profile storage,
//! and a session layer turning raw input events into dispatched action
//! names. Reading input devices and executing actions belong to the host.
//!
//! # Modules
//!
//! - `controller`: static button/axis layouts per controller model
//! - `profile`: profiles, binding layers, and resolution
//! - `actions`: the per-state action name catalog
//! - `dispatch`: press/release handler tables
//! - `session`: event-to-action glue over a resolved profile
//! - `quick`: the quick-select menu model
//! - `settings`: host-level options
//! - `error`: error types with user-recoverable hints
//! - `output`: output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod actions;
pub mod cli;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod output;
pub mod profile;
pub mod quick;
pub mod session;
pub mod settings;
