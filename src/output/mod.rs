//! Output mode abstraction for robot and human output.

use serde::Serialize;

use std::path::Path;

use crate::cli::Cli;
use crate::controller::ControllerDescriptor;
use crate::error::PadError;
use crate::profile::State;
use crate::settings::Settings;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// One row of a per-state bindings table.
#[derive(Debug, Clone, Serialize)]
pub struct BindingRow {
    /// Button index (virtual axis buttons included).
    pub button: u8,
    /// Button display name.
    pub name: String,
    /// Effective action, empty when unbound.
    pub action: String,
    /// Whether the action is inherited from another layer.
    pub inherited: bool,
}

/// Effective bindings of one state at one modifier layer.
#[derive(Debug, Clone, Serialize)]
pub struct StateBindings {
    pub state: State,
    pub rows: Vec<BindingRow>,
}

/// Everything the `show` command reports about a profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOverview {
    pub name: String,
    pub controller: String,
    pub buttons: u8,
    pub axes: u8,
    pub mods: Vec<u8>,
    /// Modifier layer the tables were resolved at.
    pub modifier: u8,
    pub states: Vec<StateBindings>,
}

/// Summary line for the controller registry listing.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerSummary {
    pub name: &'static str,
    pub buttons: u8,
    pub axes: u8,
    pub has_stick: bool,
}

/// Result of resolving one `(state, modifier, button)` triple.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub profile: String,
    pub state: State,
    pub modifier: u8,
    pub button: u8,
    pub button_name: String,
    /// Effective action, empty when unbound.
    pub action: String,
    pub inherited: bool,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug)]
pub enum OutputMode {
    /// JSON output for agents and scripting.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human,
}

impl OutputMode {
    /// Pick the output mode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            if cli.use_compact_json() {
                Self::Robot(RobotFormat::JsonCompact)
            } else {
                Self::Robot(RobotFormat::Json)
            }
        } else {
            Self::Human
        }
    }

    /// Returns true if output should be JSON.
    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human => Box::new(HumanOutput::new()),
        }
    }
}

/// Trait for all command output.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &PadError);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    // Registry
    fn controller_list(&self, controllers: &[ControllerSummary]);
    fn controller_info(&self, descriptor: &ControllerDescriptor);

    // Profiles
    fn profile_list(&self, names: &[String]);
    fn profile_overview(&self, overview: &ProfileOverview);
    fn resolution(&self, report: &ResolutionReport);

    // Action catalog
    fn action_list(&self, title: &str, actions: &[String]);

    // Settings
    fn settings_info(&self, settings: &Settings, path: &Path);

    // Metadata
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>);

    // Visual separators
    fn rule(&self, title: Option<&str>);
    fn newline(&self);
}
