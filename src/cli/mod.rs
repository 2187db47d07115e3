//! CLI argument definitions and command dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cardpad - controller bindings for flashcard review.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "cardpad", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(long, short = 'f', default_value = "text", global = true, env = "CARDPAD_FORMAT")]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Data directory (profiles and settings; defaults to the platform data dir)
    #[arg(long, short = 'd', global = true, env = "CARDPAD_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Controller Registry ===
    /// List supported controllers
    Controllers(ControllersArgs),

    /// Show a controller's button and axis layout
    Describe(DescribeArgs),

    // === Profiles ===
    /// List stored profiles
    Profiles(ProfilesArgs),

    /// Show a profile's effective bindings
    Show(ShowArgs),

    /// Create a profile by copying an existing one
    Create(CreateArgs),

    /// Rename a profile
    Rename(RenameArgs),

    /// Delete a profile
    Delete(DeleteArgs),

    /// Assign a profile to a controller
    Assign(AssignArgs),

    // === Bindings ===
    /// Resolve the effective action for a button
    Resolve(ResolveArgs),

    /// Set a button's action in a state
    Bind(BindArgs),

    /// Clear a button's action in a state
    Unbind(UnbindArgs),

    /// List assignable actions
    Actions(ActionsArgs),

    // === Configuration ===
    /// Initialize the data directory with standard profiles
    Init(InitArgs),

    /// Show current settings
    Config(ConfigArgs),

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct ControllersArgs {
    /// Show the full button layout of every controller
    #[arg(long, short = 'l')]
    pub long: bool,
}

#[derive(Parser, Debug)]
pub struct DescribeArgs {
    /// Controller name (e.g. "Xbox One")
    pub controller: String,
}

#[derive(Parser, Debug)]
pub struct ProfilesArgs {}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Profile name
    pub profile: String,

    /// Modifier layer to resolve (0 = no modifier)
    #[arg(long, short = 'm', default_value = "0")]
    pub modifier: u8,

    /// Only show one state
    #[arg(long, short = 's')]
    pub state: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Existing profile to copy
    pub source: String,

    /// Name for the new profile
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Current profile name
    pub old: String,

    /// New profile name
    pub new: String,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Profile to delete
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct AssignArgs {
    /// Controller name
    pub controller: String,

    /// Profile the controller should use
    pub profile: String,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Profile name
    pub profile: String,

    /// State (all, deckBrowser, overview, review, question, answer, dialog)
    pub state: String,

    /// Button index
    pub button: u8,

    /// Modifier layer (0 = no modifier)
    #[arg(long, short = 'm', default_value = "0")]
    pub modifier: u8,
}

#[derive(Parser, Debug)]
pub struct BindArgs {
    /// Profile name
    pub profile: String,

    /// State (all, deckBrowser, overview, review, question, answer, dialog)
    pub state: String,

    /// Button index
    pub button: u8,

    /// Action name (empty clears the binding)
    pub action: String,

    /// Modifier layer (0 = no modifier)
    #[arg(long, short = 'm', default_value = "0")]
    pub modifier: u8,
}

#[derive(Parser, Debug)]
pub struct UnbindArgs {
    /// Profile name
    pub profile: String,

    /// State (all, deckBrowser, overview, review, question, answer, dialog)
    pub state: String,

    /// Button index
    pub button: u8,

    /// Modifier layer (0 = no modifier)
    #[arg(long, short = 'm', default_value = "0")]
    pub modifier: u8,
}

#[derive(Parser, Debug)]
pub struct ActionsArgs {
    /// Restrict the catalog to one state
    pub state: Option<String>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite existing profiles and settings
    #[arg(long, short = 'F')]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the settings file path
    #[arg(long)]
    pub path: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
