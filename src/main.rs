//! Cardpad CLI - inspect and edit controller binding profiles.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use serde::Serialize;

use cardpad::actions::actions_for_state;
use cardpad::cli::{
    ActionsArgs, AssignArgs, BindArgs, Cli, Commands, CompletionsArgs, ConfigArgs,
    ControllersArgs, CreateArgs, DeleteArgs, DescribeArgs, InitArgs, ProfilesArgs, RenameArgs,
    ResolveArgs, ShowArgs, UnbindArgs,
};
use cardpad::controller::{self, axis_button};
use cardpad::error::Result;
use cardpad::logging;
use cardpad::output::{
    BindingRow, ControllerSummary, Output, OutputMode, ProfileOverview, ResolutionReport,
    StateBindings,
};
use cardpad::profile::{AxisRole, Profile, ProfileStore, State, standard_profile};
use cardpad::settings::Settings;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> Option<&'static str> {
        option_env!("VERGEN_GIT_SHA").filter(|sha| !sha.starts_with("VERGEN"))
    }

    pub fn build_timestamp() -> Option<&'static str> {
        option_env!("VERGEN_BUILD_TIMESTAMP").filter(|ts| !ts.starts_with("VERGEN"))
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }

    logging::init(cli.use_json(), cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        OutputMode::from_cli(&cli).into_output().error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Controllers(args)) => cmd_controllers(cli, args),
        Some(Commands::Describe(args)) => cmd_describe(cli, args),
        Some(Commands::Profiles(args)) => cmd_profiles(cli, args),
        Some(Commands::Show(args)) => cmd_show(cli, args),
        Some(Commands::Create(args)) => cmd_create(cli, args),
        Some(Commands::Rename(args)) => cmd_rename(cli, args),
        Some(Commands::Delete(args)) => cmd_delete(cli, args),
        Some(Commands::Assign(args)) => cmd_assign(cli, args),
        Some(Commands::Resolve(args)) => cmd_resolve(cli, args),
        Some(Commands::Bind(args)) => cmd_bind(cli, args),
        Some(Commands::Unbind(args)) => cmd_unbind(cli, args),
        Some(Commands::Actions(args)) => cmd_actions(cli, args),
        Some(Commands::Init(args)) => cmd_init(cli, args),
        Some(Commands::Config(args)) => cmd_config(cli, args),
        Some(Commands::Version) => cmd_version(cli),
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

fn output_for(cli: &Cli) -> Box<dyn Output> {
    OutputMode::from_cli(cli).into_output()
}

/// Profile store and settings file locations for this invocation.
struct Paths {
    store: ProfileStore,
    settings: PathBuf,
}

fn paths(cli: &Cli) -> Result<Paths> {
    match &cli.dir {
        Some(dir) => Ok(Paths {
            store: ProfileStore::new(dir.join("profiles")),
            settings: dir.join("settings.toml"),
        }),
        None => Ok(Paths {
            store: ProfileStore::open_default()?,
            settings: Settings::default_path()?,
        }),
    }
}

// === Quick Start (Robot Mode Optimized) ===

/// Prints quick-start help optimized for both humans and agents.
#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        print_robot_quick_start();
    } else {
        print_human_quick_start();
    }
    Ok(())
}

fn print_robot_quick_start() {
    let help = RobotQuickStart {
        tool: "cardpad",
        version: build_info::VERSION,
        description: "Controller bindings engine for flashcard review with robot mode",
        discovery: RobotDiscovery {
            list_controllers: "cardpad controllers --robot",
            controller_layout: "cardpad describe \"Xbox One\" --robot",
            list_profiles: "cardpad profiles --robot",
        },
        bindings: RobotBindings {
            show_profile: "cardpad show <PROFILE> --robot",
            resolve: "cardpad resolve <PROFILE> <STATE> <BUTTON> --robot",
            bind: "cardpad bind <PROFILE> <STATE> <BUTTON> <ACTION>",
            unbind: "cardpad unbind <PROFILE> <STATE> <BUTTON>",
            actions: "cardpad actions [STATE] --robot",
        },
        states: "all, deckBrowser, overview, review, question, answer, dialog",
        inheritance: "explicit binding > review layer (question/answer) > all layer",
        output_modes: OutputModes {
            human: "--format=text (default)",
            robot: "--robot or --format=json",
            compact: "--format=json-compact",
        },
        data_dir: "Use --dir <DIR> to work against a different data directory",
    };

    println!("{}", serde_json::to_string_pretty(&help).expect("serialization failed"));
}

fn print_human_quick_start() {
    use console::style;

    println!("{} {} - controller bindings for flashcard review\n", style("cardpad").bold().cyan(), build_info::VERSION);

    println!("{}", style("QUICK START").bold().underlined());
    println!();
    println!("  {}  Initialize standard profiles", style("cardpad init").green());
    println!("  {}  List supported controllers", style("cardpad controllers").green());
    println!("  {}  Show a controller layout", style("cardpad describe \"Xbox One\"").green());
    println!("  {}  List stored profiles", style("cardpad profiles").green());
    println!("  {}  Show effective bindings", style("cardpad show <PROFILE>").green());
    println!("  {}  Resolve one button", style("cardpad resolve <PROFILE> review 0").green());
    println!("  {}  Change a binding", style("cardpad bind <PROFILE> review 0 Again").green());
    println!();

    println!("{}", style("ROBOT MODE (for agents)").bold().underlined());
    println!();
    println!("  {}  JSON output", style("cardpad --robot <command>").cyan());
    println!("  {}  Quick-start JSON", style("cardpad --robot").cyan());
    println!();

    println!("Run {} for full help", style("cardpad --help").yellow());
}

// === Robot Mode JSON Structures ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    discovery: RobotDiscovery,
    bindings: RobotBindings,
    states: &'static str,
    inheritance: &'static str,
    output_modes: OutputModes,
    data_dir: &'static str,
}

#[derive(Serialize)]
struct RobotDiscovery {
    list_controllers: &'static str,
    controller_layout: &'static str,
    list_profiles: &'static str,
}

#[derive(Serialize)]
struct RobotBindings {
    show_profile: &'static str,
    resolve: &'static str,
    bind: &'static str,
    unbind: &'static str,
    actions: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

// === Controller Registry ===

fn cmd_controllers(cli: &Cli, args: &ControllersArgs) -> Result<()> {
    let output = output_for(cli);
    if args.long {
        for (index, name) in controller::controller_names().into_iter().enumerate() {
            if index > 0 {
                output.newline();
            }
            output.controller_info(controller::describe(name)?);
        }
        return Ok(());
    }

    let summaries: Vec<ControllerSummary> = controller::controller_names()
        .into_iter()
        .map(|name| {
            let descriptor = controller::describe(name)?;
            Ok(ControllerSummary {
                name,
                buttons: descriptor.button_count(),
                axes: descriptor.axis_count(),
                has_stick: descriptor.has_stick,
            })
        })
        .collect::<Result<_>>()?;
    output.controller_list(&summaries);
    Ok(())
}

fn cmd_describe(cli: &Cli, args: &DescribeArgs) -> Result<()> {
    let descriptor = controller::describe(&args.controller)?;
    output_for(cli).controller_info(descriptor);
    Ok(())
}

// === Profiles ===

fn cmd_profiles(cli: &Cli, _args: &ProfilesArgs) -> Result<()> {
    let names = paths(cli)?.store.list()?;
    output_for(cli).profile_list(&names);
    Ok(())
}

/// Buttons shown for a profile: the bindable physical buttons plus the
/// virtual buttons of axes assigned the `Buttons` role.
fn visible_buttons(profile: &Profile) -> Vec<u8> {
    let mut buttons = profile.bindable_buttons();
    for (&axis, &role) in profile.axes_bindings() {
        if role == AxisRole::Buttons {
            buttons.push(axis_button(axis, false));
            buttons.push(axis_button(axis, true));
        }
    }
    buttons
}

fn cmd_show(cli: &Cli, args: &ShowArgs) -> Result<()> {
    let profile = paths(cli)?.store.load(&args.profile)?;
    let states: Vec<State> = match &args.state {
        Some(state) => vec![state.parse()?],
        None => State::ALL_STATES.to_vec(),
    };

    let buttons = visible_buttons(&profile);
    let mut tables = Vec::with_capacity(states.len());
    for state in states {
        let mut rows = Vec::with_capacity(buttons.len());
        for &button in &buttons {
            let resolved = profile.effective_action(state, args.modifier, button)?;
            rows.push(BindingRow {
                button,
                name: profile.button_name(button),
                action: resolved.action,
                inherited: resolved.inherited,
            });
        }
        tables.push(StateBindings { state, rows });
    }

    output_for(cli).profile_overview(&ProfileOverview {
        name: profile.name.clone(),
        controller: profile.controller.clone(),
        buttons: profile.button_count(),
        axes: profile.axis_count(),
        mods: profile.mods().to_vec(),
        modifier: args.modifier,
        states: tables,
    });
    Ok(())
}

fn cmd_create(cli: &Cli, args: &CreateArgs) -> Result<()> {
    paths(cli)?.store.copy(&args.source, &args.name)?;
    output_for(cli).success(&format!("Created profile '{}' from '{}'", args.name, args.source));
    Ok(())
}

fn cmd_rename(cli: &Cli, args: &RenameArgs) -> Result<()> {
    paths(cli)?.store.rename(&args.old, &args.new)?;
    output_for(cli).success(&format!("Renamed profile '{}' to '{}'", args.old, args.new));
    Ok(())
}

fn cmd_delete(cli: &Cli, args: &DeleteArgs) -> Result<()> {
    paths(cli)?.store.delete(&args.name)?;
    output_for(cli).success(&format!("Deleted profile '{}'", args.name));
    Ok(())
}

fn cmd_assign(cli: &Cli, args: &AssignArgs) -> Result<()> {
    // The controller must be known; the profile may be any stored one
    controller::describe(&args.controller)?;
    paths(cli)?.store.assign(&args.controller, &args.profile)?;
    output_for(cli)
        .success(&format!("Assigned profile '{}' to {}", args.profile, args.controller));
    Ok(())
}

// === Bindings ===

fn cmd_resolve(cli: &Cli, args: &ResolveArgs) -> Result<()> {
    let profile = paths(cli)?.store.load(&args.profile)?;
    let state: State = args.state.parse()?;
    let resolved = profile.effective_action(state, args.modifier, args.button)?;

    output_for(cli).resolution(&ResolutionReport {
        profile: profile.name.clone(),
        state,
        modifier: args.modifier,
        button: args.button,
        button_name: profile.button_name(args.button),
        action: resolved.action,
        inherited: resolved.inherited,
    });
    Ok(())
}

fn cmd_bind(cli: &Cli, args: &BindArgs) -> Result<()> {
    let paths = paths(cli)?;
    let mut profile = paths.store.load(&args.profile)?;
    let state: State = args.state.parse()?;
    profile.set_binding(state, args.modifier, args.button, &args.action)?;
    paths.store.save(&profile)?;

    let output = output_for(cli);
    let button = profile.button_name(args.button);
    if args.action.is_empty() {
        output.success(&format!("Cleared {button} in state {state}"));
    } else {
        output.success(&format!("Bound {button} to '{}' in state {state}", args.action));
    }
    Ok(())
}

fn cmd_unbind(cli: &Cli, args: &UnbindArgs) -> Result<()> {
    let paths = paths(cli)?;
    let mut profile = paths.store.load(&args.profile)?;
    let state: State = args.state.parse()?;
    profile.set_binding(state, args.modifier, args.button, "")?;
    paths.store.save(&profile)?;

    output_for(cli)
        .success(&format!("Cleared {} in state {state}", profile.button_name(args.button)));
    Ok(())
}

fn cmd_actions(cli: &Cli, args: &ActionsArgs) -> Result<()> {
    let settings = Settings::load(&paths(cli)?.settings)?;
    let custom = settings.custom_action_names();

    let (title, mut actions): (String, Vec<String>) = match &args.state {
        Some(state) => {
            let state: State = state.parse()?;
            let mut actions: Vec<String> =
                actions_for_state(state).into_iter().map(str::to_string).collect();
            actions.extend(custom.iter().map(|name| (*name).to_string()));
            (format!("Actions: {}", state.display_name()), actions)
        }
        None => {
            let mut actions: Vec<String> = State::ALL_STATES
                .into_iter()
                .flat_map(actions_for_state)
                .filter(|action| !action.is_empty())
                .map(str::to_string)
                .collect();
            actions.extend(custom.iter().map(|name| (*name).to_string()));
            actions.sort();
            actions.dedup();
            ("Actions: all states".to_string(), actions)
        }
    };
    if !custom.is_empty() {
        actions.dedup();
    }

    output_for(cli).action_list(&title, &actions);
    Ok(())
}

// === Configuration ===

/// Input sizes the standard profiles are generated for.
const STANDARD_SIZES: [(u8, u8); 3] = [(16, 4), (17, 4), (18, 4)];

fn cmd_init(cli: &Cli, args: &InitArgs) -> Result<()> {
    let paths = paths(cli)?;
    let output = output_for(cli);

    let mut created = 0usize;
    for (buttons, axes) in STANDARD_SIZES {
        let profile = standard_profile(buttons, axes);
        if paths.store.exists(&profile.name) && !args.force {
            continue;
        }
        paths.store.save(&profile)?;
        created += 1;
    }

    if !paths.settings.is_file() || args.force {
        Settings::default().save(&paths.settings)?;
    }

    output.success(&format!(
        "Initialized {} ({created} standard profiles written)",
        paths.store.root().display()
    ));
    Ok(())
}

fn cmd_config(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    let paths = paths(cli)?;
    let output = output_for(cli);
    if args.path {
        output.info(&paths.settings.display().to_string());
        return Ok(());
    }
    let settings = Settings::load(&paths.settings)?;
    output.settings_info(&settings, &paths.settings);
    Ok(())
}

// === Utilities ===

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(cli: &Cli) -> Result<()> {
    output_for(cli).version_info(
        build_info::VERSION,
        build_info::git_sha(),
        build_info::build_timestamp(),
    );
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "cardpad", &mut io::stdout());
    Ok(())
}
