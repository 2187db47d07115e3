//! Human-friendly terminal output implementation.

use console::style;
use tracing::debug;

use crate::controller::ControllerDescriptor;
use crate::error::PadError;
use crate::profile::inherited_label;

use super::{ControllerSummary, Output, ProfileOverview, ResolutionReport};

/// Styled terminal output for human users.
pub struct HumanOutput;

impl HumanOutput {
    #[must_use]
    pub fn new() -> Self {
        debug!("Creating HumanOutput");
        Self
    }
}

impl Default for HumanOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for HumanOutput {
    fn success(&self, message: &str) {
        println!("{} {message}", style("[OK]").green().bold());
    }

    fn error(&self, error: &PadError) {
        eprintln!("{} {error}", style("[ERROR]").red().bold());
        if let Some(suggestion) = error.suggestion() {
            eprintln!("  {} {suggestion}", style("hint:").yellow());
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {message}", style("[WARN]").yellow().bold());
    }

    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn controller_list(&self, controllers: &[ControllerSummary]) {
        println!(
            "{:<18} {:>8} {:>6} {:>6}",
            style("CONTROLLER").bold(),
            style("BUTTONS").bold(),
            style("AXES").bold(),
            style("STICK").bold(),
        );
        for controller in controllers {
            println!(
                "{:<18} {:>8} {:>6} {:>6}",
                controller.name,
                controller.buttons,
                controller.axes,
                if controller.has_stick { "yes" } else { "no" },
            );
        }
    }

    fn controller_info(&self, descriptor: &ControllerDescriptor) {
        println!("{}", style(descriptor.name).bold().cyan());
        println!(
            "  {} buttons, {} axes{}",
            descriptor.button_count(),
            descriptor.axis_count(),
            if descriptor.has_stick { ", stick" } else { "" },
        );
        self.newline();
        for (index, name) in descriptor.buttons.iter().enumerate() {
            println!("  {:>3}  {name}", style(index).dim());
        }
        if !descriptor.axes.is_empty() {
            self.newline();
            for (index, name) in descriptor.axes.iter().enumerate() {
                println!("  {:>3}  {name} (axis)", style(index).dim());
            }
        }
    }

    fn profile_list(&self, names: &[String]) {
        if names.is_empty() {
            println!("No profiles stored. Run: cardpad init");
            return;
        }
        for name in names {
            println!("{name}");
        }
    }

    fn profile_overview(&self, overview: &ProfileOverview) {
        println!(
            "{}  {} ({} buttons, {} axes)",
            style(&overview.name).bold().cyan(),
            overview.controller,
            overview.buttons,
            overview.axes,
        );
        if !overview.mods.is_empty() {
            println!("  modifiers: {:?}, showing layer {}", overview.mods, overview.modifier);
        }
        for state in &overview.states {
            if state.rows.iter().all(|row| row.action.is_empty()) {
                continue;
            }
            self.newline();
            println!("{}", style(state.state.display_name()).bold().underlined());
            for row in &state.rows {
                if row.action.is_empty() {
                    continue;
                }
                let action = if row.inherited {
                    style(inherited_label(&row.action)).dim().to_string()
                } else {
                    row.action.clone()
                };
                println!("  {:>3}  {:<22} {action}", style(row.button).dim(), row.name);
            }
        }
    }

    fn resolution(&self, report: &ResolutionReport) {
        if report.action.is_empty() {
            println!(
                "{} ({}) is unbound in state {}",
                report.button_name,
                report.button,
                style(report.state.key()).bold(),
            );
            return;
        }
        let origin = if report.inherited { " (inherited)" } else { "" };
        println!(
            "{} ({}) in state {} -> {}{origin}",
            report.button_name,
            report.button,
            style(report.state.key()).bold(),
            style(&report.action).green().bold(),
        );
    }

    fn action_list(&self, title: &str, actions: &[String]) {
        println!("{}", style(title).bold().underlined());
        for action in actions {
            if action.is_empty() {
                println!("  {}", style("(no action)").dim());
            } else {
                println!("  {action}");
            }
        }
    }

    fn settings_info(&self, settings: &crate::settings::Settings, path: &std::path::Path) {
        println!("{} ({})", style("Settings").bold().cyan(), path.display());
        println!("  enable_overlays:    {}", settings.enable_overlays);
        println!("  overlays_always_on: {}", settings.overlays_always_on);
        println!("  cursor_speed:       {}", settings.cursor_speed);
        println!("  scroll_speed:       {}", settings.scroll_speed);
        println!("  flags:              {:?}", settings.flags);
        if !settings.custom_actions.is_empty() {
            println!("  custom actions:");
            for (name, keys) in &settings.custom_actions {
                println!("    {name} -> {keys}");
            }
        }
    }

    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        println!("{} {version}", style("cardpad").bold().cyan());
        if let Some(sha) = git_sha {
            println!("  commit: {sha}");
        }
        if let Some(time) = build_time {
            println!("  built:  {time}");
        }
    }

    fn rule(&self, title: Option<&str>) {
        match title {
            Some(text) => println!("--- {} ---", style(text).bold()),
            None => println!("{}", "-".repeat(40)),
        }
    }

    fn newline(&self) {
        println!();
    }
}
