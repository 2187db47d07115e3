//! Robot mode JSON output implementation.

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::controller::ControllerDescriptor;
use crate::error::PadError;

use super::{ControllerSummary, Output, ProfileOverview, ResolutionReport, RobotFormat};

/// JSON output implementation for agents and scripting.
///
/// Every command emits exactly one JSON document on stdout; errors go to
/// stderr as a JSON object.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    #[must_use]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    /// Output any serializable data as JSON to stdout.
    #[instrument(skip(self, data), fields(format = ?self.format))]
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = match self.format {
            RobotFormat::Json => {
                serde_json::to_string_pretty(data).expect("serialization failed")
            }
            RobotFormat::JsonCompact => serde_json::to_string(data).expect("serialization failed"),
        };
        trace!(json_len = json.len(), "JSON serialized");
        println!("{json}");
    }
}

impl Output for RobotOutput {
    fn success(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "success": true,
            "message": message
        }));
    }

    fn error(&self, error: &PadError) {
        debug!(error = %error, "Robot: error");
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        }))
        .expect("serialization failed");
        eprintln!("{json}");
    }

    fn warning(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "warning": message
        }));
    }

    fn info(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "info": message
        }));
    }

    fn controller_list(&self, controllers: &[ControllerSummary]) {
        self.output_json(&serde_json::json!({
            "controllers": controllers,
            "count": controllers.len(),
        }));
    }

    fn controller_info(&self, descriptor: &ControllerDescriptor) {
        self.output_json(descriptor);
    }

    fn profile_list(&self, names: &[String]) {
        self.output_json(&serde_json::json!({
            "profiles": names,
            "count": names.len(),
        }));
    }

    fn profile_overview(&self, overview: &ProfileOverview) {
        self.output_json(overview);
    }

    fn resolution(&self, report: &ResolutionReport) {
        self.output_json(report);
    }

    fn action_list(&self, title: &str, actions: &[String]) {
        self.output_json(&serde_json::json!({
            "scope": title,
            "actions": actions,
            "count": actions.len(),
        }));
    }

    fn settings_info(&self, settings: &crate::settings::Settings, path: &std::path::Path) {
        self.output_json(&serde_json::json!({
            "path": path.display().to_string(),
            "settings": settings,
        }));
    }

    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        self.output_json(&serde_json::json!({
            "version": version,
            "git_sha": git_sha,
            "build_time": build_time,
        }));
    }

    fn rule(&self, _title: Option<&str>) {
        // Structured output has no visual separators
    }

    fn newline(&self) {}
}
