//! Config command for linkgate.
//!
//! Shows the effective configuration and the keys that differ from defaults.
//! With `--init`, writes a project config file first.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{project_config_path, Config, LoadReport};

/// Options for the config command.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Write a project config file with default values.
    pub init: bool,
    /// Overwrite an existing project config file.
    pub force: bool,
}

/// A key whose effective value differs from the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigChange {
    pub key: String,
    pub default: String,
    pub value: String,
}

/// Output format for the config command.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigOutput {
    pub success: bool,
    /// Effective configuration.
    pub config: Config,
    pub changed: Vec<ConfigChange>,
    /// Config files or env values that were ignored.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Project config file written by `--init`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written: Option<String>,
    /// Project config file left alone by `--init`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
    /// Error message if writing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The config command implementation.
pub struct ConfigCommand {
    cwd: PathBuf,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Run the config command.
    pub fn run(&self, options: &ConfigOptions) -> ConfigOutput {
        let mut written = None;
        let mut skipped = None;
        let mut error = None;

        if options.init {
            match self.init_project(options.force) {
                Ok(InitResult::Written(path)) => written = Some(path.display().to_string()),
                Ok(InitResult::Exists(path)) => skipped = Some(path.display().to_string()),
                Err(e) => error = Some(e),
            }
        }

        let LoadReport { config, warnings } = Config::load_report(&self.cwd);
        let changed = Config::default()
            .diff(&config)
            .into_iter()
            .map(|(key, default, value)| ConfigChange {
                key,
                default,
                value,
            })
            .collect();

        ConfigOutput {
            success: error.is_none(),
            config,
            changed,
            warnings,
            written,
            skipped,
            error,
        }
    }

    fn init_project(&self, force: bool) -> Result<InitResult, String> {
        let path = project_config_path(&self.cwd);
        if path.exists() && !force {
            return Ok(InitResult::Exists(path));
        }

        Config::default()
            .save_project(&self.cwd)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "wrote project config");

        Ok(InitResult::Written(path))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ConfigOutput, options: &ConfigOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &ConfigOutput) -> String {
        let mut out = String::new();

        if let Some(err) = &output.error {
            out.push_str(&format!("Config init failed: {}\n\n", err));
        }
        for warning in &output.warnings {
            out.push_str(&format!("Warning: {}\n", warning));
        }
        if !output.warnings.is_empty() {
            out.push('\n');
        }
        if let Some(path) = &output.written {
            out.push_str(&format!("Wrote {}\n\n", path));
        }
        if let Some(path) = &output.skipped {
            out.push_str(&format!("{} already exists (use --force)\n\n", path));
        }

        out.push_str(&format!(
            "link.suppress_2fa_modal = {}\n",
            output.config.link.suppress_2fa_modal
        ));
        out.push_str(&format!(
            "link.signup_mode = {}\n",
            output.config.link.signup_mode.as_str()
        ));
        out.push_str(&format!(
            "attestation.use_attestation_endpoints = {}\n",
            output.config.attestation.use_attestation_endpoints
        ));

        if output.changed.is_empty() {
            out.push_str("\nAll values are defaults.\n");
        } else {
            out.push_str("\nChanged from defaults:\n");
            for change in &output.changed {
                out.push_str(&format!(
                    "  {}: {} -> {}\n",
                    change.key, change.default, change.value
                ));
            }
        }

        out
    }
}

enum InitResult {
    Written(PathBuf),
    Exists(PathBuf),
}
