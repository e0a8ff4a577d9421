//! Configuration loading for linkgate.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.linkgate/config.toml`)
//! 3. User config (`~/.linkgate/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. With no config at all the gate runs with
//! suppression off and attestation endpoints on.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::LinkSignupMode;
use crate::error::{LinkGateError, Result};

/// Main configuration struct for linkgate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Link feature-gate configuration.
    pub link: LinkConfig,
    /// Attestation check configuration.
    pub attestation: AttestationConfig,
}

/// Link feature-gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkConfig {
    /// Policy kill-switch for the alternate verification modal. When on,
    /// Link is never launched eagerly.
    pub suppress_2fa_modal: bool,
    /// Signup mode used when resolving Link state.
    pub signup_mode: LinkSignupMode,
}

/// Attestation check configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AttestationConfig {
    /// Whether the attestation endpoints are in use. When off the check is
    /// not run and counts as successful.
    pub use_attestation_endpoints: bool,
}

impl Default for AttestationConfig {
    fn default() -> Self {
        Self {
            use_attestation_endpoints: true,
        }
    }
}

/// One config file as written: only the keys it actually sets.
///
/// Unknown keys are rejected so a misspelled switch does not pass silently.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct ConfigLayer {
    link: LinkLayer,
    attestation: AttestationLayer,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct LinkLayer {
    suppress_2fa_modal: Option<bool>,
    signup_mode: Option<LinkSignupMode>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct AttestationLayer {
    use_attestation_endpoints: Option<bool>,
}

/// Effective configuration plus the problems met while loading it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub config: Config,
    /// Skipped files and ignored env values, one message each.
    pub warnings: Vec<String>,
}

/// Parse a boolean env value the same way for every flag.
fn parse_env_bool(val: &str) -> bool {
    val == "true" || val == "1"
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => Self::print_warnings(Self::load_layers(None)),
        }
    }

    /// Load configuration with a specific working directory.
    ///
    /// Warnings are printed to stderr; the run continues without the
    /// offending file or value.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        Self::print_warnings(Self::load_report(cwd))
    }

    /// Load configuration and collect warnings instead of printing them.
    pub fn load_report(cwd: &Path) -> LoadReport {
        Self::load_layers(Some(cwd))
    }

    fn print_warnings(report: LoadReport) -> Self {
        for warning in &report.warnings {
            eprintln!("Warning: {}", warning);
        }
        report.config
    }

    fn load_layers(cwd: Option<&Path>) -> LoadReport {
        let mut report = LoadReport::default();

        if let Some(home) = linkgate_home() {
            report.apply_file(&home.join("config.toml"));
        }

        if let Some(cwd) = cwd {
            report.apply_file(&project_config_path(cwd));
        }

        report.config.apply_env_overrides(&mut report.warnings);

        report
    }

    /// Load config from a specific file path, on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let mut config = Config::default();
        config.apply_layer(Self::read_layer(path)?);
        Ok(config)
    }

    fn read_layer(path: &Path) -> Result<ConfigLayer> {
        let content = fs::read_to_string(path).map_err(|e| LinkGateError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| LinkGateError::config(e.to_string()))
    }

    /// Apply the keys a layer sets; absent keys keep the lower layer's value.
    fn apply_layer(&mut self, layer: ConfigLayer) {
        if let Some(suppress) = layer.link.suppress_2fa_modal {
            self.link.suppress_2fa_modal = suppress;
        }
        if let Some(mode) = layer.link.signup_mode {
            self.link.signup_mode = mode;
        }
        if let Some(use_endpoints) = layer.attestation.use_attestation_endpoints {
            self.attestation.use_attestation_endpoints = use_endpoints;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self, warnings: &mut Vec<String>) {
        // LINKGATE_SUPPRESS_2FA_MODAL
        if let Ok(val) = env::var("LINKGATE_SUPPRESS_2FA_MODAL") {
            self.link.suppress_2fa_modal = parse_env_bool(&val);
        }

        // LINKGATE_USE_ATTESTATION_ENDPOINTS
        if let Ok(val) = env::var("LINKGATE_USE_ATTESTATION_ENDPOINTS") {
            self.attestation.use_attestation_endpoints = parse_env_bool(&val);
        }

        // LINKGATE_SIGNUP_MODE
        if let Ok(val) = env::var("LINKGATE_SIGNUP_MODE") {
            match LinkSignupMode::parse(&val) {
                Some(mode) => self.link.signup_mode = mode,
                None => warnings.push(format!(
                    "Invalid LINKGATE_SIGNUP_MODE value '{}'. \
                    Valid values: [\"instead_of_save_for_future_use\", \
                    \"alongside_save_for_future_use\"]. Using '{}'.",
                    val,
                    self.link.signup_mode.as_str()
                )),
            }
        }
    }

    /// Save configuration to the project config file.
    ///
    /// Writes `.linkgate/config.toml` atomically (temp file, fsync, rename).
    pub fn save_project(&self, cwd: &Path) -> Result<()> {
        let dir = project_dir(cwd);

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| LinkGateError::storage(&dir, e))?;
        }

        let config_path = project_config_path(cwd);

        let content =
            toml::to_string_pretty(self).map_err(|e| LinkGateError::config(e.to_string()))?;

        let temp_path = dir.join(".config.toml.tmp");
        fs::write(&temp_path, &content).map_err(|e| LinkGateError::storage(&temp_path, e))?;

        let file =
            fs::File::open(&temp_path).map_err(|e| LinkGateError::storage(&temp_path, e))?;
        file.sync_all()
            .map_err(|e| LinkGateError::storage(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &config_path)
            .map_err(|e| LinkGateError::storage(&config_path, e))?;

        Ok(())
    }

    /// Generate a diff of changed values between two configs.
    ///
    /// Returns a list of (key, old_value, new_value) tuples for changed fields.
    pub fn diff(&self, other: &Config) -> Vec<(String, String, String)> {
        let mut changes = Vec::new();

        if self.link.suppress_2fa_modal != other.link.suppress_2fa_modal {
            changes.push((
                "link.suppress_2fa_modal".to_string(),
                self.link.suppress_2fa_modal.to_string(),
                other.link.suppress_2fa_modal.to_string(),
            ));
        }

        if self.link.signup_mode != other.link.signup_mode {
            changes.push((
                "link.signup_mode".to_string(),
                self.link.signup_mode.as_str().to_string(),
                other.link.signup_mode.as_str().to_string(),
            ));
        }

        if self.attestation.use_attestation_endpoints
            != other.attestation.use_attestation_endpoints
        {
            changes.push((
                "attestation.use_attestation_endpoints".to_string(),
                self.attestation.use_attestation_endpoints.to_string(),
                other.attestation.use_attestation_endpoints.to_string(),
            ));
        }

        changes
    }
}

impl LoadReport {
    /// Layer a config file that may legitimately be missing.
    ///
    /// A file that exists but cannot be read or parsed is skipped with a
    /// warning.
    fn apply_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Config::read_layer(path) {
            Ok(layer) => self.config.apply_layer(layer),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                self.warnings.push(format!(
                    "ignoring config file {}: {}",
                    path.display(),
                    e
                ));
            }
        }
    }
}

/// Get the linkgate home directory.
///
/// Checks `LINKGATE_HOME` first, then falls back to `~/.linkgate`. An empty
/// `LINKGATE_HOME` is ignored.
pub fn linkgate_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("LINKGATE_HOME") {
        if home.is_empty() {
            tracing::warn!("LINKGATE_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("LINKGATE_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    dirs::home_dir().map(|home| home.join(".linkgate"))
}

/// Project-level linkgate directory.
pub fn project_dir(cwd: &Path) -> PathBuf {
    cwd.join(".linkgate")
}

/// Project-level config file.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    project_dir(cwd).join("config.toml")
}
