// File: src/config.rs
// Purpose: Engine configuration parsing from puntos.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub markup: MarkupConfig,

    #[serde(default)]
    pub classes: ClassNames,

    #[serde(default)]
    pub messages: MessageConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Attributes the engine reads from the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// Attribute that opts a form in (default: "data-validate")
    #[serde(default = "default_tracked_attribute")]
    pub tracked_attribute: String,

    #[serde(default = "default_min_length_attribute")]
    pub min_length_attribute: String,

    #[serde(default = "default_max_length_attribute")]
    pub max_length_attribute: String,
}

/// CSS classes applied by the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassNames {
    #[serde(default = "default_field_error")]
    pub field_error: String,

    #[serde(default = "default_field_success")]
    pub field_success: String,

    #[serde(default = "default_error_message")]
    pub error_message: String,

    #[serde(default = "default_form_loading")]
    pub form_loading: String,
}

/// Notification texts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_submit_success")]
    pub submit_success: String,

    #[serde(default = "default_submit_failure")]
    pub submit_failure: String,

    /// How long a notification stays on screen, in milliseconds
    #[serde(default = "default_notification_duration_ms")]
    pub notification_duration_ms: u64,
}

/// Submission transport settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpConfig {
    /// URL relative form actions are resolved against
    #[serde(default)]
    pub base_url: Option<String>,

    /// Client-side request timeout. Unset means requests never time out.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

// Default values
fn default_tracked_attribute() -> String {
    "data-validate".to_string()
}

fn default_min_length_attribute() -> String {
    "data-min-length".to_string()
}

fn default_max_length_attribute() -> String {
    "data-max-length".to_string()
}

fn default_field_error() -> String {
    "field-error".to_string()
}

fn default_field_success() -> String {
    "field-success".to_string()
}

fn default_error_message() -> String {
    "error-message".to_string()
}

fn default_form_loading() -> String {
    "form-loading".to_string()
}

fn default_submit_success() -> String {
    "Formulario enviado correctamente".to_string()
}

fn default_submit_failure() -> String {
    "Error al enviar el formulario. Inténtalo de nuevo.".to_string()
}

fn default_notification_duration_ms() -> u64 {
    3000
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            tracked_attribute: default_tracked_attribute(),
            min_length_attribute: default_min_length_attribute(),
            max_length_attribute: default_max_length_attribute(),
        }
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            field_error: default_field_error(),
            field_success: default_field_success(),
            error_message: default_error_message(),
            form_loading: default_form_loading(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            submit_success: default_submit_success(),
            submit_failure: default_submit_failure(),
            notification_duration_ms: default_notification_duration_ms(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(content).context("Failed to parse engine configuration")
    }

    /// Load configuration from a puntos.toml file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Load configuration from default path (./puntos.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("puntos.toml")
    }
}
