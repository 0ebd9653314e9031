//! Server configuration.
//!
//! Loaded with a precedence chain: bundled defaults, then user overrides in
//! the home config directory, then the working directory, then
//! `STORYBOARD_*` environment variables. The Gemini credential stays in
//! `GEMINI_API_KEY` and is never read from configuration files.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use storyboard_error::{ConfigError, StoryboardError, StoryboardResult};
use storyboard_scenes::FormatOptions;
use tracing::{debug, instrument};

/// Configuration for the Storyboard HTTP server.
///
/// # Example
///
/// ```toml
/// port = 3000
/// cors_origins = ["http://localhost:5173"]
/// model = "gemini-2.5-flash"
/// temperature = 0.3
/// max_output_tokens = 8192
/// max_attempts = 3
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by the CORS layer
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token cap, sized for a full scene map
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Completion attempt budget per format request
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_max_attempts() -> usize {
    3
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origins: default_cors_origins(),
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: env > user override > bundled
    /// default.
    ///
    /// Configuration sources in order of precedence (later sources override
    /// earlier):
    /// 1. Bundled defaults (storyboard.toml shipped with the workspace)
    /// 2. User config in home directory (~/.config/storyboard/storyboard.toml)
    /// 3. User config in current directory (./storyboard.toml)
    /// 4. `STORYBOARD_*` environment variables
    ///
    /// User config files are optional and silently skipped when not found.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional)
        builder = builder.add_source(File::with_name("storyboard").required(false));

        // Environment variables take final precedence
        builder = builder.add_source(Environment::with_prefix("STORYBOARD"));

        builder
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Formatter options derived from this configuration.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            model: Some(self.model.clone()),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            max_attempts: self.max_attempts,
        }
    }
}
