//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Main configuration struct matching the redirkit.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// File extensions treated as documents
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub redirects: RedirectConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "html".to_string()]
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Settings for the redirect generator.
///
/// The PascalCase aliases accept settings files written for hosts that use
/// `MetaRefreshRedirects`-style keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// Emit a meta-refresh HTML page per redirect-from entry
    #[serde(default = "default_true", alias = "MetaRefreshRedirects")]
    pub meta_refresh: bool,

    /// Emit the server-side rules file
    #[serde(default, alias = "NetlifyRedirects")]
    pub netlify: bool,

    /// Include prefix redirects in the rules file
    #[serde(default = "default_true", alias = "NetlifyPrefixRedirects")]
    pub netlify_prefix: bool,

    /// Escape prefix marking path segments that need a redirect from the
    /// unmarked name. Empty disables prefix scanning.
    #[serde(default = "default_prefix", alias = "NetlifyRedirectPrefix")]
    pub prefix: String,

    #[serde(default = "default_page_extension")]
    pub page_extension: String,

    /// Name of the rules file at the input root (and default output name)
    #[serde(default = "default_rules_file")]
    pub rules_file: String,
}

fn default_prefix() -> String {
    String::from("^")
}

fn default_page_extension() -> String {
    String::from("html")
}

fn default_rules_file() -> String {
    String::from(crate::rules::DEFAULT_RULES_FILE)
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            meta_refresh: true,
            netlify: false,
            netlify_prefix: true,
            prefix: default_prefix(),
            page_extension: default_page_extension(),
            rules_file: default_rules_file(),
        }
    }
}

impl RedirectConfig {
    /// Escape prefix to scan for, or None when prefix redirects are off.
    ///
    /// Prefix redirects only ever land in the rules file, so they need the
    /// rules file enabled as well.
    pub fn active_prefix(&self) -> Option<&str> {
        if self.netlify && self.netlify_prefix && !self.prefix.is_empty() {
            Some(self.prefix.as_str())
        } else {
            None
        }
    }

    /// Whether any output consumes redirect-from metadata
    pub fn wants_automatic(&self) -> bool {
        self.meta_refresh || self.netlify
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let extension = self.page_extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "redirects.page_extension",
                reason: format!("'{}' is not a file extension", self.page_extension),
            });
        }

        let rules = self.rules_file.trim();
        if rules.is_empty() || rules == "." || rules == ".." || rules.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "redirects.rules_file",
                reason: format!("'{}' must be a plain file name", self.rules_file),
            });
        }

        Ok(())
    }
}

impl Config {
    /// Configuration with default settings for the given directories
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathsConfig {
                input: input.into(),
                output: output.into(),
            },
            base_url: default_base_url(),
            extensions: default_extensions(),
            ignore_patterns: Vec::new(),
            redirects: RedirectConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.redirects.validate()?;
        Ok(config)
    }

    /// Get the input directory, resolved relative to config file
    pub fn input_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.input)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_deref().and_then(Path::parent) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let mut s = raw.trim().to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    if !s.ends_with('/') {
        s.push('/');
    }

    while s.contains("//") {
        s = s.replace("//", "/");
    }

    s
}
