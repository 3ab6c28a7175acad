/// Configuration for reading and writing SFM files
///
/// A TOML file names the encodings, the entry separator and prefix, the marker
/// map applied on read, and the logging setup.

use crate::collection::ReadOptions;
use crate::encoding::{self, DEFAULT_ENCODING};
use crate::marker::is_marker_name;
use crate::segment::DEFAULT_ENTRY_SEP;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# sfmx configuration file

[read]
# Encoding of input files (default: "utf-8")
encoding = "utf-8"

# Separator between entries (default: a blank line)
entry_sep = "\n\n"

# Text prepended to every entry block after splitting (default: entry_sep)
#entry_prefix = "\\lx "

[write]
# Encoding of output files (default: "utf-8")
encoding = "utf-8"

[markers]
# Markers renamed while reading, e.g.
#lexeme = "lx"

[logging]
# Log read/write operations (default: false)
debug = false

# Log file; logs go to stderr when unset
#log_file = "/tmp/sfmx.log"

# tracing filter directive (default: "sfmx=debug")
level = "sfmx=debug"
"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub read: ReadConfig,

    #[serde(default)]
    pub write: WriteConfig,

    /// Source marker -> replacement marker
    #[serde(default)]
    pub markers: BTreeMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadConfig {
    #[serde(default = "default_encoding")]
    pub encoding: String,

    #[serde(default = "default_entry_sep")]
    pub entry_sep: String,

    #[serde(default)]
    pub entry_prefix: Option<String>,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            entry_sep: default_entry_sep(),
            entry_prefix: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteConfig {
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// `EnvFilter` directive
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_file: None,
            level: default_level(),
        }
    }
}

fn default_encoding() -> String { DEFAULT_ENCODING.to_string() }
fn default_entry_sep() -> String { DEFAULT_ENTRY_SEP.to_string() }
fn default_level() -> String { "sfmx=debug".to_string() }

impl Config {
    /// Options for `Collection::read_*`
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            encoding: self.read.encoding.clone(),
            marker_map: self.markers.clone().into_iter().collect(),
            entry_sep: self.read.entry_sep.clone(),
            entry_prefix: self.read.entry_prefix.clone(),
        }
    }

    /// Encoding label for `Collection::write_*`
    pub fn write_encoding(&self) -> &str {
        &self.write.encoding
    }
}

/// The commented default configuration
pub fn default_config_content() -> &'static str {
    DEFAULT_CONFIG
}

/// Write the commented default configuration to `path`
pub fn save_default_config(path: &Path) -> Result<()> {
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write default config file: {}", path.display()))?;

    Ok(())
}

/// Parse configuration text and validate it
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).context("Failed to parse config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load and validate the configuration file at `path`
pub fn load_config(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&config_str).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Save configuration to file
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let config_str = toml::to_string_pretty(config)
        .context("Failed to serialize config")?;

    fs::write(path, config_str)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    for label in [&config.read.encoding, &config.write.encoding] {
        encoding::resolve(label)?;
    }

    if config.read.entry_sep.is_empty() {
        anyhow::bail!("Invalid entry_sep: must not be empty");
    }

    for (from, to) in &config.markers {
        if !is_marker_name(from) {
            anyhow::bail!("Invalid marker name in [markers]: {:?}", from);
        }
        if !is_marker_name(to) {
            anyhow::bail!("Invalid replacement marker for {}: {:?}", from, to);
        }
    }

    if config.logging.debug {
        tracing_subscriber::EnvFilter::try_new(&config.logging.level)
            .with_context(|| format!("Invalid logging level: {}", config.logging.level))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.read.encoding, "utf-8");
        assert_eq!(config.read.entry_sep, "\n\n");
        assert_eq!(config.read.entry_prefix, None);
        assert_eq!(config.write.encoding, "utf-8");
        assert!(config.markers.is_empty());
        assert!(!config.logging.debug);
        assert_eq!(config.read_options(), ReadOptions::default());
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let config = parse_config(default_config_content()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            [read]
            encoding = "latin1"
            entry_prefix = "\\lx "

            [markers]
            lexeme = "lx"
            "#,
        )
        .unwrap();
        assert_eq!(config.read.entry_sep, "\n\n");
        let options = config.read_options();
        assert_eq!(options.encoding, "latin1");
        assert_eq!(options.effective_prefix(), "\\lx ");
        assert_eq!(options.map_marker("lexeme"), "lx");
        assert_eq!(options.map_marker("ps"), "ps");
    }

    #[test]
    fn test_empty_entry_prefix_uses_separator() {
        let config = parse_config(
            r#"
            [read]
            entry_sep = "\n\\lx "
            entry_prefix = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.read_options().effective_prefix(), "\n\\lx ");
    }

    #[test]
    fn test_validate_config_invalid_encoding() {
        let mut config = Config::default();
        config.write.encoding = "klingon".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_empty_separator() {
        let mut config = Config::default();
        config.read.entry_sep = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_marker() {
        let mut config = Config::default();
        config.markers.insert("lexeme".to_string(), "\\lx".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sfmx.toml");

        let mut config = Config::default();
        config.markers.insert("lexeme".to_string(), "lx".to_string());
        config.read.entry_prefix = Some("\\lx ".to_string());
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config(&temp_dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_save_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sfmx.toml");
        save_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }
}
