//! ipscale configuration loading from `.ipscalerc.toml`.
//!
//! Configuration is optional. The CLI looks for `.ipscalerc.toml` in the
//! working directory, then for `ipscale/config.toml` in the user config
//! directory. An explicit `--config <path>` skips discovery.
//!
//! # Example Configuration
//!
//! ```toml
//! [lookup]
//! endpoint = "https://api.ipify.org?format=json"
//! timeout_secs = 10
//!
//! [sequence]
//! length = 8
//! base_octave = 4
//! octave_span = 3
//!
//! [output]
//! format = "table"
//! color = true
//! ```

use ipscale_core::SequenceOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_LOOKUP_ENDPOINT, DEFAULT_LOOKUP_TIMEOUT_SECS};

/// Root configuration structure.
///
/// All sections are optional and fall back to defaults.
#[derive(Debug, Deserialize, Default)]
pub struct IpscaleConfig {
    /// Public IP lookup settings.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Defaults for generated sequences.
    #[serde(default)]
    pub sequence: SequenceConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Public IP lookup settings.
#[derive(Debug, Deserialize, Default)]
pub struct LookupConfig {
    /// Endpoint returning `{"ip": "..."}`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Defaults for `ipscale sequence`. Command-line flags override these.
#[derive(Debug, Deserialize, Default)]
pub struct SequenceConfig {
    /// Number of steps. Default: one step per scale note.
    #[serde(default)]
    pub length: Option<usize>,

    /// Lowest octave. Default: 4.
    #[serde(default)]
    pub base_octave: Option<u8>,

    /// Number of octaves to pick from. Default: 3.
    #[serde(default)]
    pub octave_span: Option<u8>,
}

/// Output formatting preferences.
///
/// `--format` overrides `format`.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Valid values: `table`, `json`, `csv`. Default: `table`.
    #[serde(default)]
    pub format: Option<String>,

    /// Force colors on or off. Default: on when stdout is a TTY.
    #[serde(default)]
    pub color: Option<bool>,
}

impl IpscaleConfig {
    /// Load configuration, using `explicit` when given and discovery otherwise.
    ///
    /// Missing or unparsable files yield defaults; problems are logged as warnings.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Self {
        match explicit {
            Some(path) => Self::load_file(path).unwrap_or_default(),
            None => Self::candidates(root)
                .into_iter()
                .find(|path| path.exists())
                .and_then(|path| Self::load_file(&path))
                .unwrap_or_default(),
        }
    }

    fn candidates(root: &Path) -> Vec<PathBuf> {
        let mut paths = vec![root.join(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("ipscale").join("config.toml"));
        }
        paths
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn lookup_endpoint(&self) -> &str {
        self.lookup
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_LOOKUP_ENDPOINT)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(
            self.lookup
                .timeout_secs
                .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS),
        )
    }

    /// Sequence options from config, with core defaults for unset fields.
    pub fn sequence_options(&self) -> SequenceOptions {
        let defaults = SequenceOptions::default();
        SequenceOptions {
            length: self.sequence.length.or(defaults.length),
            base_octave: self.sequence.base_octave.unwrap_or(defaults.base_octave),
            octave_span: self.sequence.octave_span.unwrap_or(defaults.octave_span),
        }
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = IpscaleConfig::default();
        assert_eq!(config.lookup_endpoint(), DEFAULT_LOOKUP_ENDPOINT);
        assert_eq!(config.lookup_timeout(), Duration::from_secs(10));
        assert_eq!(config.sequence_options(), SequenceOptions::default());
        assert!(config.default_format().is_none());
        assert!(config.use_color().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: IpscaleConfig = toml::from_str(
            r#"
[lookup]
endpoint = "http://localhost:9999/ip"
timeout_secs = 3

[sequence]
length = 16
base_octave = 2
octave_span = 1

[output]
format = "json"
color = false
"#,
        )
        .unwrap();

        assert_eq!(config.lookup_endpoint(), "http://localhost:9999/ip");
        assert_eq!(config.lookup_timeout(), Duration::from_secs(3));
        assert_eq!(
            config.sequence_options(),
            SequenceOptions {
                length: Some(16),
                base_octave: 2,
                octave_span: 1,
            }
        );
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
    }

    #[test]
    fn test_partial_sequence_section() {
        let config: IpscaleConfig = toml::from_str("[sequence]\nlength = 4\n").unwrap();
        let options = config.sequence_options();
        assert_eq!(options.length, Some(4));
        assert_eq!(options.base_octave, 4);
        assert_eq!(options.octave_span, 3);
    }

    #[test]
    fn test_load_from_working_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[output]\nformat = \"csv\"\n",
        )
        .unwrap();

        let config = IpscaleConfig::load(None, dir.path());
        assert_eq!(config.default_format(), Some("csv"));
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[lookup\nendpoint = ").unwrap();

        let config = IpscaleConfig::load(Some(&path), dir.path());
        assert_eq!(config.lookup_endpoint(), DEFAULT_LOOKUP_ENDPOINT);
    }

    #[test]
    fn test_missing_explicit_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = IpscaleConfig::load(Some(&dir.path().join("nope.toml")), dir.path());
        assert!(config.default_format().is_none());
    }
}
