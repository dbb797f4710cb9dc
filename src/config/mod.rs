//! Configuration management for `tocspy.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── outline    # [outline]
//! │   ├── spy        # [spy]
//! │   └── tags       # [tags]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # TocConfig (this file)
//! ```
//!
//! A missing config file is not an error: every section has defaults that
//! match the site the tool was written for.

pub mod section;
pub mod types;
mod util;

pub use section::{OutlineConfig, SpyConfig, TagsConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use crate::{
    cli::{Cli, Commands, DEFAULT_CONFIG},
    debug, log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing tocspy.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TocConfig {
    /// Absolute path to the config file, empty when defaults are used
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Heading extraction settings
    #[serde(default)]
    pub outline: OutlineConfig,

    /// Scroll-spy settings
    #[serde(default)]
    pub spy: SpyConfig,

    /// Tag listing settings
    #[serde(default)]
    pub tags: TagsConfig,
}

impl TocConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file, falls back to defaults,
    /// applies command-line overrides and validates the result.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(&cwd, cli)
    }

    /// [`load`](Self::load) with the search starting at `start`.
    ///
    /// Defaults only stand in for the default `tocspy.toml`; a config file
    /// named with `-C` must exist.
    pub fn load_from(start: &Path, cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(start, &cli.config) {
            Some(path) => {
                debug!("config"; "loading {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None if cli.config.as_path() != Path::new(DEFAULT_CONFIG) => {
                bail!("config file not found: {}", cli.config.display());
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self::default()
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Spy { args } => {
                Self::update_option(&mut self.spy.policy, args.policy.as_ref());
            }
            Commands::Tags { args } => {
                Self::update_option(&mut self.tags.max, args.max.as_ref());
            }
            Commands::Outline { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.outline.validate(&mut diag);
        self.spy.validate(&mut diag);
        self.tags.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> TocConfig {
    let (parsed, ignored) = TocConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spy::ActivePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_valid() {
        let config = TocConfig::from_str("").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) =
            TocConfig::parse_with_ignored("[spy]\ntop-margin = 80.0\nsticky = true\n").unwrap();
        assert_eq!(config.spy.top_margin, 80.0);
        assert_eq!(ignored, vec!["spy.sticky"]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = TocConfig::from_path(&temp.path().join("tocspy.toml")).unwrap_err();
        assert!(format!("{err}").contains("tocspy.toml"));
    }

    #[test]
    fn test_from_path_reads_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tocspy.toml");
        fs::write(&path, "[spy]\npolicy = \"reading-position\"\n[tags]\nmax = 3\n").unwrap();

        let config = TocConfig::from_path(&path).unwrap();
        assert_eq!(config.spy.policy, ActivePolicy::ReadingPosition);
        assert_eq!(config.tags.max, 3);
    }

    fn cli(args: &[&str]) -> Cli {
        use clap::Parser;
        let argv = ["tocspy"]
            .iter()
            .chain(args.iter())
            .chain(["outline", "post.md"].iter())
            .copied();
        Cli::parse_from(argv)
    }

    #[test]
    fn test_load_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = TocConfig::load_from(temp.path(), &cli(&[])).unwrap();
        assert!(config.config_path.as_os_str().is_empty());
        assert_eq!(config.tags.max, 5);
    }

    #[test]
    fn test_load_finds_file_upward() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("posts/2024");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("tocspy.toml"), "[tags]\nmax = 2\n").unwrap();

        let config = TocConfig::load_from(&nested, &cli(&[])).unwrap();
        assert_eq!(config.tags.max, 2);
        assert_eq!(config.config_path, temp.path().join("tocspy.toml"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = TocConfig::load_from(temp.path(), &cli(&["-C", "site.toml"])).unwrap_err();
        assert!(err.to_string().contains("site.toml"));

        let absolute = temp.path().join("nope.toml");
        let absolute = absolute.to_str().unwrap();
        assert!(TocConfig::load_from(temp.path(), &cli(&["-C", absolute])).is_err());
    }

    #[test]
    fn test_validate_reports_diagnostics() {
        let config = test_parse_config("[spy]\nbottom-fraction = 1.5\n[tags]\nmax = 0");
        let err = config.validate().unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        match config_err {
            ConfigError::Diagnostics(diag) => assert_eq!(diag.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
