//! Configuration settings for sprocgen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{GenError, Result};

/// Main configuration struct for artifact generation
///
/// Replaces the global server/database/table flags of older generators: the
/// generation core only ever sees an explicit `GenConfig` value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Path to the schema file (TOML catalog snapshot, or `.sql` DDL)
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Tables to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Tables to exclude (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Database name: `USE` preamble of the procedure source and namespace
    /// of the class source
    #[serde(default = "default_database")]
    pub database: String,

    /// Whether to generate procedure source
    #[serde(default = "default_generate_procs")]
    pub generate_procs: bool,

    /// Whether to generate class source
    #[serde(default = "default_generate_class")]
    pub generate_class: bool,

    /// Output directory for procedure source
    #[serde(default = "default_output_procs_dir")]
    pub output_procs_dir: PathBuf,

    /// Output directory for class source
    #[serde(default = "default_output_class_dir")]
    pub output_class_dir: PathBuf,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_database() -> String {
    defaults::DATABASE.to_string()
}
fn default_generate_procs() -> bool {
    defaults::GENERATE_PROCS
}
fn default_generate_class() -> bool {
    defaults::GENERATE_CLASS
}
fn default_output_procs_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_PROCS_DIR)
}
fn default_output_class_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_CLASS_DIR)
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            include_tables: default_include_tables(),
            exclude_tables: default_exclude_tables(),
            database: default_database(),
            generate_procs: default_generate_procs(),
            generate_class: default_generate_class(),
            output_procs_dir: default_output_procs_dir(),
            output_class_dir: default_output_class_dir(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl GenConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GenConfig = toml::from_str(&content).map_err(|e| {
            GenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name("sprocgen").required(false));
        }

        // Override with environment variables (SPROCGEN_*)
        builder = builder.add_source(Environment::with_prefix("SPROCGEN").separator("_"));

        let config: GenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(GenError::ValidationError("schema_file is required".into()));
        }

        if !self.schema_file.exists() {
            return Err(GenError::ValidationError(format!(
                "Schema file not found: {}",
                self.schema_file.display()
            )));
        }

        if !self.generate_procs && !self.generate_class {
            return Err(GenError::ValidationError(
                "nothing to do: both generate_procs and generate_class are disabled".into(),
            ));
        }

        if self.generate_class && self.database.is_empty() {
            return Err(GenError::ValidationError(
                "database is required when generate_class is true (it names the class namespace)"
                    .into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GenConfig::default();
        assert_eq!(config.include_tables, "*");
        assert_eq!(config.database, "Internal");
        assert!(config.generate_procs);
        assert!(config.generate_class);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_validation_missing_schema() {
        let config = GenConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            schema_file = "catalog.toml"
            database = "Northwind"
            log_level = "debug"
        "#;
        let config: GenConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.database, "Northwind");
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert_eq!(config.output_procs_dir, PathBuf::from("./generated/procs"));
    }
}
