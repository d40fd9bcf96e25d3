//! sprocgen: Generate T-SQL stored procedures and C# record-access classes
//! from table metadata
//!
//! Given the column metadata of a table, this crate emits two text artifacts:
//!
//! - Four parameterized data-modification procedures (insert/update/delete/
//!   select), each guarded by a drop-if-exists statement and named
//!   `stp_<table>_{ins,upd,del,sel}`
//! - A companion record-access class whose fields mirror the table's columns
//!   and whose `Save`/`Load`/`Delete` methods invoke those procedures
//!
//! Metadata comes from a TOML catalog snapshot or a `.sql` DDL file; the
//! generation core itself is pure text transformation with no I/O.
//!
//! # Library usage
//!
//! ```rust,ignore
//! use sprocgen::GeneratorBuilder;
//!
//! GeneratorBuilder::new("catalog.toml")
//!     .database("Northwind")
//!     .output_dir("./generated")
//!     .generate()?;
//! ```
//!
//! # CLI usage
//!
//! ```bash
//! sprocgen --schema catalog.toml --output ./generated generate
//! ```

pub mod catalog;
pub mod codegen;
pub mod config;
pub mod error;

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

pub use catalog::{MetadataProvider, TableMetadata};
pub use codegen::{Artifacts, CodeGenerator};
pub use config::GenConfig;
pub use error::{GenError, Result};

/// Main entry point: load metadata, generate, and write artifacts for every
/// selected table.
pub fn generate(config: &GenConfig) -> Result<()> {
    info!("Loading schema: {:?}", config.schema_file);
    let provider = catalog::provider_for_path(&config.schema_file)?;
    let tables = provider.tables()?;
    info!("Found {} tables", tables.len());

    let tables = filter_tables(tables, &config.include_tables, &config.exclude_tables);
    debug!(
        "After filtering: {} tables (include={}, exclude={})",
        tables.len(),
        config.include_tables,
        config.exclude_tables
    );

    let generator = CodeGenerator::new(config);
    for table in &tables {
        let artifacts = generator.generate_table(table)?;
        generator.write_artifacts(table, &artifacts)?;
    }

    info!("Generation complete");
    Ok(())
}

/// Generate the artifacts for a single table without writing them anywhere.
pub fn generate_table(config: &GenConfig, table_name: &str) -> Result<Artifacts> {
    let provider = catalog::provider_for_path(&config.schema_file)?;
    let table = provider.table(table_name)?;
    CodeGenerator::new(config).generate_table(&table)
}

/// Filter tables based on include/exclude patterns
fn filter_tables(
    tables: Vec<TableMetadata>,
    include: &str,
    exclude: &str,
) -> Vec<TableMetadata> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<String> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(|s| s.trim().to_string()).collect()
    };
    let exclude_set: HashSet<String> = exclude
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    tables
        .into_iter()
        .filter(|t| {
            let name = &t.name;
            let included = include_all || include_set.contains(name);
            let excluded = exclude_set.contains(name);
            included && !excluded
        })
        .collect()
}

/// Builder pattern for programmatic configuration
pub struct GeneratorBuilder {
    config: GenConfig,
}

impl GeneratorBuilder {
    /// Create a new builder with the given schema file
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: GenConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Set the output directory for both procedure and class source
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.config.output_procs_dir = dir.join("procs");
        self.config.output_class_dir = dir.join("classes");
        self
    }

    /// Set the output directory for procedure source only
    pub fn output_procs_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_procs_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the output directory for class source only
    pub fn output_class_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_class_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the database name (USE preamble and class namespace)
    pub fn database(mut self, name: &str) -> Self {
        self.config.database = name.to_string();
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Generate only procedure source, no classes
    pub fn procs_only(mut self) -> Self {
        self.config.generate_class = false;
        self
    }

    /// Generate only class source, no procedures
    pub fn class_only(mut self) -> Self {
        self.config.generate_procs = false;
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// Run generation
    pub fn generate(self) -> Result<()> {
        generate(&self.config)
    }

    /// Hand back the assembled configuration without running
    pub fn into_config(self) -> GenConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> TableMetadata {
        TableMetadata {
            name: name.to_string(),
            columns: vec![],
        }
    }

    #[test]
    fn test_filter_tables_include_all() {
        let tables = vec![table("a"), table("b")];
        let filtered = filter_tables(tables, "*", "");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_tables_include_some() {
        let tables = vec![table("a"), table("b"), table("c")];
        let filtered = filter_tables(tables, "a, c", "");
        let names: Vec<&str> = filtered.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_tables_exclude() {
        let tables = vec![table("a"), table("b")];
        let filtered = filter_tables(tables, "*", "b");
        let names: Vec<&str> = filtered.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_builder_assembles_config() {
        let config = GeneratorBuilder::new("catalog.toml")
            .database("Northwind")
            .output_dir("out")
            .procs_only()
            .dry_run()
            .into_config();

        assert_eq!(config.schema_file, std::path::PathBuf::from("catalog.toml"));
        assert_eq!(config.database, "Northwind");
        assert_eq!(config.output_procs_dir, std::path::PathBuf::from("out/procs"));
        assert!(!config.generate_class);
        assert!(config.dry_run);
    }
}
