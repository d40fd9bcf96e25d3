//! Generation orchestrator and output sink

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::catalog::TableMetadata;
use crate::config::GenConfig;
use crate::error::Result;

use super::class_generator::generate_class;
use super::naming::to_class_name;
use super::proc_generator::generate_procedures;

/// The two text blobs produced for a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// T-SQL procedure source
    pub procedures: String,
    /// C# record-access class source
    pub class: String,
}

/// Orchestrates procedure and class generation for tables
pub struct CodeGenerator<'a> {
    config: &'a GenConfig,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(config: &'a GenConfig) -> Self {
        Self { config }
    }

    /// Produce both artifacts for one table. Pure: no I/O, deterministic for
    /// a given table value.
    pub fn generate_table(&self, table: &TableMetadata) -> Result<Artifacts> {
        debug!("Generating artifacts for table {}", table.name);
        Ok(Artifacts {
            procedures: generate_procedures(table, &self.config.database)?,
            class: generate_class(table, &self.config.database)?,
        })
    }

    /// Write a table's artifacts to the configured output directories.
    pub fn write_artifacts(&self, table: &TableMetadata, artifacts: &Artifacts) -> Result<()> {
        let proc_path = self.proc_path(table);
        let class_path = self.class_path(table);

        if self.config.dry_run {
            info!("Dry run - would write {:?} and {:?}", proc_path, class_path);
            return Ok(());
        }

        if self.config.generate_procs {
            fs::create_dir_all(&self.config.output_procs_dir)?;
            fs::write(&proc_path, &artifacts.procedures)?;
            info!("Wrote {:?}", proc_path);
        }
        if self.config.generate_class {
            fs::create_dir_all(&self.config.output_class_dir)?;
            fs::write(&class_path, &artifacts.class)?;
            info!("Wrote {:?}", class_path);
        }

        Ok(())
    }

    /// Destination for the procedure source: `CREATE_<table>.sql`
    pub fn proc_path(&self, table: &TableMetadata) -> PathBuf {
        self.config
            .output_procs_dir
            .join(format!("CREATE_{}.sql", table.name))
    }

    /// Destination for the class source: `<Class>.cs`
    pub fn class_path(&self, table: &TableMetadata) -> PathBuf {
        self.config
            .output_class_dir
            .join(format!("{}.cs", to_class_name(&table.name)))
    }
}
