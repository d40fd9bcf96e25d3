//! TOML catalog snapshot provider
//!
//! A snapshot file is a flat export of the catalog rows the generators need,
//! one `[[table]]` block per table:
//!
//! ```toml
//! [[table]]
//! name = "Widgets"
//!
//! [[table.column]]
//! name = "id"
//! data_type = "int"
//! identity = true
//!
//! [[table.column]]
//! name = "name"
//! data_type = "varchar"
//! max_length = 50
//! ```
//!
//! Column position defaults to file order when not given explicitly. Unlike
//! the DDL front-end, snapshots can carry `computed = true`.

use std::path::Path;

use serde::Deserialize;

use crate::error::{GenError, Result};

use super::metadata::{ColumnMetadata, SqlType, TableMetadata};
use super::provider::MetadataProvider;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default, rename = "table")]
    tables: Vec<SnapshotTable>,
}

#[derive(Debug, Deserialize)]
struct SnapshotTable {
    name: String,
    #[serde(default, rename = "column")]
    columns: Vec<SnapshotColumn>,
}

#[derive(Debug, Deserialize)]
struct SnapshotColumn {
    name: String,
    data_type: String,
    #[serde(default)]
    max_length: i32,
    #[serde(default)]
    precision: i32,
    #[serde(default)]
    position: Option<i32>,
    #[serde(default)]
    identity: bool,
    #[serde(default)]
    computed: bool,
}

/// Provider backed by a TOML catalog snapshot
#[derive(Debug)]
pub struct SnapshotProvider {
    tables: Vec<TableMetadata>,
}

impl SnapshotProvider {
    /// Parse a snapshot from a TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let file: SnapshotFile = toml::from_str(content)
            .map_err(|e| GenError::MetadataUnavailable(format!("malformed snapshot: {e}")))?;

        let tables = file.tables.into_iter().map(convert_table).collect();
        Ok(Self { tables })
    }

    /// Load a snapshot from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenError::MetadataUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_str(&content)
    }
}

impl MetadataProvider for SnapshotProvider {
    fn tables(&self) -> Result<Vec<TableMetadata>> {
        Ok(self.tables.clone())
    }
}

fn convert_table(table: SnapshotTable) -> TableMetadata {
    let columns = table
        .columns
        .into_iter()
        .enumerate()
        .map(|(idx, col)| ColumnMetadata {
            name: col.name,
            data_type: SqlType::parse(&col.data_type),
            max_length: col.max_length,
            precision: col.precision,
            position: col.position.unwrap_or(idx as i32 + 1),
            is_identity: col.identity,
            is_computed: col.computed,
        })
        .collect();

    TableMetadata {
        name: table.name,
        columns,
    }
}
