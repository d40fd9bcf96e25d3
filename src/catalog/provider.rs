//! Metadata provider abstraction
//!
//! Generation cannot start without metadata; providers that fail report
//! [`GenError::MetadataUnavailable`] and the generators never attempt to
//! recover from it.

use std::path::Path;

use crate::error::{GenError, Result};

use super::ddl::DdlProvider;
use super::metadata::TableMetadata;
use super::snapshot::SnapshotProvider;

/// Source of table metadata, decoupled from where it comes from.
///
/// The generation core only ever sees [`TableMetadata`] values; whether they
/// were parsed from a DDL file, a catalog snapshot, or built in memory is
/// invisible to it.
pub trait MetadataProvider {
    /// All tables the provider knows about, in source order.
    fn tables(&self) -> Result<Vec<TableMetadata>>;

    /// A single table by name.
    fn table(&self, name: &str) -> Result<TableMetadata> {
        self.tables()?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| GenError::MetadataUnavailable(format!("unknown table '{name}'")))
    }
}

/// Pick a provider for a schema file based on its extension:
/// `.sql` is parsed as DDL, anything else as a TOML catalog snapshot.
pub fn provider_for_path(path: &Path) -> Result<Box<dyn MetadataProvider>> {
    let is_ddl = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("sql"))
        .unwrap_or(false);

    if is_ddl {
        Ok(Box::new(DdlProvider::from_file(path)?))
    } else {
        Ok(Box::new(SnapshotProvider::from_file(path)?))
    }
}

/// In-memory provider, mainly for tests and library callers that already
/// hold metadata.
#[derive(Debug)]
pub struct StaticProvider {
    tables: Vec<TableMetadata>,
}

impl StaticProvider {
    pub fn new(tables: Vec<TableMetadata>) -> Self {
        Self { tables }
    }
}

impl MetadataProvider for StaticProvider {
    fn tables(&self) -> Result<Vec<TableMetadata>> {
        Ok(self.tables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::metadata::{ColumnMetadata, SqlType};

    fn widgets() -> TableMetadata {
        TableMetadata {
            name: "Widgets".to_string(),
            columns: vec![ColumnMetadata {
                name: "id".to_string(),
                data_type: SqlType::Int,
                max_length: 0,
                precision: 0,
                position: 1,
                is_identity: true,
                is_computed: false,
            }],
        }
    }

    #[test]
    fn test_table_by_name() {
        let provider = StaticProvider::new(vec![widgets()]);
        assert_eq!(provider.table("Widgets").unwrap().name, "Widgets");
    }

    #[test]
    fn test_unknown_table_is_unavailable() {
        let provider = StaticProvider::new(vec![widgets()]);
        let err = provider.table("Gadgets").unwrap_err();
        assert!(matches!(err, GenError::MetadataUnavailable(_)));
    }
}
