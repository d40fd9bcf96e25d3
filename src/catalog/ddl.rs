//! DDL file provider using sqlparser-rs
//!
//! Parses `CREATE TABLE` statements so a generation run needs nothing but a
//! schema file. `AUTO_INCREMENT` marks the identity column. Computed columns
//! cannot be expressed in this front-end; use a catalog snapshot when the
//! table has them.

use std::path::Path;

use sqlparser::ast::{ColumnOption, Ident, ObjectName, Statement};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use crate::error::{GenError, Result};

use super::metadata::{ColumnMetadata, SqlType, TableMetadata};
use super::provider::MetadataProvider;

/// Provider backed by a parsed DDL file
#[derive(Debug)]
pub struct DdlProvider {
    tables: Vec<TableMetadata>,
}

impl DdlProvider {
    /// Parse DDL from a string
    pub fn from_sql(sql: &str) -> Result<Self> {
        Ok(Self {
            tables: parse_ddl(sql)?,
        })
    }

    /// Load and parse a DDL file
    pub fn from_file(path: &Path) -> Result<Self> {
        let sql = std::fs::read_to_string(path).map_err(|e| {
            GenError::MetadataUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_sql(&sql)
    }
}

impl MetadataProvider for DdlProvider {
    fn tables(&self) -> Result<Vec<TableMetadata>> {
        Ok(self.tables.clone())
    }
}

/// Parse a DDL string into table metadata
pub fn parse_ddl(sql: &str) -> Result<Vec<TableMetadata>> {
    let dialect = MySqlDialect {};
    let statements = Parser::parse_sql(&dialect, sql)?;

    let mut tables = Vec::new();

    for stmt in statements {
        if let Statement::CreateTable(create_table) = stmt {
            tables.push(extract_table(&create_table));
        }
    }

    Ok(tables)
}

fn extract_table(create: &sqlparser::ast::CreateTable) -> TableMetadata {
    let name = extract_table_name(&create.name);

    let columns = create
        .columns
        .iter()
        .enumerate()
        .map(|(idx, col_def)| extract_column(col_def, idx as i32 + 1))
        .collect();

    TableMetadata { name, columns }
}

fn extract_column(col_def: &sqlparser::ast::ColumnDef, position: i32) -> ColumnMetadata {
    let name = extract_ident(&col_def.name);
    let type_text = format!("{}", col_def.data_type);
    let (type_name, max_length, precision) = split_sized_type(&type_text);

    let mut is_identity = false;

    for option in &col_def.options {
        if let ColumnOption::DialectSpecific(tokens) = &option.option {
            let token_str = tokens
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" ")
                .to_uppercase();
            if token_str.contains("AUTO_INCREMENT") {
                is_identity = true;
            }
        }
    }

    ColumnMetadata {
        name,
        data_type: SqlType::parse(&type_name),
        max_length,
        precision,
        position,
        is_identity,
        is_computed: false,
    }
}

/// Split a rendered data type like `VARCHAR(50)` or `DECIMAL(10,2)` into its
/// name and up to two size arguments.
fn split_sized_type(type_text: &str) -> (String, i32, i32) {
    let Some(open) = type_text.find('(') else {
        return (type_text.trim().to_string(), 0, 0);
    };

    let name = type_text[..open].trim().to_string();
    let args = type_text[open + 1..].trim_end_matches(')');

    let mut parts = args.split(',').map(|p| p.trim().parse::<i32>().unwrap_or(0));
    let max_length = parts.next().unwrap_or(0);
    let precision = parts.next().unwrap_or(0);

    (name, max_length, precision)
}

fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn extract_ident(ident: &Ident) -> String {
    ident.value.clone()
}
