//! Metadata structures describing a table and its columns

use serde::{Deserialize, Serialize};

/// Metadata for a database table
///
/// Column order is catalog position order and is preserved verbatim through
/// generation; insert column lists and value lists are matched by position,
/// not by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name
    pub name: String,

    /// Columns in catalog position order
    pub columns: Vec<ColumnMetadata>,
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,

    /// Column data type
    pub data_type: SqlType,

    /// Declared length; meaningful for character and decimal types only
    pub max_length: i32,

    /// Declared precision; meaningful for decimal/numeric/float types only
    pub precision: i32,

    /// 1-based catalog position
    pub position: i32,

    /// Whether the value is server-generated on insert (the row key)
    pub is_identity: bool,

    /// Whether the value is derived server-side and never written by clients
    pub is_computed: bool,
}

impl TableMetadata {
    /// The single identity column, if the table has one.
    ///
    /// Recomputed on every call rather than cached so WHERE-clause generation
    /// stays consistent with whatever the columns currently say.
    pub fn identity_column(&self) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.is_identity)
    }

    /// Columns a client may write: neither identity nor computed.
    pub fn writable_columns(&self) -> Vec<&ColumnMetadata> {
        self.columns
            .iter()
            .filter(|c| !c.is_identity && !c.is_computed)
            .collect()
    }

    /// Columns addressable in an UPDATE: every non-computed column, plus the
    /// identity even when it is itself computed. The identity stays usable as
    /// the WHERE key regardless of how the server produces it.
    pub fn stored_columns(&self) -> Vec<&ColumnMetadata> {
        self.columns
            .iter()
            .filter(|c| c.is_identity || !c.is_computed)
            .collect()
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// The closed set of recognized column data types.
///
/// Anything the catalog reports that is not in this set lands in
/// [`SqlType::Other`] and is treated as a character type end-to-end
/// (parameter shape, field type, default literal, row conversion). That
/// fallback keeps generation total over arbitrary catalog input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SqlType {
    Char,
    VarChar,
    NChar,
    NVarChar,
    Text,
    SmallInt,
    Int,
    BigInt,
    Decimal,
    Numeric,
    Float,
    Bit,
    DateTime,
    SmallDateTime,
    /// Unrecognized catalog type name, carried through verbatim
    Other(String),
}

impl SqlType {
    /// Parse a catalog type name. Total: unknown names become `Other`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "char" => SqlType::Char,
            "varchar" => SqlType::VarChar,
            "nchar" => SqlType::NChar,
            "nvarchar" => SqlType::NVarChar,
            "text" => SqlType::Text,
            "smallint" => SqlType::SmallInt,
            "int" | "integer" => SqlType::Int,
            "bigint" => SqlType::BigInt,
            "decimal" => SqlType::Decimal,
            "numeric" => SqlType::Numeric,
            "float" => SqlType::Float,
            "bit" => SqlType::Bit,
            "datetime" => SqlType::DateTime,
            "smalldatetime" => SqlType::SmallDateTime,
            _ => SqlType::Other(name.trim().to_lowercase()),
        }
    }

    /// The type name as it appears in a procedure parameter declaration
    pub fn sql_name(&self) -> &str {
        match self {
            SqlType::Char => "char",
            SqlType::VarChar => "varchar",
            SqlType::NChar => "nchar",
            SqlType::NVarChar => "nvarchar",
            SqlType::Text => "text",
            SqlType::SmallInt => "smallint",
            SqlType::Int => "int",
            SqlType::BigInt => "bigint",
            SqlType::Decimal => "decimal",
            SqlType::Numeric => "numeric",
            SqlType::Float => "float",
            SqlType::Bit => "bit",
            SqlType::DateTime => "datetime",
            SqlType::SmallDateTime => "smalldatetime",
            SqlType::Other(name) => name,
        }
    }
}

impl From<String> for SqlType {
    fn from(s: String) -> Self {
        SqlType::parse(&s)
    }
}

impl From<SqlType> for String {
    fn from(ty: SqlType) -> Self {
        ty.sql_name().to_string()
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_name())
    }
}
