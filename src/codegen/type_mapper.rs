//! Column type mapping
//!
//! All four outputs of a column's type (parameter declaration shape, C#
//! field type, default literal, and row-to-field conversion) come from one
//! lookup keyed by the [`SqlType`] family. Adding a type kind is a single
//! table entry here.

use crate::catalog::{ColumnMetadata, SqlType};

/// How the size suffix of a parameter declaration is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeRule {
    /// No suffix
    None,
    /// `(max_length)`
    Length,
    /// `(max_length, precision)`
    LengthAndPrecision,
}

/// How a raw row cell converts into the typed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowConversion {
    /// `row["c"].ToString()`
    ToText,
    /// `Convert.<method>(row["c"])`
    Convert(&'static str),
    /// `Convert.<method>(row["c"].ToString())`
    ConvertViaText(&'static str),
}

/// Everything generation needs to know about a type family
struct TypeMapping {
    size: SizeRule,
    class_type: &'static str,
    default_literal: &'static str,
    conversion: RowConversion,
}

/// The lookup table. Unrecognized types take the character-family row, so
/// generation stays total over arbitrary catalog input.
fn mapping(ty: &SqlType) -> TypeMapping {
    match ty {
        SqlType::Char | SqlType::VarChar | SqlType::NChar | SqlType::NVarChar => TypeMapping {
            size: SizeRule::Length,
            class_type: "string",
            default_literal: "string.Empty",
            conversion: RowConversion::ToText,
        },
        SqlType::Text => TypeMapping {
            size: SizeRule::None,
            class_type: "string",
            default_literal: "string.Empty",
            conversion: RowConversion::ToText,
        },
        SqlType::SmallInt | SqlType::Int | SqlType::BigInt => TypeMapping {
            size: SizeRule::None,
            class_type: "int",
            default_literal: "0",
            conversion: RowConversion::Convert("ToInt32"),
        },
        SqlType::Decimal | SqlType::Numeric => TypeMapping {
            size: SizeRule::LengthAndPrecision,
            class_type: "decimal",
            default_literal: "0.0",
            conversion: RowConversion::ConvertViaText("ToDecimal"),
        },
        SqlType::Float => TypeMapping {
            size: SizeRule::LengthAndPrecision,
            class_type: "float",
            default_literal: "0.0",
            conversion: RowConversion::ConvertViaText("ToSingle"),
        },
        SqlType::Bit => TypeMapping {
            size: SizeRule::None,
            class_type: "bool",
            default_literal: "false",
            conversion: RowConversion::ConvertViaText("ToBoolean"),
        },
        SqlType::DateTime | SqlType::SmallDateTime => TypeMapping {
            size: SizeRule::None,
            class_type: "DateTime",
            default_literal: "DateTime.Parse(\"1/1/1900\")",
            conversion: RowConversion::ConvertViaText("ToDateTime"),
        },
        // Fallback: treat like a character type end-to-end
        SqlType::Other(_) => TypeMapping {
            size: SizeRule::Length,
            class_type: "string",
            default_literal: "string.Empty",
            conversion: RowConversion::ToText,
        },
    }
}

/// Procedure parameter declaration, e.g. `@price decimal(10, 2) `.
///
/// The trailing space is part of the wire format; joined parameter lists read
/// `@name varchar(50) ,@price decimal(10, 2)`.
pub fn parameter_decl(column: &ColumnMetadata) -> String {
    let size = match mapping(&column.data_type).size {
        SizeRule::None => String::new(),
        SizeRule::Length => format!("({})", column.max_length),
        SizeRule::LengthAndPrecision => format!("({}, {})", column.max_length, column.precision),
    };
    format!("@{} {}{} ", column.name, column.data_type.sql_name(), size)
}

/// C# field type for the generated class
pub fn class_type(column: &ColumnMetadata) -> &'static str {
    mapping(&column.data_type).class_type
}

/// Default literal assigned in the generated constructor
pub fn default_literal(column: &ColumnMetadata) -> &'static str {
    mapping(&column.data_type).default_literal
}

/// Row-to-field assignment statement for the generated row loader
pub fn row_assignment(column: &ColumnMetadata) -> String {
    let name = &column.name;
    match mapping(&column.data_type).conversion {
        RowConversion::ToText => format!("{name} = row[\"{name}\"].ToString();"),
        RowConversion::Convert(method) => {
            format!("{name} = Convert.{method}(row[\"{name}\"]);")
        }
        RowConversion::ConvertViaText(method) => {
            format!("{name} = Convert.{method}(row[\"{name}\"].ToString());")
        }
    }
}
