//! Naming utilities for generated artifacts

use heck::ToPascalCase;

/// The four generated data-modification operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Update,
    Delete,
    Select,
}

impl Operation {
    /// Suffix used in the deterministic procedure name
    pub fn suffix(&self) -> &'static str {
        match self {
            Operation::Insert => "ins",
            Operation::Update => "upd",
            Operation::Delete => "del",
            Operation::Select => "sel",
        }
    }

    /// Banner label for the procedure source
    pub fn banner(&self) -> &'static str {
        match self {
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Select => "SELECT",
        }
    }
}

/// Deterministic procedure name: `stp_<table>_<suffix>`
pub fn proc_name(table_name: &str, op: Operation) -> String {
    format!("stp_{}_{}", table_name, op.suffix())
}

/// Convert a table name to the generated class name (PascalCase)
pub fn to_class_name(table_name: &str) -> String {
    table_name.to_pascal_case()
}
