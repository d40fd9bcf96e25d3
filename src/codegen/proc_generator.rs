//! Procedure generator
//!
//! Emits the four data-modification routines for a table as T-SQL source.
//! Every block is regeneration-safe: a drop-if-exists guard precedes each
//! `CREATE PROCEDURE`, and each batch ends with `GO`.
//!
//! Clause lists are collected into vectors and joined in one step, so no
//! generated list can carry a leading, trailing, or doubled separator.

use crate::catalog::TableMetadata;
use crate::error::{GenError, Result};

use super::naming::{proc_name, Operation};
use super::type_mapper::parameter_decl;

/// Generate the full procedure source for a table: a `USE` preamble (when a
/// database name is configured) followed by the insert, update, delete, and
/// select blocks in that fixed order.
pub fn generate_procedures(table: &TableMetadata, database: &str) -> Result<String> {
    if table.columns.is_empty() {
        return Err(GenError::EmptySchema(table.name.clone()));
    }

    let mut out = String::new();

    if !database.is_empty() {
        out.push_str(&format!("USE {database}\n\n"));
    }

    let blocks = [
        (Operation::Insert, insert_proc(table)),
        (Operation::Update, update_proc(table)),
        (Operation::Delete, delete_proc(table)),
        (Operation::Select, select_proc(table)),
    ];

    for (op, body) in blocks {
        out.push_str(&format!("-- ******** {} ********\n", op.banner()));
        out.push_str(&body);
        out.push('\n');
    }

    Ok(out)
}

/// Drop-if-exists guard in its own batch; `CREATE PROCEDURE` must open the
/// next one.
fn drop_guard(name: &str) -> String {
    format!("DROP PROCEDURE IF EXISTS {name}\nGO\n")
}

fn insert_proc(table: &TableMetadata) -> String {
    let name = proc_name(&table.name, Operation::Insert);

    let mut params: Vec<String> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut values: Vec<String> = Vec::new();

    // Column-list and values-list positions are matched by order, so both
    // come from the same pass over the writable columns.
    for col in table.writable_columns() {
        params.push(format!("\t{}", parameter_decl(col)));
        fields.push(col.name.clone());
        values.push(format!("@{}", col.name));
    }

    let identity = table.identity_column();
    if let Some(id) = identity {
        params.push(format!("\t{}OUTPUT", parameter_decl(id)));
    }

    let mut out = drop_guard(&name);
    out.push_str(&format!("CREATE PROCEDURE {name}\n"));
    out.push_str(&params.join(",\n"));
    out.push_str("\nAS\n");
    out.push_str(&format!(
        "INSERT INTO {} ({})\n",
        table.name,
        fields.join(", ")
    ));
    out.push_str(&format!("VALUES ({})\n", values.join(", ")));
    if let Some(id) = identity {
        out.push_str(&format!("SET @{} = SCOPE_IDENTITY()\n", id.name));
    }
    out.push_str("GO\n");
    out
}

fn update_proc(table: &TableMetadata) -> String {
    let name = proc_name(&table.name, Operation::Update);

    let mut params: Vec<String> = Vec::new();
    let mut sets: Vec<String> = Vec::new();
    let mut where_clause = String::new();

    // The identity column takes a parameter too: it drives the WHERE clause.
    for col in table.stored_columns() {
        params.push(format!("\t{}", parameter_decl(col)));
        if col.is_identity {
            where_clause = format!("WHERE {} = @{}", col.name, col.name);
        } else {
            sets.push(format!("{} = @{}", col.name, col.name));
        }
    }

    let mut out = drop_guard(&name);
    out.push_str(&format!("CREATE PROCEDURE {name}\n"));
    out.push_str(&params.join(",\n"));
    out.push_str("\nAS\n");
    out.push_str(&format!("UPDATE {}\n", table.name));
    out.push_str(&format!("SET {}\n", sets.join(", ")));
    if !where_clause.is_empty() {
        out.push_str(&where_clause);
        out.push('\n');
    }
    out.push_str("GO\n");
    out
}

fn delete_proc(table: &TableMetadata) -> String {
    let name = proc_name(&table.name, Operation::Delete);

    let mut params: Vec<String> = Vec::new();
    let mut where_clause = String::new();

    if let Some(id) = table.identity_column() {
        params.push(format!("\t{}", parameter_decl(id)));
        where_clause = format!("WHERE {} = @{}", id.name, id.name);
    }

    let mut out = drop_guard(&name);
    out.push_str(&format!("CREATE PROCEDURE {name}\n"));
    out.push_str(&params.join(",\n"));
    out.push_str("\nAS\n");
    out.push_str(&format!("DELETE FROM {}\n", table.name));
    if !where_clause.is_empty() {
        out.push_str(&where_clause);
        out.push('\n');
    }
    out.push_str("GO\n");
    out
}

fn select_proc(table: &TableMetadata) -> String {
    let name = proc_name(&table.name, Operation::Select);

    let mut params: Vec<String> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut where_clause = String::new();

    if let Some(id) = table.identity_column() {
        params.push(format!("\t{}", parameter_decl(id)));
        where_clause = format!("WHERE {} = @{}", id.name, id.name);
    }
    for col in table.writable_columns() {
        fields.push(col.name.clone());
    }

    let mut out = drop_guard(&name);
    out.push_str(&format!("CREATE PROCEDURE {name}\n"));
    out.push_str(&params.join(",\n"));
    out.push_str("\nAS\n");
    out.push_str(&format!("SELECT {}\n", fields.join(", ")));
    out.push_str(&format!("FROM {}\n", table.name));
    if !where_clause.is_empty() {
        out.push_str(&where_clause);
        out.push('\n');
    }
    out.push_str("GO\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnMetadata, SqlType};

    fn column(
        name: &str,
        data_type: SqlType,
        max_length: i32,
        precision: i32,
        position: i32,
        is_identity: bool,
        is_computed: bool,
    ) -> ColumnMetadata {
        ColumnMetadata {
            name: name.to_string(),
            data_type,
            max_length,
            precision,
            position,
            is_identity,
            is_computed,
        }
    }

    fn widgets() -> TableMetadata {
        TableMetadata {
            name: "Widgets".to_string(),
            columns: vec![
                column("id", SqlType::Int, 0, 0, 1, true, false),
                column("name", SqlType::VarChar, 50, 0, 2, false, false),
                column("price", SqlType::Decimal, 10, 2, 3, false, false),
                column("total", SqlType::Int, 0, 0, 4, false, true),
            ],
        }
    }

    #[test]
    fn test_insert_parameter_list() {
        let sql = generate_procedures(&widgets(), "").unwrap();
        assert!(sql.contains(
            "CREATE PROCEDURE stp_Widgets_ins\n\t@name varchar(50) ,\n\t@price decimal(10, 2) ,\n\t@id int OUTPUT\nAS\n"
        ));
    }

    #[test]
    fn test_insert_column_and_value_lists_correspond() {
        let sql = generate_procedures(&widgets(), "").unwrap();
        assert!(sql.contains("INSERT INTO Widgets (name, price)\nVALUES (@name, @price)\n"));
        assert!(sql.contains("SET @id = SCOPE_IDENTITY()\n"));
    }

    #[test]
    fn test_update_sets_and_where() {
        let sql = generate_procedures(&widgets(), "").unwrap();
        assert!(sql.contains("UPDATE Widgets\nSET name = @name, price = @price\nWHERE id = @id\n"));
        // identity is a parameter of the update proc
        assert!(sql.contains("CREATE PROCEDURE stp_Widgets_upd\n\t@id int ,\n\t@name varchar(50) ,"));
    }

    #[test]
    fn test_delete_by_identity_only() {
        let sql = generate_procedures(&widgets(), "").unwrap();
        assert!(sql.contains("CREATE PROCEDURE stp_Widgets_del\n\t@id int \nAS\nDELETE FROM Widgets\nWHERE id = @id\nGO\n"));
    }

    #[test]
    fn test_select_field_list() {
        let sql = generate_procedures(&widgets(), "").unwrap();
        assert!(sql.contains("SELECT name, price\nFROM Widgets\nWHERE id = @id\n"));
    }

    #[test]
    fn test_computed_columns_never_written() {
        let sql = generate_procedures(&widgets(), "").unwrap();
        assert!(!sql.contains("@total"));
        assert!(!sql.contains("total = "));
        assert!(!sql.contains("SELECT name, price, total"));
    }

    #[test]
    fn test_identity_never_in_insert_writable_lists() {
        let sql = generate_procedures(&widgets(), "").unwrap();
        assert!(!sql.contains("INSERT INTO Widgets (id"));
        assert!(!sql.contains("VALUES (@id"));
    }

    #[test]
    fn test_drop_guards_and_batch_separators() {
        let sql = generate_procedures(&widgets(), "").unwrap();
        for proc in ["stp_Widgets_ins", "stp_Widgets_upd", "stp_Widgets_del", "stp_Widgets_sel"] {
            assert!(sql.contains(&format!("DROP PROCEDURE IF EXISTS {proc}\nGO\n")));
        }
        assert_eq!(sql.matches("\nGO\n").count(), 8);
    }

    #[test]
    fn test_use_preamble() {
        let sql = generate_procedures(&widgets(), "Internal").unwrap();
        assert!(sql.starts_with("USE Internal\n\n-- ******** INSERT ********\n"));

        let bare = generate_procedures(&widgets(), "").unwrap();
        assert!(bare.starts_with("-- ******** INSERT ********\n"));
    }

    #[test]
    fn test_no_dangling_separators() {
        let sql = generate_procedures(&widgets(), "Internal").unwrap();
        assert!(!sql.contains(",,"));
        assert!(!sql.contains(", ,"));
        assert!(!sql.contains(",\nAS"));
        assert!(!sql.contains("( ,"));
        assert!(!sql.contains(", )"));
    }

    #[test]
    fn test_missing_identity_degenerates_to_empty_clauses() {
        let table = TableMetadata {
            name: "AuditLog".to_string(),
            columns: vec![
                column("entry", SqlType::VarChar, 200, 0, 1, false, false),
                column("at", SqlType::DateTime, 0, 0, 2, false, false),
            ],
        };
        let sql = generate_procedures(&table, "").unwrap();
        assert!(!sql.contains("WHERE"));
        assert!(!sql.contains("OUTPUT"));
        assert!(!sql.contains("SCOPE_IDENTITY"));
        assert!(sql.contains("INSERT INTO AuditLog (entry, at)\nVALUES (@entry, @at)\n"));
        assert!(sql.contains("UPDATE AuditLog\nSET entry = @entry, at = @at\nGO\n"));
    }

    #[test]
    fn test_computed_identity_stays_the_row_key() {
        let mut table = widgets();
        table.columns[0].is_computed = true;
        let sql = generate_procedures(&table, "").unwrap();

        // Still the key everywhere a key is used.
        assert!(sql.contains("CREATE PROCEDURE stp_Widgets_upd\n\t@id int ,\n\t@name varchar(50) ,"));
        assert!(sql.contains("UPDATE Widgets\nSET name = @name, price = @price\nWHERE id = @id\n"));
        assert!(sql.contains("DELETE FROM Widgets\nWHERE id = @id\n"));
        assert!(sql.contains("FROM Widgets\nWHERE id = @id\n"));
        assert!(sql.contains("\t@id int OUTPUT\n"));
        assert!(sql.contains("SET @id = SCOPE_IDENTITY()\n"));

        // Never a written value.
        assert!(!sql.contains("INSERT INTO Widgets (id"));
        assert!(!sql.contains("VALUES (@id"));
        assert!(!sql.contains("id = @id,"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let first = generate_procedures(&widgets(), "Internal").unwrap();
        let second = generate_procedures(&widgets(), "Internal").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_schema_is_refused() {
        let table = TableMetadata {
            name: "Nothing".to_string(),
            columns: vec![],
        };
        let err = generate_procedures(&table, "").unwrap_err();
        assert!(matches!(err, GenError::EmptySchema(_)));
    }
}
