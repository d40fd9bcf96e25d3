//! Class generator
//!
//! Emits the C# record-access class for a table: one auto-property per
//! column, a constructor seeding defaults, and Save/Insert/Update/Delete/Load
//! methods that call the generated stored procedures by their deterministic
//! names.

use crate::catalog::TableMetadata;
use crate::error::{GenError, Result};

use super::naming::{proc_name, to_class_name, Operation};
use super::type_mapper::{class_type, default_literal, row_assignment};

/// Generate the full class source for a table. Section order is fixed:
/// header, properties, constructor, Save, Insert, Update, addParameters,
/// Delete, Load, loadFromRow, connection footer.
pub fn generate_class(table: &TableMetadata, namespace: &str) -> Result<String> {
    if table.columns.is_empty() {
        return Err(GenError::EmptySchema(table.name.clone()));
    }

    let mut out = String::new();
    header(&mut out, table, namespace);
    properties(&mut out, table);
    constructor(&mut out, table);
    save(&mut out, table);
    insert(&mut out, table);
    update(&mut out, table);
    add_parameters(&mut out, table);
    delete(&mut out, table);
    load(&mut out, table);
    load_from_row(&mut out, table);
    footer(&mut out, namespace);
    Ok(out)
}

/// Push one line at the given tab depth.
fn pp(out: &mut String, tabs: usize, text: &str) {
    for _ in 0..tabs {
        out.push('\t');
    }
    out.push_str(text);
    out.push('\n');
}

/// `/// <summary>` block preceding a generated method
fn summary(out: &mut String, tabs: usize, text: &str) {
    pp(out, tabs, "/// <summary>");
    pp(out, tabs, &format!("/// {text}"));
    pp(out, tabs, "/// </summary>");
}

/// Name of the identity field, or empty when the table has none; callers
/// of the generated class must treat identity-less output as unsafe.
fn identity_name(table: &TableMetadata) -> String {
    table
        .identity_column()
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

fn header(out: &mut String, table: &TableMetadata, namespace: &str) {
    out.push_str("using System;\n");
    out.push_str("using System.Collections.Generic;\n");
    out.push_str("using System.Data;\n");
    out.push_str("using System.Data.SqlClient;\n\n");

    out.push_str(&format!("namespace {namespace}\n{{\n"));

    pp(out, 1, "/// <summary>");
    pp(
        out,
        1,
        &format!(
            "/// Record access for the {} table: fields mirror the columns and",
            table.name
        ),
    );
    pp(out, 1, "/// Save/Load/Delete call the generated stored procedures.");
    pp(out, 1, "/// </summary>");

    pp(out, 1, &format!("public class {}", to_class_name(&table.name)));
    pp(out, 1, "{");
}

fn properties(out: &mut String, table: &TableMetadata) {
    for col in &table.columns {
        pp(
            out,
            2,
            &format!("public {} {} {{ get; set; }}", class_type(col), col.name),
        );
    }
    out.push('\n');
}

fn constructor(out: &mut String, table: &TableMetadata) {
    pp(out, 2, &format!("public {}()", to_class_name(&table.name)));
    pp(out, 2, "{");
    // Identity stays at the language zero value so Save picks the insert
    // path; computed fields are never seeded by client code.
    for col in &table.columns {
        if !col.is_identity && !col.is_computed {
            pp(out, 3, &format!("{} = {};", col.name, default_literal(col)));
        }
    }
    pp(out, 2, "}");
    out.push('\n');
}

fn save(out: &mut String, table: &TableMetadata) {
    let identity = identity_name(table);

    summary(out, 2, "Save() decides whether to call Insert or Update.");
    pp(out, 2, "public int Save()");
    pp(out, 2, "{");
    pp(out, 3, "int iReturn = 0;");
    pp(out, 3, &format!("if ({identity} > 0)"));
    pp(out, 3, "{");
    pp(out, 4, "Update();");
    pp(out, 4, &format!("iReturn = {identity};"));
    pp(out, 3, "}");
    pp(out, 3, "else");
    pp(out, 4, "iReturn = Insert();");
    pp(out, 3, "return iReturn;");
    pp(out, 2, "}");
    out.push('\n');
}

fn insert(out: &mut String, table: &TableMetadata) {
    let proc = proc_name(&table.name, Operation::Insert);

    pp(out, 2, "private int Insert()");
    pp(out, 2, "{");
    pp(out, 3, "int iReturn = 0;");
    pp(out, 3, "SqlConnection conn = getConnection();");
    pp(out, 3, "conn.Open();");
    pp(out, 3, &format!("SqlCommand cmd = new SqlCommand(\"{proc}\", conn);"));
    pp(out, 3, "cmd.CommandType = CommandType.StoredProcedure;");
    out.push('\n');
    pp(out, 3, "addParameters(cmd, false);");
    out.push('\n');
    pp(out, 3, "iReturn = Convert.ToInt32(cmd.ExecuteScalar());");
    pp(out, 3, "return iReturn;");
    pp(out, 2, "}");
    out.push('\n');
}

fn update(out: &mut String, table: &TableMetadata) {
    let proc = proc_name(&table.name, Operation::Update);

    pp(out, 2, "private int Update()");
    pp(out, 2, "{");
    pp(out, 3, "int iReturn = 0;");
    pp(out, 3, "SqlConnection conn = getConnection();");
    pp(out, 3, "conn.Open();");
    pp(out, 3, &format!("SqlCommand cmd = new SqlCommand(\"{proc}\", conn);"));
    pp(out, 3, "cmd.CommandType = CommandType.StoredProcedure;");
    out.push('\n');
    pp(out, 3, "addParameters(cmd, true);");
    out.push('\n');
    pp(out, 3, "cmd.ExecuteNonQuery();");
    pp(out, 3, "return iReturn;");
    pp(out, 2, "}");
    out.push('\n');
}

fn add_parameters(out: &mut String, table: &TableMetadata) {
    let identity = identity_name(table);

    pp(out, 2, "private void addParameters(SqlCommand cmd, bool isUpdate = false)");
    pp(out, 2, "{");
    // Insert mode skips the identity: the procedure supplies it as output.
    pp(out, 3, "if (isUpdate)");
    pp(
        out,
        4,
        &format!("cmd.Parameters.AddWithValue(\"@{identity}\", {identity});"),
    );
    for col in table.writable_columns() {
        pp(
            out,
            3,
            &format!("cmd.Parameters.AddWithValue(\"@{}\", {});", col.name, col.name),
        );
    }
    pp(out, 2, "}");
    out.push('\n');
}

fn delete(out: &mut String, table: &TableMetadata) {
    let proc = proc_name(&table.name, Operation::Delete);
    let identity = identity_name(table);

    pp(out, 2, "public void Delete()");
    pp(out, 2, "{");
    pp(out, 3, "SqlConnection conn = getConnection();");
    pp(out, 3, "conn.Open();");
    pp(out, 3, &format!("SqlCommand cmd = new SqlCommand(\"{proc}\", conn);"));
    pp(out, 3, "cmd.CommandType = CommandType.StoredProcedure;");
    out.push('\n');
    pp(
        out,
        3,
        &format!("cmd.Parameters.AddWithValue(\"@{identity}\", {identity});"),
    );
    pp(out, 3, "cmd.ExecuteNonQuery();");
    pp(out, 2, "}");
    out.push('\n');
}

fn load(out: &mut String, table: &TableMetadata) {
    let proc = proc_name(&table.name, Operation::Select);
    let identity = identity_name(table);

    summary(out, 2, "Load() fills the fields from the row matching the identity key.");
    pp(out, 2, "public bool Load()");
    pp(out, 2, "{");
    pp(out, 3, "bool bResult = false;");
    pp(out, 3, "SqlConnection conn = getConnection();");
    pp(out, 3, "conn.Open();");
    pp(out, 3, &format!("SqlCommand cmd = new SqlCommand(\"{proc}\", conn);"));
    pp(out, 3, "cmd.CommandType = CommandType.StoredProcedure;");
    pp(
        out,
        3,
        &format!("cmd.Parameters.AddWithValue(\"@{identity}\", {identity});"),
    );
    out.push('\n');
    pp(out, 3, "DataTable dt = new DataTable();");
    pp(out, 3, "dt.Load(cmd.ExecuteReader());");
    pp(out, 3, "if (dt.Rows.Count > 0)");
    pp(out, 4, "bResult = loadFromRow(dt.Rows[0]);");
    pp(out, 3, "conn.Close();");
    pp(out, 3, "return bResult;");
    pp(out, 2, "}");
    out.push('\n');
}

fn load_from_row(out: &mut String, table: &TableMetadata) {
    pp(out, 2, "public bool loadFromRow(DataRow row)");
    pp(out, 2, "{");
    pp(out, 3, "bool bResult = false;");
    out.push('\n');
    for col in &table.columns {
        pp(out, 3, &row_assignment(col));
    }
    out.push('\n');
    pp(out, 3, "bResult = true;");
    pp(out, 3, "return bResult;");
    pp(out, 2, "}");
    out.push('\n');
}

fn footer(out: &mut String, namespace: &str) {
    pp(out, 2, "public SqlConnection getConnection()");
    pp(out, 2, "{");
    pp(
        out,
        3,
        &format!("SqlConnection conn = Database.getSqlConnection(\"{namespace}\");"),
    );
    pp(out, 3, "return conn;");
    pp(out, 2, "}");
    pp(out, 1, "}");
    out.push_str("}\n");
}
