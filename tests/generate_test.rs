//! End-to-end generation through the public API

use std::fs;

use sprocgen::{generate_table, GenConfig, GeneratorBuilder};

const WIDGETS_SNAPSHOT: &str = r#"
[[table]]
name = "Widgets"

[[table.column]]
name = "id"
data_type = "int"
identity = true

[[table.column]]
name = "name"
data_type = "varchar"
max_length = 50

[[table.column]]
name = "price"
data_type = "decimal"
max_length = 10
precision = 2

[[table.column]]
name = "total"
data_type = "int"
computed = true
"#;

fn widgets_config(dir: &tempfile::TempDir) -> GenConfig {
    let schema_path = dir.path().join("catalog.toml");
    fs::write(&schema_path, WIDGETS_SNAPSHOT).unwrap();

    GeneratorBuilder::new(&schema_path)
        .database("Internal")
        .output_dir(dir.path().join("generated"))
        .into_config()
}

#[test]
fn generates_both_artifacts_from_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config = widgets_config(&dir);

    sprocgen::generate(&config).unwrap();

    let sql = fs::read_to_string(dir.path().join("generated/procs/CREATE_Widgets.sql")).unwrap();
    let cs = fs::read_to_string(dir.path().join("generated/classes/Widgets.cs")).unwrap();

    // procedure side
    assert!(sql.starts_with("USE Internal\n"));
    assert!(sql.contains("DROP PROCEDURE IF EXISTS stp_Widgets_ins\nGO"));
    assert!(sql.contains("\t@name varchar(50) ,\n\t@price decimal(10, 2) ,\n\t@id int OUTPUT"));
    assert!(sql.contains("SELECT name, price\nFROM Widgets\nWHERE id = @id"));
    assert!(!sql.contains("@total"));

    // class side
    assert!(cs.contains("namespace Internal"));
    assert!(cs.contains("public class Widgets"));
    assert!(cs.contains("if (id > 0)"));
    assert!(cs.contains("new SqlCommand(\"stp_Widgets_sel\", conn)"));
}

#[test]
fn generate_table_returns_artifacts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = widgets_config(&dir);

    let artifacts = generate_table(&config, "Widgets").unwrap();
    assert!(artifacts.procedures.contains("stp_Widgets_upd"));
    assert!(artifacts.class.contains("loadFromRow"));

    assert!(!dir.path().join("generated").exists());
}

#[test]
fn unknown_table_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = widgets_config(&dir);

    let err = generate_table(&config, "Gadgets").unwrap_err();
    assert!(err.to_string().contains("Gadgets"));
}

#[test]
fn generates_from_ddl_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.sql");
    fs::write(
        &schema_path,
        r#"
        CREATE TABLE Orders (
            id INT AUTO_INCREMENT PRIMARY KEY,
            customer VARCHAR(80) NOT NULL,
            placed_at DATETIME NOT NULL
        );
        "#,
    )
    .unwrap();

    let config = GeneratorBuilder::new(&schema_path)
        .database("Internal")
        .output_dir(dir.path().join("generated"))
        .into_config();

    sprocgen::generate(&config).unwrap();

    let sql = fs::read_to_string(dir.path().join("generated/procs/CREATE_Orders.sql")).unwrap();
    assert!(sql.contains("CREATE PROCEDURE stp_Orders_ins\n\t@customer varchar(80) ,\n\t@placed_at datetime ,\n\t@id int OUTPUT"));
    assert!(sql.contains("WHERE id = @id"));

    let cs = fs::read_to_string(dir.path().join("generated/classes/Orders.cs")).unwrap();
    assert!(cs.contains("public DateTime placed_at { get; set; }"));
    assert!(cs.contains("placed_at = Convert.ToDateTime(row[\"placed_at\"].ToString());"));
}

#[test]
fn outputs_are_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = widgets_config(&dir);

    let first = generate_table(&config, "Widgets").unwrap();
    let second = generate_table(&config, "Widgets").unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_table_refuses_to_generate() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("catalog.toml");
    fs::write(&schema_path, "[[table]]\nname = \"Empty\"\n").unwrap();

    let config = GeneratorBuilder::new(&schema_path)
        .output_dir(dir.path().join("generated"))
        .into_config();

    let err = sprocgen::generate(&config).unwrap_err();
    assert!(matches!(err, sprocgen::GenError::EmptySchema(_)));
}

#[test]
fn procs_only_skips_class_output() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("catalog.toml");
    fs::write(&schema_path, WIDGETS_SNAPSHOT).unwrap();

    let config = GeneratorBuilder::new(&schema_path)
        .database("Internal")
        .output_dir(dir.path().join("generated"))
        .procs_only()
        .into_config();

    sprocgen::generate(&config).unwrap();

    assert!(dir.path().join("generated/procs/CREATE_Widgets.sql").exists());
    assert!(!dir.path().join("generated/classes/Widgets.cs").exists());
}
