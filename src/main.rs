//! CLI entry point for sprocgen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sprocgen::config::GenConfig;

#[derive(Parser)]
#[command(name = "sprocgen")]
#[command(about = "Generate T-SQL stored procedures and C# record-access classes from table metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the schema file: TOML catalog snapshot or .sql DDL (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output directory (overrides config, sets both procs and classes output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Database name for the USE preamble and class namespace (overrides config)
    #[arg(short, long)]
    database: Option<String>,

    /// Generate for a single table only
    #[arg(short, long)]
    table: Option<String>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate all (procedures and classes)
    Generate,
    /// Generate only procedure source
    Procs,
    /// Generate only class source
    Class,
    /// Inspect schema (show parsed tables for debugging)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = if let Some(config_path) = &cli.config {
        GenConfig::from_file(config_path)?
    } else {
        GenConfig::default()
    };

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.schema_file = schema;
    }
    if let Some(output) = cli.output {
        config.output_procs_dir = output.join("procs");
        config.output_class_dir = output.join("classes");
    }
    if let Some(database) = cli.database {
        config.database = database;
    }
    if let Some(table) = cli.table {
        config.include_tables = table;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Apply command-specific settings
    match &cli.command {
        Some(Commands::Procs) => {
            config.generate_class = false;
        }
        Some(Commands::Class) => {
            config.generate_procs = false;
        }
        Some(Commands::Inspect) => {
            return inspect_schema(&config);
        }
        _ => {}
    }

    // Validate configuration
    config.validate()?;

    info!("Generating artifacts from schema: {:?}", config.schema_file);

    if config.dry_run {
        println!("Dry run mode - would generate:");
        let provider = sprocgen::catalog::provider_for_path(&config.schema_file)?;
        for table in &provider.tables()? {
            if config.generate_procs {
                println!(
                    "  Procs: {}/CREATE_{}.sql",
                    config.output_procs_dir.display(),
                    table.name
                );
            }
            if config.generate_class {
                println!(
                    "  Class: {}/{}.cs",
                    config.output_class_dir.display(),
                    sprocgen::codegen::to_class_name(&table.name)
                );
            }
        }
        return Ok(());
    }

    sprocgen::generate(&config)?;

    info!("Generation completed successfully");
    Ok(())
}

fn inspect_schema(config: &GenConfig) -> Result<()> {
    let provider = sprocgen::catalog::provider_for_path(&config.schema_file)?;
    let tables = provider.tables()?;

    println!("Parsed {} tables:\n", tables.len());
    for table in &tables {
        println!("Table: {}", table.name);
        println!("  Columns:");
        for col in &table.columns {
            let mut flags = String::new();
            if col.is_identity {
                flags.push_str(" IDENTITY");
            }
            if col.is_computed {
                flags.push_str(" COMPUTED");
            }
            let size = if col.precision > 0 {
                format!("({}, {})", col.max_length, col.precision)
            } else if col.max_length > 0 {
                format!("({})", col.max_length)
            } else {
                String::new()
            };
            println!(
                "    {:>3}. {} {}{}{}",
                col.position,
                col.name,
                col.data_type.sql_name(),
                size,
                flags
            );
        }
        match table.identity_column() {
            Some(id) => println!("  Row key: {}", id.name),
            None => println!("  Row key: none (update/delete will have no WHERE clause)"),
        }
        println!();
    }

    Ok(())
}
