//! Default configuration values - single source of truth

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Default database name, used for the `USE` preamble and the class namespace
pub const DATABASE: &str = "Internal";

/// Whether to generate procedure source by default
pub const GENERATE_PROCS: bool = true;

/// Whether to generate class source by default
pub const GENERATE_CLASS: bool = true;

/// Default output directory for procedure source
pub const OUTPUT_PROCS_DIR: &str = "./generated/procs";

/// Default output directory for class source
pub const OUTPUT_CLASS_DIR: &str = "./generated/classes";

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
