//! Table metadata model and the providers that load it

mod ddl;
mod metadata;
mod provider;
mod snapshot;

pub use ddl::*;
pub use metadata::*;
pub use provider::*;
pub use snapshot::*;
