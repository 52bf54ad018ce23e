#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

/// Allow normal error handling from the definitions crate
pub use sidecat_definitions::{Error, ErrorKind, Result, ResultExt};

/// Re-export the injection primitives for host side composition
pub use sidecat_definitions::{inject, structs, ConfigKey, InjectionConfig};

/// Template loading, config merging and rendering
pub mod enrich;
