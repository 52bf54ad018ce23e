#![recursion_limit = "1024"]
#![allow(non_snake_case)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        SerdeY(serde_yaml::Error);
        SerdeJ(serde_json::Error);
    }
    errors {
        InvalidInjectionConfig(key: String) {
            description("invalid injection config")
            display("invalid injection config value for '{}'", key)
        }
    }
}

/// Abbreviated kubernetes pod template model
pub mod structs;

/// Injection tunables with defaults
pub mod config;
pub use crate::config::{ConfigKey, InjectionConfig};

/// The istio sidecar injector
pub mod inject;
pub use crate::inject::inject;
