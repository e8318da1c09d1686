//! This module defines traits for external dependencies (the configuration file and the Google Maps APIs)
//! to make them easier to mock and substitute in tests. By abstracting external services behind traits,
//! commands can be decoupled from them and have their dependencies injected.
pub mod maps;
pub mod store;

pub use maps::*;
pub use store::*;
