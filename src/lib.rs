pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod forge;
pub mod manifest;
pub mod orchestrator;
pub mod prune;
pub mod registry;
pub mod resolver;
pub mod shell;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
