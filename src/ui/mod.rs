//! User interface module - operator-facing progress output.
//!
//! The release pipeline is non-interactive, so this module only formats and
//! prints. `formatter` holds the individual display functions.

pub mod formatter;

pub use formatter::{
    display_command, display_error, display_prune, display_release_summary, display_status,
    display_success, display_warning,
};
