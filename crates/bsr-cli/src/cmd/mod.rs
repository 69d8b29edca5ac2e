pub mod bmad;
pub mod config;
pub mod idea;
pub mod spec;

use bsr_core::error::BsrError;

/// Render collected pipeline errors as plain messages.
pub fn messages(errors: &[BsrError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
