pub mod bmad;
pub mod config;
pub mod error;
pub mod idea;
pub mod io;
pub mod paths;
pub mod speckit;
pub mod types;

pub use error::{BsrError, Result};
