pub mod assets;
pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod frontend_env;
pub mod git;
pub mod orchestrator;
pub mod process;
pub mod project;
pub mod ui;

pub use error::{ReleaseError, Result};
