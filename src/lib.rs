// Library surface for the binary, headless runs and integration tests.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod comparator;
pub mod config;
pub mod error;
pub mod language;
pub mod logging;
pub mod passage;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod typing_policy;
pub mod ui;

pub use error::{KeyraceError, Result};
