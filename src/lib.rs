pub mod cli;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod converters;
pub mod error;
pub mod loader;
pub mod models;
pub mod synthesis;
pub mod telemetry;

pub use compiler::{compile, compile_with_hint};
pub use config::TestPlanConfig;
pub use error::{CompileError, Result};
pub use loader::SpecEncoding;
pub use models::TestPlanDocument;
