pub mod commands;
pub mod core;
pub mod forms;
pub mod formatters;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
mod shell_context;

pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
