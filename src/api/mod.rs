pub mod cli;
pub mod commands;

pub use cli::Cli;
pub use commands::execute;
