//! CLI command handlers. Each command is in its own file.

mod config;
mod count;

pub use config::run_config;
#[cfg(test)]
pub use count::count_stream;
pub use count::{run_count, CountSettings};
