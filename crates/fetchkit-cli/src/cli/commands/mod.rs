//! CLI command handlers, one file per command.

mod bench;
mod fetch;
mod md5;

pub use bench::run_bench;
pub use fetch::run_fetch;
pub use md5::run_md5;
