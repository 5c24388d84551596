//! CLI for fetchkit.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fetchkit_core::config;

use commands::{run_bench, run_fetch, run_md5};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fetchkit")]
#[command(about = "fetchkit: sequential vs bounded URL fetching, and MD5 of http/ftp/file resources", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch HTTP(S) URLs and print their bodies in the order given.
    Fetch {
        /// URLs to fetch.
        #[arg(required = true, value_name = "URI")]
        uris: Vec<String>,
        /// Run up to N downloads at once (default: `max_concurrent` from config).
        #[arg(long, short = 'j', value_name = "N")]
        jobs: Option<usize>,
        /// Fetch one after another over a single connection instead.
        #[arg(long, conflicts_with = "jobs")]
        sequential: bool,
    },

    /// Print the MD5 of each http(s)://, ftp:// or file:// resource.
    Md5 {
        /// Resources to hash.
        #[arg(required = true, value_name = "URI")]
        uris: Vec<String>,
    },

    /// Fetch the same URLs sequentially and bounded, and compare timings.
    Bench {
        /// URLs to fetch.
        #[arg(required = true, value_name = "URI")]
        uris: Vec<String>,
        /// Concurrency bound for the bounded run (default: `max_concurrent` from config).
        #[arg(long, short = 'j', value_name = "N")]
        jobs: Option<usize>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                uris,
                jobs,
                sequential,
            } => run_fetch(&cfg, &uris, jobs, sequential).await?,
            CliCommand::Md5 { uris } => run_md5(&cfg, &uris).await?,
            CliCommand::Bench { uris, jobs } => run_bench(&cfg, &uris, jobs).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
