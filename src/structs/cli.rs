use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "pr-review")]
#[clap(about = "Submit pull requests for automated code review and inspect the results", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
