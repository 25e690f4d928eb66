use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Submit a pull request for review and wait for the result
    Analyze {
        /// Repository URL, e.g. https://github.com/owner/repo
        repo_url: String,
        pr_number: u64,
        /// GitHub token for private repositories
        #[clap(short, long)]
        token: Option<String>,
        /// Print the job id and exit without waiting
        #[clap(long)]
        no_wait: bool,
    },
    /// Query a job's status once
    Status {
        task_id: String,
    },
    /// Print a stored analysis
    Show {
        task_id: String,
    },
    /// List stored analyses
    List,
    /// Issue statistics across all analyses
    Stats {
        /// Aggregate on this machine instead of asking the backend
        #[clap(short, long)]
        local: bool,
    },
}
