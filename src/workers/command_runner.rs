use std::sync::Arc;
use std::time::Instant;
use futures::StreamExt;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::lifecycle_event::LifecycleEvent;
use crate::errors::{ReviewError, ReviewResult};
use crate::logger::animated_logger::AnimatedLogger;
use crate::logger::report_printer::ReportPrinter;
use crate::services::http_backend::HttpReviewBackend;
use crate::services::job_coordinator::{JobLifecycleCoordinator, Observation};
use crate::structs::config::config::Config;
use crate::structs::job_handle::JobHandle;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner {
    pub fn new() -> Self {
        Self {
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> ReviewResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Analyze { repo_url, pr_number, token, no_wait } => {
                self.analyze_command(&repo_url, pr_number, token, no_wait).await
            }
            Commands::Status { task_id } => self.status_command(&task_id).await,
            Commands::Show { task_id } => self.show_command(&task_id).await,
            Commands::List => self.list_command().await,
            Commands::Stats { local } => self.stats_command(local).await,
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::debug!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> ReviewResult<()> {
        log::info!("🚀 Initializing pr-review configuration...");

        match ConfigManager::create_sample_config() {
            Ok(path) => {
                log::info!("✅ Configuration file created at {}", path.display());
                log::info!("📝 Edit it to point at your review backend.");
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                return Err(e);
            }
        }

        Ok(())
    }

    fn load_config() -> ReviewResult<Config> {
        let config = ConfigManager::load().map_err(|e| {
            log::error!("❌ Failed to load configuration: {}", e);
            log::error!("💡 Run 'pr-review init' to create a configuration file.");
            e
        })?;
        ConfigManager::validate_config(&config)?;
        Ok(config)
    }

    fn coordinator(config: &Config) -> ReviewResult<JobLifecycleCoordinator> {
        let backend = HttpReviewBackend::from_config(&config.api)?;
        log::debug!("Using review backend at {}", config.api.base_url);
        Ok(JobLifecycleCoordinator::from_config(Arc::new(backend), config))
    }

    async fn analyze_command(&self, repo_url: &str, pr_number: u64, token: Option<String>, no_wait: bool) -> ReviewResult<()> {
        let config = Self::load_config()?;
        let coordinator = Self::coordinator(&config)?;

        let token = token.or_else(|| std::env::var(&config.api.github_token_env).ok());
        let handle = coordinator.submit(repo_url, pr_number, token).await?;
        println!("📝 Job id: {}", handle);

        if no_wait {
            log::info!("💡 Run 'pr-review status {}' to follow it.", handle);
            return Ok(());
        }

        let observation = coordinator.observe(handle.clone());
        let mut spinner = AnimatedLogger::new(format!("⏳ Reviewing {} #{}", repo_url, pr_number));
        spinner.start();

        match Self::wait_for_terminal(observation, &spinner).await {
            Some(LifecycleEvent::Resolved(record)) => {
                spinner.stop("Review complete").await;
                ReportPrinter::print_analysis_report(&record);
                Ok(())
            }
            Some(LifecycleEvent::Failed(reason)) => {
                spinner.error(&reason.to_string()).await;
                Err(ReviewError::job_failed(handle.task_id(), &reason.to_string()))
            }
            _ => {
                spinner.error("Cancelled").await;
                log::info!("💡 The job keeps running on the backend. Run 'pr-review show {}' later.", handle);
                Ok(())
            }
        }
    }

    /// Follows an observation until its terminal event. Ctrl-C cancels it and
    /// yields `None`.
    async fn wait_for_terminal(mut observation: Observation, spinner: &AnimatedLogger) -> Option<LifecycleEvent> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    log::info!("🛑 Cancelling observation of {}", observation.handle());
                    observation.cancel();
                    return None;
                }
                event = observation.next() => match event {
                    Some(LifecycleEvent::StatusChanged(status)) => {
                        spinner.set_message(format!("⏳ Job {} is {}", observation.handle(), status));
                    }
                    other => return other,
                }
            }
        }
    }

    async fn status_command(&self, task_id: &str) -> ReviewResult<()> {
        let config = Self::load_config()?;
        let coordinator = Self::coordinator(&config)?;

        let status = coordinator.status(&JobHandle::new(task_id)).await?;
        println!("📌 {}: {}", task_id, status);
        Ok(())
    }

    async fn show_command(&self, task_id: &str) -> ReviewResult<()> {
        let config = Self::load_config()?;
        let coordinator = Self::coordinator(&config)?;

        let mut spinner = AnimatedLogger::new(format!("⏳ Loading analysis {}", task_id));
        spinner.start();

        match coordinator.load_analysis(&JobHandle::new(task_id)).await {
            Ok(record) => {
                spinner.stop("Analysis loaded").await;
                ReportPrinter::print_analysis_report(&record);
                Ok(())
            }
            Err(e) => {
                spinner.error("Could not load analysis").await;
                Err(e)
            }
        }
    }

    async fn list_command(&self) -> ReviewResult<()> {
        let config = Self::load_config()?;
        let coordinator = Self::coordinator(&config)?;

        let summaries = coordinator.list_analyses().await?;
        ReportPrinter::print_analyses(&summaries);
        Ok(())
    }

    async fn stats_command(&self, local: bool) -> ReviewResult<()> {
        let config = Self::load_config()?;
        let coordinator = Self::coordinator(&config)?;

        let stats = if local {
            coordinator.compute_statistics().await?
        } else {
            coordinator.statistics().await?
        };
        ReportPrinter::print_statistics(&stats);
        Ok(())
    }
}
