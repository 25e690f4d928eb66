use std::io::Write;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use crate::config::constants::{sleep_duration_millis, SPINNER_FRAME_INTERVAL_MS};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner on stderr. The message can change while it spins.
pub struct AnimatedLogger {
    message: watch::Sender<String>,
    spinning: Option<(CancellationToken, JoinHandle<()>)>,
}

impl AnimatedLogger {
    pub fn new(message: String) -> Self {
        Self {
            message: watch::channel(message).0,
            spinning: None,
        }
    }

    pub fn start(&mut self) {
        let cancel = CancellationToken::new();
        let stopped = cancel.clone();
        let message = self.message.subscribe();

        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(sleep_duration_millis(SPINNER_FRAME_INTERVAL_MS));
            for frame in FRAMES.iter().cycle() {
                tokio::select! {
                    _ = stopped.cancelled() => break,
                    _ = ticks.tick() => draw(&frame_line(&message.borrow(), frame)),
                }
            }
        });

        self.spinning = Some((cancel, task));
    }

    pub fn set_message(&self, message: String) {
        self.message.send_replace(message);
    }

    pub async fn stop(&mut self, final_message: &str) {
        self.finish("✅ ", final_message).await;
    }

    pub async fn error(&mut self, error_message: &str) {
        self.finish("❌", error_message).await;
    }

    async fn finish(&mut self, symbol: &str, text: &str) {
        if let Some((cancel, task)) = self.spinning.take() {
            cancel.cancel();
            let _ = task.await;
        }
        draw(&format!("{} {}\n", symbol, text));
    }
}

fn frame_line(text: &str, frame: &str) -> String {
    format!("{} {} ", text, frame)
}

/// Overwrites the current stderr line.
fn draw(line: &str) {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "\r\x1b[K{}", line);
    let _ = stderr.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_line_puts_the_frame_after_the_message() {
        assert_eq!(frame_line("⏳ Job t1 is STARTED", FRAMES[0]), "⏳ Job t1 is STARTED ⠋ ");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_joins_the_spinner_task() {
        let mut spinner = AnimatedLogger::new("working".to_string());
        spinner.start();
        assert!(spinner.spinning.is_some());

        spinner.set_message("still working".to_string());
        tokio::time::sleep(sleep_duration_millis(SPINNER_FRAME_INTERVAL_MS * 3)).await;
        assert_eq!(*spinner.message.borrow(), "still working");

        spinner.stop("done").await;
        assert!(spinner.spinning.is_none());

        // A second stop has nothing left to join.
        spinner.error("again").await;
        assert!(spinner.spinning.is_none());
    }
}
