use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

/// Progress indicator on stderr while a request is outstanding.
///
/// Hidden when stderr is not a terminal. Cleared on drop.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(TICKS)
            .template("{spinner} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Restarts a stopped spinner with a new message, e.g. between attempts.
    pub fn restart(&mut self, message: &str) {
        self.stop();
        *self = Self::new(message);
    }

    /// Clears the spinner. Calling it again is a no-op.
    pub fn stop(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}
