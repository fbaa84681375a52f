use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

/// StderrProgressReporter adapter for the fetch-cycle progress seam.
///
/// Writes narration to stderr so rendered frames on stdout stay clean,
/// and shows an indicatif bar while the metric batch is in flight. The
/// bar is created lazily on the first progress tick and torn down by the
/// completion or error report, so non-batch narration never flickers it.
pub struct StderrProgressReporter {
    fetch_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            fetch_bar: RefCell::new(None),
        }
    }

    fn bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.fetch_bar.borrow_mut();
        slot.get_or_insert_with(|| {
            ProgressBar::new(total as u64).with_style(
                ProgressStyle::default_bar()
                    .template("   {spinner:.green} [{bar:32.cyan/blue}] {pos}/{len} metrics - {msg}")
                    .expect("Failed to set progress bar template")
                    .progress_chars("=>-"),
            )
        })
        .clone()
    }

    fn clear_bar(&self) {
        if let Some(bar) = self.fetch_bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let bar = self.bar(total);
        bar.set_position(current as u64);
        if let Some(msg) = message {
            bar.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.clear_bar();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.clear_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}
