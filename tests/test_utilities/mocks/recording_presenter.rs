use roc_dash::prelude::{OutputPresenter, Result};
use std::sync::{Arc, Mutex};

/// Presenter that records everything presented to it, for asserting on
/// render counts and rendered content.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    presented: Arc<Mutex<Vec<String>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> Vec<String> {
        self.presented.lock().unwrap().clone()
    }

    pub fn present_count(&self) -> usize {
        self.presented.lock().unwrap().len()
    }
}

impl OutputPresenter for RecordingPresenter {
    fn present(&self, content: &str) -> Result<()> {
        self.presented.lock().unwrap().push(content.to_string());
        Ok(())
    }
}
