use crate::ports::outbound::OutputPresenter;
use crate::shared::error::RocError;
use crate::shared::Result;
use std::fs;
use std::path::PathBuf;

/// FileSystemWriter adapter for presenting rendered output to a file
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        fs::write(&self.output_path, content).map_err(|e| {
            RocError::FileWriteError {
                path: self.output_path.clone(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

/// StdoutPresenter adapter for presenting rendered output to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        println!("{}", content);
        Ok(())
    }
}
