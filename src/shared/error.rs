use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems and wrapper scripts to distinguish
/// between different types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - at least one widget rendered with data
    Success = 0,
    /// Every widget degraded to "no visibility" (data source unreachable or empty)
    NoVisibility = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (source configuration, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NoVisibility => write!(f, "No Visibility (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the dashboard engine.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum RocError {
    #[error("No metric source configured\n\n💡 Hint: {suggestion}")]
    NoSourceConfigured { suggestion: String },

    #[error("Invalid metric directory: {path}\nReason: {reason}\n\n💡 Hint: Please specify a directory containing *.30d.json metric documents")]
    InvalidDataDir { path: PathBuf, reason: String },

    #[error("Failed to parse config file: {path}\nDetails: {details}\n\n💡 Hint: Ensure the file contains valid YAML syntax")]
    ConfigParseError { path: PathBuf, details: String },

    #[error("Invalid config: {message}")]
    ConfigValidation { message: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::NoVisibility.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::NoVisibility), "No Visibility (1)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_no_source_configured_display() {
        let error = RocError::NoSourceConfigured {
            suggestion: "Pass --data-dir or --url".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("No metric source configured"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Pass --data-dir or --url"));
    }

    #[test]
    fn test_invalid_data_dir_display() {
        let error = RocError::InvalidDataDir {
            path: PathBuf::from("/nonexistent"),
            reason: "Directory does not exist".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid metric directory"));
        assert!(display.contains("/nonexistent"));
        assert!(display.contains("Directory does not exist"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = RocError::FileWriteError {
            path: PathBuf::from("/test/output.json"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/output.json"));
        assert!(display.contains("Permission denied"));
    }
}
