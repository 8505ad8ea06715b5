use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Tour(#[from] ptour::TourError),

    #[error(transparent)]
    Page(#[from] ptour_harness::PageError),
}

impl CliError {
    /// Process exit status. Usage errors never get here: clap exits with 2.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Tour(_) | Self::Page(_) => 3,
            Self::Io(_) | Self::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliError;

    #[test]
    fn config_errors_share_an_exit_code() {
        let error = CliError::from(ptour::TourError::Validation(vec!["x".to_string()]));
        assert_eq!(error.exit_code(), 3);
        assert_eq!(error.to_string(), "invalid configuration: x");
    }

    #[test]
    fn io_errors_exit_with_one() {
        let error = CliError::from(std::io::Error::other("boom"));
        assert_eq!(error.exit_code(), 1);
    }
}
