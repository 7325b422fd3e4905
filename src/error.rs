use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    #[error("invalid notification mode: {0} (possible values: system, custom)")]
    InvalidMode(String),

    /// No display surface is attached yet, or it was detached on dispose.
    #[error("no display surface attached")]
    SurfaceUnavailable,

    #[error("display error: {0}")]
    Display(String),

    #[error("{0} is disabled in the config")]
    FeatureDisabled(&'static str),
}

pub type Result<T> = std::result::Result<T, RemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_lists_possible_values() {
        let err = RemError::InvalidMode("toast".to_string());
        assert_eq!(
            err.to_string(),
            "invalid notification mode: toast (possible values: system, custom)"
        );
    }

    #[test]
    fn test_feature_disabled_message() {
        let err = RemError::FeatureDisabled("history");
        assert_eq!(err.to_string(), "history is disabled in the config");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: RemError = io.into();
        assert!(matches!(err, RemError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
