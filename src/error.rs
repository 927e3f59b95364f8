use thiserror::Error;

/// Classifies list source errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListErrorKind {
    /// Required path or URL not configured
    NotConfigured,
    /// File open/read failure
    FileError,
    /// List content holds no usable rule
    InvalidData,
    /// Download or verification failure
    DownloadFailed,
}

/// Public suffix error types
#[derive(Error, Debug)]
pub enum PslError {
    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("No public suffix rule applies to: {0}")]
    UnknownSuffix(String),

    #[error("List error: {message}")]
    ListError {
        kind: ListErrorKind,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PslError {
    pub(crate) fn list(kind: ListErrorKind, message: impl Into<String>) -> Self {
        PslError::ListError {
            kind,
            message: message.into(),
        }
    }

    /// Returns the list error kind, if this is a list error.
    pub fn list_kind(&self) -> Option<ListErrorKind> {
        match self {
            PslError::ListError { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PslError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_error_kind_is_matchable() {
        let err = PslError::ListError {
            kind: ListErrorKind::DownloadFailed,
            message: "connection refused".into(),
        };
        match &err {
            PslError::ListError { kind, .. } => {
                assert!(matches!(kind, ListErrorKind::DownloadFailed));
            }
            _ => panic!("expected ListError"),
        }
    }

    #[test]
    fn test_list_kind_helper() {
        let err = PslError::list(ListErrorKind::InvalidData, "no rules");
        assert_eq!(err.list_kind(), Some(ListErrorKind::InvalidData));

        let err = PslError::UnknownSuffix("localhost".into());
        assert_eq!(err.list_kind(), None);
    }

    #[test]
    fn test_list_error_display_includes_message() {
        let err = PslError::list(ListErrorKind::FileError, "Failed to open list");
        let display = format!("{}", err);
        assert!(display.contains("Failed to open list"), "got: {}", display);
    }

    #[test]
    fn test_parse_error_at_line_display() {
        let err = PslError::ParseErrorAtLine {
            line: 3,
            message: "bad name".into(),
        };
        assert_eq!(format!("{}", err), "Parse error at line 3: bad name");
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> Result<()> {
            std::fs::File::open("/nonexistent/public_suffix_list.dat")?;
            Ok(())
        }
        assert!(matches!(open(), Err(PslError::IoError(_))));
    }
}
