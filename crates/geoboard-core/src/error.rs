//! Error types for board operations and collaborator calls.

use thiserror::Error;

/// Errors surfaced at the boundary between the board and its collaborators.
///
/// None of these are fatal to the interaction engine; they are reported to the
/// user as dismissable notices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    /// The AI solve or diagram generation call failed (network or parse error).
    #[error("AI request failed: {0}")]
    AiRequest(String),
    /// The remote compiler rejected the diagram markup.
    #[error("Diagram compilation failed: {message}")]
    Compile {
        message: String,
        /// Compiler log, when the service returned one.
        log: Option<String>,
    },
    /// The clipboard could not be read or holds no image.
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    /// Bytes that are not a PNG, JPEG or WebP image.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),
    /// A request of the same kind is already in flight.
    #[error("A request is already in progress")]
    Busy,
    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BoardError {
    /// Text shown to the user in a notice.
    pub fn notice(&self) -> String {
        match self {
            BoardError::Compile { message, log: Some(log) } => format!("{message}\n\n{log}"),
            other => other.to_string(),
        }
    }
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_notice_includes_log() {
        let err = BoardError::Compile {
            message: "pdflatex exited with 1".to_string(),
            log: Some("! Undefined control sequence.".to_string()),
        };
        let notice = err.notice();
        assert!(notice.starts_with("pdflatex exited with 1"));
        assert!(notice.contains("Undefined control sequence"));
    }

    #[test]
    fn test_notice_without_log_uses_display() {
        let err = BoardError::ClipboardUnavailable("permission denied".to_string());
        assert_eq!(err.notice(), "Clipboard unavailable: permission denied");
    }
}
