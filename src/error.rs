use miette::Diagnostic;
use thiserror::Error;

/// Main error type for retint operations
#[derive(Error, Diagnostic, Debug)]
pub enum RetintError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(retint::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(retint::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Selection error: {message}")]
    #[diagnostic(code(retint::selection))]
    Selection {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(retint::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, RetintError>;

/// Failure reading or writing a single scene node.
///
/// These never escape a scan or apply call; the engines count them as
/// `failed` and keep walking.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("node is locked")]
    Locked,

    #[error("node has been removed from the document")]
    Removed,
}
