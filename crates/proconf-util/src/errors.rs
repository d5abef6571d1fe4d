use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for proconf operations outside the resolution engine.
#[derive(Debug, Error, Diagnostic)]
pub enum ProconfError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed registry manifest (e.g. Units.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Units.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid or unreadable configuration file (e.g. proconf.toml).
    #[error("Config error: {message}")]
    #[diagnostic(help("Check your proconf.toml for syntax errors"))]
    Config { message: String },

    /// A unit named on the command line or in a query is not registered.
    #[error("Unit not found: {id}")]
    UnitNotFound { id: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ProconfResult<T> = miette::Result<T>;
