use thiserror::Error;

/// Errors raised by the step itself rather than by the process it runs
#[derive(Debug, Error)]
pub enum ActionError {
    /// The action does not handle remote commands
    #[error("remote command '{0}' is not supported by this action")]
    NotSupported(String),

    /// A configuration field failed validation
    #[error("invalid configuration: {0}")]
    Validation(String),
}
