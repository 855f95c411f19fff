//! Error types for command invocation

use farm_client::ClientError;
use thiserror::Error;

/// Non-fatal problem noticed while binding parameters
///
/// Warnings are logged and returned with the result; strict binding turns
/// them into [`BindingError::Strict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingWarning {
    #[error("required parameter {param} was not supplied")]
    MissingRequired { param: &'static str },

    #[error("required parameter {param} was bound to null")]
    NullRequired { param: &'static str },

    #[error("{param} was supplied more than once; using --{winner} and ignoring --{ignored}")]
    ConflictingValues {
        param: &'static str,
        winner: String,
        ignored: String,
    },
}

/// Binding failed; nothing was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("{command} has no parameter named '{key}'")]
    UnknownParameter { command: &'static str, key: String },

    #[error("invalid value for {param}: expected {expected}, got '{value}'")]
    InvalidValue {
        param: &'static str,
        expected: String,
        value: String,
    },

    #[error("invalid output selector '{selector}' for {command}: {reason}")]
    InvalidSelector {
        command: &'static str,
        selector: String,
        reason: String,
    },

    /// A warning upgraded by strict binding
    #[error("{0}")]
    Strict(BindingWarning),
}

/// The response does not carry what the projection selected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("response of {operation} has no field {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("response of {operation} is not an object; select '*' to see it")]
    NotAnObject { operation: &'static str },
}

/// A command definition was rejected at registration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("command {0} is registered twice")]
    DuplicateCommand(&'static str),

    #[error("{command} declares '{key}' more than once among parameter names and aliases")]
    DuplicateParameter { command: &'static str, key: String },

    #[error("{command} has an invalid default selector: {reason}")]
    InvalidDefaultSelect { command: &'static str, reason: String },
}

/// Terminal failure of one invocation
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("could not create a client for {endpoint}: {source}")]
    ClientCreation {
        endpoint: String,
        #[source]
        source: ClientError,
    },

    #[error(
        "{operation}: unable to resolve or connect to endpoint {endpoint} (region {region}); \
         check the endpoint URL and network connectivity"
    )]
    NetworkResolution {
        operation: &'static str,
        endpoint: String,
        region: String,
        #[source]
        source: ClientError,
    },

    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
        #[source]
        source: ClientError,
    },

    #[error("{operation} was cancelled")]
    Cancelled { operation: &'static str },

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

impl InvocationError {
    /// The remote error behind a dispatch failure, if any
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::ClientCreation { source, .. }
            | Self::NetworkResolution { source, .. }
            | Self::Service { source, .. } => Some(source),
            _ => None,
        }
    }
}
