use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "people_count", "AZURE_AI_FOUNDRY_AGENT_NAME")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "pizza_estimator", "tool_dispatcher")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the pizza agent.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Invalid argument: {message}{}", format_context(.context))]
    InvalidArgument {
        message: String,
        context: ErrorContext,
    },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// The agent service sent something that does not match the tool-call contract.
    #[error("Protocol mismatch: {message}{}", format_context(.context))]
    ProtocolMismatch {
        message: String,
        context: ErrorContext,
    },

    #[error("Tool-call loop exceeded {rounds} rounds without a final answer")]
    LoopExceeded { rounds: u32 },

    #[error("Runtime error: {message}{}", format_context(.context))]
    Runtime {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Remote error: HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new invalid-argument error with structured context
    pub fn invalid_argument_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidArgument {
            message: msg.into(),
            context,
        }
    }

    /// Create a new protocol mismatch error with structured context
    pub fn protocol_mismatch_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::ProtocolMismatch {
            message: msg.into(),
            context,
        }
    }

    /// Create a new runtime error with structured context
    pub fn runtime_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Runtime {
            message: msg.into(),
            context,
        }
    }

    /// Stable snake_case name of the error category.
    ///
    /// Used in tool error payloads sent back to the agent service and in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration { .. } => "configuration_error",
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::UnknownTool { .. } => "unknown_tool",
            Error::ProtocolMismatch { .. } => "protocol_mismatch",
            Error::LoopExceeded { .. } => "loop_exceeded",
            Error::Runtime { .. } => "runtime_error",
            Error::Transport(_) => "transport_error",
            Error::Remote { .. } => "remote_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::InvalidArgument { context, .. }
            | Error::ProtocolMismatch { context, .. }
            | Error::Runtime { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_rendered_in_message() {
        let err = Error::invalid_argument_with_context(
            "people_count must be positive",
            ErrorContext::new()
                .with_field_path("people_count")
                .with_source("pizza_estimator"),
        );
        assert_eq!(
            err.to_string(),
            "Invalid argument: people_count must be positive (field: people_count, source: pizza_estimator)"
        );
        assert_eq!(err.kind(), "invalid_argument");
    }

    #[test]
    fn test_context_absent_for_unit_like_errors() {
        let err = Error::UnknownTool {
            name: "order_pizza".into(),
        };
        assert!(err.context().is_none());
        assert_eq!(err.kind(), "unknown_tool");
        assert_eq!(err.to_string(), "Unknown tool: order_pizza");
    }
}
