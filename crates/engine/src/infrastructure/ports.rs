//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Reading the raw character payload (file or stdin)
//! - Writing the rendered stat block (file or stdout)

use serde_json::Value;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// Reading or writing failed - includes the target for actionable messages.
    #[error("I/O error on {target}: {message}")]
    Io { target: String, message: String },

    /// The payload was not valid JSON, or a document could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PortError {
    pub fn io(target: impl ToString, message: impl ToString) -> Self {
        Self::Io {
            target: target.to_string(),
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

// =============================================================================
// Ports
// =============================================================================

/// Where raw character payloads come from.
#[cfg_attr(test, mockall::automock)]
pub trait PayloadSource: Send + Sync {
    /// Load the payload document. An empty input loads as `null`.
    fn load(&self) -> Result<Value, PortError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Where rendered stat blocks go.
#[cfg_attr(test, mockall::automock)]
pub trait StatBlockSink: Send + Sync {
    fn write(&self, rendered: &str) -> Result<(), PortError>;
}
