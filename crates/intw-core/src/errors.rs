//! Structured error types shared across the intertwiner crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`IntwError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (primes, dimensions, bit lengths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the intertwiner workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum IntwError {
    /// Caller supplied inconsistent inputs (fields, shapes, generator counts).
    #[error("precondition violated: {0}")]
    Precondition(ErrorInfo),
    /// No usable prime or reduction could be found.
    #[error("numeric degeneracy: {0}")]
    Degeneracy(ErrorInfo),
    /// An iteration or wall-clock bound was exhausted before a verified answer.
    #[error("bound exceeded: {0}")]
    BoundExceeded(ErrorInfo),
    /// Exact arithmetic hit an impossible operation.
    #[error("arithmetic error: {0}")]
    Arithmetic(ErrorInfo),
    /// Serialization and IO errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl IntwError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            IntwError::Precondition(info)
            | IntwError::Degeneracy(info)
            | IntwError::BoundExceeded(info)
            | IntwError::Arithmetic(info)
            | IntwError::Serde(info) => info,
        }
    }

    /// Shorthand for a [`IntwError::Precondition`] with code and message.
    pub fn precondition(code: &str, message: impl Into<String>) -> Self {
        IntwError::Precondition(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`IntwError::Arithmetic`] with code and message.
    pub fn arithmetic(code: &str, message: impl Into<String>) -> Self {
        IntwError::Arithmetic(ErrorInfo::new(code, message))
    }
}
