//! Structured error types shared across GRB decay crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`DecayError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (offending values, indices, etc.).
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

/// Canonical error type for the decay model and its drivers.
///
/// Every failure is a caller error: bad parameters, a bad interval or an
/// exponent for which the closed-form integral does not exist. None of them
/// are retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DecayError {
    /// Invalid model parameters (non-positive timescale, non-finite values).
    #[error("parameter error: {0}")]
    Parameter(ErrorInfo),
    /// `t_index + 1 == 0`; the power-law antiderivative is undefined.
    #[error("degenerate exponent: {0}")]
    DegenerateExponent(ErrorInfo),
    /// Zero-duration, inverted or non-finite observation window.
    #[error("invalid interval: {0}")]
    InvalidInterval(ErrorInfo),
    /// Evaluation produced a non-finite value.
    #[error("domain error: {0}")]
    Domain(ErrorInfo),
    /// Batch inputs with inconsistent shapes.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// Configuration loading and validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
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

impl DecayError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DecayError::Parameter(info)
            | DecayError::DegenerateExponent(info)
            | DecayError::InvalidInterval(info)
            | DecayError::Domain(info)
            | DecayError::Shape(info)
            | DecayError::Config(info)
            | DecayError::Serde(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Returns a copy of the error with an extra context entry.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            DecayError::Parameter(info) => DecayError::Parameter(info.with_context(key, value)),
            DecayError::DegenerateExponent(info) => {
                DecayError::DegenerateExponent(info.with_context(key, value))
            }
            DecayError::InvalidInterval(info) => {
                DecayError::InvalidInterval(info.with_context(key, value))
            }
            DecayError::Domain(info) => DecayError::Domain(info.with_context(key, value)),
            DecayError::Shape(info) => DecayError::Shape(info.with_context(key, value)),
            DecayError::Config(info) => DecayError::Config(info.with_context(key, value)),
            DecayError::Serde(info) => DecayError::Serde(info.with_context(key, value)),
        }
    }
}
