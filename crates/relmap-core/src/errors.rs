use relmap_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using RelmapError
pub type Result<T> = std::result::Result<T, RelmapError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the Relmap core. Each kind maps to a stable error code that can be
/// used for programmatic error handling and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidKey,
    DomainMismatch,

    // Integration
    Serialization,

    // Internal
    Internal,
}

impl RmErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            RmErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            RmErrorKind::InvalidKey => "ERR_INVALID_KEY",
            RmErrorKind::DomainMismatch => "ERR_DOMAIN_MISMATCH",
            RmErrorKind::Serialization => "ERR_SERIALIZATION",
            RmErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Provides a structured representation of errors with classification fields
/// for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct RmError {
    kind: RmErrorKind,
    op: Option<String>,
    domain: Option<String>,
    key: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl RmError {
    /// Create a new error with the specified kind
    pub fn new(kind: RmErrorKind) -> Self {
        Self {
            kind,
            op: None,
            domain: None,
            key: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add interning-domain context
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Add the offending key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> RmErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the interning-domain context, if any
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Get the offending key, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(domain) = &self.domain {
            write!(f, " (domain: {})", domain)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for RmError {}

// ========== End Error Facility ==========

/// Operational error taxonomy for Relmap model and delta operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelmapError {
    /// Empty holder key recorded into a relation map
    #[error("Empty holder key in relation map [{holder_tag}:{held_tag}]")]
    EmptyHolder { holder_tag: String, held_tag: String },

    /// Empty held key recorded into a relation map
    #[error("Empty held key in relation map [{holder_tag}:{held_tag}] under holder {holder}")]
    EmptyHeld {
        holder_tag: String,
        held_tag: String,
        holder: String,
    },

    /// Empty key recorded into a delta bucket
    #[error("Empty key recorded into {bucket} bucket")]
    EmptyKey { bucket: String },

    /// A comparison was issued with domains that do not match the delta's tags
    #[error("Domain mismatch: delta is tagged [{expected}], comparison used [{actual}]")]
    DomainMismatch { expected: String, actual: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from RelmapError to the canonical error facility
impl From<RelmapError> for RmError {
    fn from(err: RelmapError) -> Self {
        match err {
            RelmapError::EmptyHolder {
                holder_tag,
                held_tag,
            } => RmError::new(RmErrorKind::InvalidKey)
                .with_op("record")
                .with_domain(holder_tag)
                .with_message(format!("Empty holder key (held domain: {})", held_tag)),

            RelmapError::EmptyHeld {
                holder_tag: _,
                held_tag,
                holder,
            } => RmError::new(RmErrorKind::InvalidKey)
                .with_op("record")
                .with_domain(held_tag)
                .with_key(holder)
                .with_message("Empty held key"),

            RelmapError::EmptyKey { bucket } => RmError::new(RmErrorKind::InvalidKey)
                .with_op("record")
                .with_message(format!("Empty key recorded into {} bucket", bucket)),

            RelmapError::DomainMismatch { expected, actual } => {
                RmError::new(RmErrorKind::DomainMismatch)
                    .with_op("subtract")
                    .with_domain(expected)
                    .with_message(format!("Comparison used domain [{}]", actual))
            }

            RelmapError::Serialization { message } => {
                RmError::new(RmErrorKind::Serialization).with_message(message)
            }

            RelmapError::Internal { message } => {
                RmError::new(RmErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to RelmapError
impl From<serde_json::Error> for RelmapError {
    fn from(err: serde_json::Error) -> Self {
        RelmapError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (RmErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (RmErrorKind::InvalidKey, "ERR_INVALID_KEY"),
            (RmErrorKind::DomainMismatch, "ERR_DOMAIN_MISMATCH"),
            (RmErrorKind::Serialization, "ERR_SERIALIZATION"),
            (RmErrorKind::Internal, "ERR_INTERNAL"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_op_and_key() {
        let err = RmError::new(RmErrorKind::InvalidKey)
            .with_op("record")
            .with_key("holder-1")
            .with_message("Empty held key");
        let rendered = err.to_string();
        assert!(rendered.contains("ERR_INVALID_KEY"));
        assert!(rendered.contains("record"));
        assert!(rendered.contains("holder-1"));
    }

    #[test]
    fn test_domain_mismatch_converts_with_context() {
        let err = RelmapError::DomainMismatch {
            expected: "classes".to_string(),
            actual: "fields".to_string(),
        };
        let rm: RmError = err.into();
        assert_eq!(rm.kind(), RmErrorKind::DomainMismatch);
        assert_eq!(rm.domain(), Some("classes"));
    }
}
