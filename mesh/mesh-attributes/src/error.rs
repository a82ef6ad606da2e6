//! Error types for attribute storage and conversion.

use thiserror::Error;

use crate::{AttributeDomain, AttributeType};

/// Result type for attribute operations.
pub type AttributeResult<T> = Result<T, AttributeError>;

/// Errors that can occur while storing, requesting or converting attributes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttributeError {
    /// No attribute with this name exists in any domain.
    #[error("attribute '{name}' not found")]
    NotFound {
        /// The requested attribute name.
        name: String,
    },

    /// The attribute length does not match the element count of its domain.
    #[error(
        "attribute '{name}' has {actual} values but the {domain} domain has {expected} elements"
    )]
    LengthMismatch {
        /// The attribute name.
        name: String,
        /// The domain the attribute is aligned to.
        domain: AttributeDomain,
        /// Element count of the domain.
        expected: usize,
        /// Number of values the attribute carries.
        actual: usize,
    },

    /// A typed access asked for a different kind than the attribute stores.
    #[error("attribute '{name}' stores {actual} values, not {expected}")]
    TypeMismatch {
        /// The attribute name.
        name: String,
        /// The kind the caller asked for.
        expected: AttributeType,
        /// The kind the attribute actually stores.
        actual: AttributeType,
    },

    /// A type name could not be parsed.
    #[error("unknown attribute type '{0}'")]
    UnknownType(String),

    /// A domain name could not be parsed.
    #[error("unknown attribute domain '{0}'")]
    UnknownDomain(String),
}
