//! Generator error taxonomy
//!
//! Every variant is fatal: the generator either emits a complete module or
//! nothing at all. Diagnostics carry the offending property or category name.

use thiserror::Error;

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// A fatal generation error. There is no recoverable-error path and no
/// partial output.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The input is not syntactically valid JSON. Structural problems inside
    /// well-formed JSON are reported as [`CodegenError::MalformedSpec`] so
    /// the diagnostic can name the offending property or category.
    #[error("style spec is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input parsed, but its shape is not a style spec.
    #[error("style spec is malformed: {detail}")]
    MalformedSpec { detail: String },

    /// A category named in the `layout` or `paint` list has no matching
    /// descriptor object in the document.
    #[error("category '{category}' is listed but has no descriptor object in the spec")]
    MissingCategory { category: String },

    /// A descriptor's declared kind, or an enumeration's value set, is not
    /// recognised.
    #[error("property '{property}': unrecognised type '{kind}'")]
    UnknownType { property: String, kind: String },

    /// Constant-valued properties cannot be bound.
    #[error("property '{property}': constant properties cannot be bound")]
    UnsupportedProperty { property: String },

    /// A `requires` entry matches none of the four predicate shapes.
    #[error("property '{property}': unrecognised requirement predicate")]
    MalformedRequirement { property: String },

    /// Two descriptors in one category resolve to the same generated
    /// identifier, or a descriptor shadows a general attribute.
    #[error("category '{category}': identifier '{ident}' generated by '{second}' collides with '{first}'")]
    IdentifierCollision {
        category: String,
        ident: String,
        first: String,
        second: String,
    },
}
