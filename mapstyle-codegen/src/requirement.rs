//! Requirement Renderer
//!
//! Cross-property validity constraints arrive as a small predicate language
//! (`requires` entries) and are rendered into documentation prose. Every
//! referenced token passes through the identifier transformer so the prose
//! matches the generated identifiers exactly.

use serde_json::Value;

use crate::ident::identifier;
use crate::registry::EnumRegistry;

/// One parsed requirement predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// Bare token: the named property must be set.
    Property(String),
    /// `{"!": p}` — disabled when the named property is set.
    Disabled(String),
    /// `{"<=": p}` — bounded above by the named property.
    UpperBound(String),
    /// `{k: v}` — the named property must hold one of the given values.
    Membership {
        key: String,
        values: MembershipValues,
    },
}

/// The right-hand side of a membership predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipValues {
    /// Scalar form: the value is rendered verbatim.
    One(Value),
    /// List form: each value is rendered as a transformed identifier.
    Any(Vec<Value>),
}

impl Requirement {
    /// Parse one `requires` entry. Returns `None` for shapes outside the
    /// predicate language; callers turn that into a fatal error.
    pub fn parse(entry: &Value) -> Option<Requirement> {
        match entry {
            Value::String(token) => Some(Requirement::Property(token.clone())),
            Value::Object(map) => {
                if let Some(negated) = map.get("!") {
                    return negated
                        .as_str()
                        .map(|token| Requirement::Disabled(token.to_string()));
                }
                if let Some(bound) = map.get("<=") {
                    return bound
                        .as_str()
                        .map(|token| Requirement::UpperBound(token.to_string()));
                }
                let (key, value) = map.iter().next()?;
                let values = match value {
                    Value::Array(items) if items.is_empty() => return None,
                    Value::Array(items) => MembershipValues::Any(items.clone()),
                    scalar => MembershipValues::One(scalar.clone()),
                };
                Some(Requirement::Membership {
                    key: key.clone(),
                    values,
                })
            }
            _ => None,
        }
    }

    /// Render the predicate as a documentation sentence.
    pub fn render(&self, registry: &EnumRegistry) -> String {
        match self {
            Requirement::Property(token) => {
                format!("Requires {}.", snippet(token, registry))
            }
            Requirement::Disabled(token) => {
                format!("Disabled by {}.", snippet(token, registry))
            }
            Requirement::UpperBound(token) => {
                format!(
                    "Must be less than or equal to `{}`.",
                    identifier(token, None, registry)
                )
            }
            Requirement::Membership { key, values } => {
                let rendered = match values {
                    MembershipValues::One(value) => literal(value),
                    MembershipValues::Any(items) => items
                        .iter()
                        .map(|value| value_snippet(value, registry))
                        .collect::<Vec<_>>()
                        .join(", or "),
                };
                format!("Requires {} to be {}.", snippet(key, registry), rendered)
            }
        }
    }
}

fn snippet(token: &str, registry: &EnumRegistry) -> String {
    format!("`{}`", identifier(token, None, registry))
}

fn value_snippet(value: &Value, registry: &EnumRegistry) -> String {
    match value {
        Value::String(token) => snippet(token, registry),
        other => format!("`{other}`"),
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(token) => format!("`{token}`"),
        other => format!("`{other}`"),
    }
}
