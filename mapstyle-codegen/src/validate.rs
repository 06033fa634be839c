//! Schema validation
//!
//! Advisory lint pass over a lowered schema. The emitter enforces its own
//! hard failures; this pass exists so a caller can surface every finding at
//! once instead of stopping at the first, and so non-fatal oddities (empty
//! documentation, inverted bounds) are visible before they ship.

use std::collections::HashMap;
use std::fmt;

use crate::elm::GENERAL_ATTRIBUTES;
use crate::ident::identifier;
use crate::registry::EnumRegistry;
use crate::schema::{PropertyKind, StyleSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One finding, located by `category.property`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
    pub location: String,
    pub severity: Severity,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// Lint a schema. Returns every finding; an empty vector means the schema
/// will generate cleanly.
pub fn validate(schema: &StyleSchema, registry: &EnumRegistry) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    for category in &schema.categories {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for descriptor in &category.properties {
            let location = format!("{}.{}", category.title, descriptor.name);
            let ident = identifier(&descriptor.name, None, registry);

            if GENERAL_ATTRIBUTES.contains(&ident.as_str()) {
                findings.push(ValidationError {
                    message: format!("identifier '{ident}' shadows a general attribute"),
                    location: location.clone(),
                    severity: Severity::Error,
                });
            }

            match seen.get(&ident) {
                Some(first) => findings.push(ValidationError {
                    message: format!("identifier '{ident}' already generated by '{first}'"),
                    location: location.clone(),
                    severity: Severity::Error,
                }),
                None => {
                    seen.insert(ident, &descriptor.name);
                }
            }

            if let PropertyKind::Enum(literals) = &descriptor.kind {
                let values: Vec<&str> = literals.iter().map(|l| l.value.as_str()).collect();
                if registry.resolve(&values).is_none() {
                    findings.push(ValidationError {
                        message: format!(
                            "enum value set {{{}}} matches no registered type",
                            values.join(", ")
                        ),
                        location: location.clone(),
                        severity: Severity::Error,
                    });
                }
            }

            if descriptor.doc.trim().is_empty() {
                findings.push(ValidationError {
                    message: "property has no documentation".to_string(),
                    location: location.clone(),
                    severity: Severity::Warning,
                });
            }

            if let (Some(min), Some(max)) = (&descriptor.bounds.minimum, &descriptor.bounds.maximum)
            {
                if min.as_f64().zip(max.as_f64()).is_some_and(|(lo, hi)| lo > hi) {
                    findings.push(ValidationError {
                        message: format!("minimum `{min}` exceeds maximum `{max}`"),
                        location,
                        severity: Severity::Warning,
                    });
                }
            }
        }
    }

    findings
}

/// True when no finding is an error. Warnings do not block generation.
pub fn is_valid(findings: &[ValidationError]) -> bool {
    findings.iter().all(|f| f.severity != Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint(spec: &str) -> Vec<ValidationError> {
        let schema = StyleSchema::from_json(spec).unwrap();
        validate(&schema, &EnumRegistry::standard())
    }

    #[test]
    fn clean_schema_has_no_findings() {
        let findings = lint(
            r#"{
                "layout": ["layout_fill"], "paint": [],
                "layout_fill": {
                    "fill-sort-key": {"type": "number", "doc": "Sort order."}
                }
            }"#,
        );
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
        assert!(is_valid(&findings));
    }

    #[test]
    fn duplicate_identifier_is_an_error() {
        let findings = lint(
            r#"{
                "layout": ["layout_fill"], "paint": ["paint_fill"],
                "layout_fill": {"fill-opacity": {"type": "number", "doc": "One."}},
                "paint_fill": {"fill-opacity": {"type": "number", "doc": "Two."}}
            }"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].location, "Fill.fill-opacity");
        assert!(findings[0].message.contains("fillOpacity"));
        assert!(!is_valid(&findings));
    }

    #[test]
    fn general_attribute_shadowing_is_an_error() {
        let findings = lint(
            r#"{
                "layout": ["layout_fill"], "paint": [],
                "layout_fill": {"minzoom": {"type": "number", "doc": "Zoom floor."}}
            }"#,
        );
        assert!(findings
            .iter()
            .any(|f| f.severity == Severity::Error && f.message.contains("general attribute")));
    }

    #[test]
    fn unresolvable_enum_set_is_an_error() {
        let findings = lint(
            r#"{
                "layout": ["layout_symbol"], "paint": [],
                "layout_symbol": {
                    "symbol-mode": {
                        "type": "enum",
                        "values": {"alpha": {"doc": "A."}, "beta": {"doc": "B."}},
                        "doc": "Mode."
                    }
                }
            }"#,
        );
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("alpha, beta"));
        assert!(!is_valid(&findings));
    }

    #[test]
    fn empty_documentation_is_a_warning() {
        let findings = lint(
            r#"{
                "layout": ["layout_fill"], "paint": [],
                "layout_fill": {"fill-sort-key": {"type": "number", "doc": "  "}}
            }"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(is_valid(&findings), "warnings alone must not invalidate");
    }

    #[test]
    fn inverted_bounds_are_a_warning() {
        let findings = lint(
            r#"{
                "layout": ["layout_fill"], "paint": [],
                "layout_fill": {
                    "fill-sort-key": {
                        "type": "number", "doc": "Sort order.",
                        "minimum": 10, "maximum": 1
                    }
                }
            }"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("minimum"));
    }

    #[test]
    fn findings_render_with_severity_and_location() {
        let findings = lint(
            r#"{
                "layout": ["layout_fill"], "paint": [],
                "layout_fill": {"fill-sort-key": {"type": "number", "doc": ""}}
            }"#,
        );
        assert_eq!(
            findings[0].to_string(),
            "warning: Fill.fill-sort-key: property has no documentation"
        );
    }
}
