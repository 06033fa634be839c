//! Type Mapper
//!
//! Maps a lowered [`PropertyKind`] to its Elm type reference, consulting the
//! enum registry for enumerations. The match is exhaustive over the declared
//! kinds; an enumeration whose value set matches no registered shape is the
//! one remaining runtime failure, reported as `UnknownType`.

use crate::error::{CodegenError, Result};
use crate::registry::{EnumRegistry, EnumShape};
use crate::schema::{ElementKind, PropertyDescriptor, PropertyKind};

/// The target-type representation of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    Float,
    Bool,
    Str,
    Color,
    FloatArray,
    StringArray,
    Formatted,
    Enum(&'static EnumShape),
}

impl TypeRef {
    /// Render as an Elm type reference, parenthesised where Elm requires it.
    pub fn elm(&self) -> &'static str {
        match self {
            TypeRef::Float => "Float",
            TypeRef::Bool => "Bool",
            TypeRef::Str => "String",
            TypeRef::Color => "Color",
            TypeRef::FloatArray => "(Array Float)",
            TypeRef::StringArray => "(Array String)",
            TypeRef::Formatted => "FormattedText",
            TypeRef::Enum(shape) => shape.type_ref,
        }
    }

    /// The enumeration identity, for callers that qualify literals.
    pub fn enum_shape(&self) -> Option<&'static EnumShape> {
        match self {
            TypeRef::Enum(shape) => Some(shape),
            _ => None,
        }
    }
}

/// Expression breadth: the orthogonal second axis of a generated signature.
/// Data-driven properties accept any expression; the rest accept only
/// camera-derived expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Any,
    Camera,
}

impl ExprKind {
    pub fn elm(&self) -> &'static str {
        match self {
            ExprKind::Any => "any",
            ExprKind::Camera => "CameraExpression",
        }
    }
}

/// Map a descriptor's kind to its target type.
pub fn map_type(descriptor: &PropertyDescriptor, registry: &EnumRegistry) -> Result<TypeRef> {
    match &descriptor.kind {
        PropertyKind::Number => Ok(TypeRef::Float),
        PropertyKind::Boolean => Ok(TypeRef::Bool),
        PropertyKind::Text => Ok(TypeRef::Str),
        PropertyKind::Color => Ok(TypeRef::Color),
        PropertyKind::Array(ElementKind::Number) => Ok(TypeRef::FloatArray),
        PropertyKind::Array(ElementKind::Text) => Ok(TypeRef::StringArray),
        PropertyKind::Formatted => Ok(TypeRef::Formatted),
        PropertyKind::Enum(literals) => {
            let values: Vec<&str> = literals.iter().map(|l| l.value.as_str()).collect();
            registry.resolve(&values).map(TypeRef::Enum).ok_or_else(|| {
                CodegenError::UnknownType {
                    property: descriptor.name.clone(),
                    kind: format!("enum {{{}}}", values.join(", ")),
                }
            })
        }
    }
}

/// The expression breadth of a descriptor's generated signature.
pub fn expr_kind(descriptor: &PropertyDescriptor) -> ExprKind {
    if descriptor.data_driven {
        ExprKind::Any
    } else {
        ExprKind::Camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BindingClass, Bounds, EnumLiteral};

    fn descriptor(name: &str, kind: PropertyKind) -> PropertyDescriptor {
        PropertyDescriptor {
            name: name.to_string(),
            kind,
            doc: String::new(),
            bounds: Bounds::default(),
            units: None,
            default: None,
            requires: Vec::new(),
            data_driven: false,
            class: BindingClass::Paint,
        }
    }

    fn enum_kind(values: &[&str]) -> PropertyKind {
        PropertyKind::Enum(
            values
                .iter()
                .map(|v| EnumLiteral {
                    value: v.to_string(),
                    doc: String::new(),
                })
                .collect(),
        )
    }

    #[test]
    fn scalar_kinds_map_to_fixed_types() {
        let r = EnumRegistry::standard();
        let cases = [
            (PropertyKind::Number, "Float"),
            (PropertyKind::Boolean, "Bool"),
            (PropertyKind::Text, "String"),
            (PropertyKind::Color, "Color"),
            (PropertyKind::Array(ElementKind::Number), "(Array Float)"),
            (PropertyKind::Array(ElementKind::Text), "(Array String)"),
            (PropertyKind::Formatted, "FormattedText"),
        ];
        for (kind, expected) in cases {
            let mapped = map_type(&descriptor("p", kind), &r).unwrap();
            assert_eq!(mapped.elm(), expected);
        }
    }

    #[test]
    fn identical_value_sets_map_to_the_same_type() {
        let r = EnumRegistry::standard();
        let a = map_type(&descriptor("a", enum_kind(&["butt", "round", "square"])), &r).unwrap();
        let b = map_type(&descriptor("b", enum_kind(&["square", "round", "butt"])), &r).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_value_sets_never_unify() {
        let r = EnumRegistry::standard();
        let cap = map_type(&descriptor("a", enum_kind(&["butt", "round", "square"])), &r).unwrap();
        let join = map_type(&descriptor("b", enum_kind(&["bevel", "round", "miter"])), &r).unwrap();
        assert_ne!(cap, join);
    }

    #[test]
    fn unregistered_value_set_is_fatal() {
        let r = EnumRegistry::standard();
        let err = map_type(&descriptor("text-mode", enum_kind(&["alpha", "beta"])), &r).unwrap_err();
        match err {
            CodegenError::UnknownType { property, kind } => {
                assert_eq!(property, "text-mode");
                assert!(kind.contains("alpha"), "diagnostic should name the set: {kind}");
            }
            other => panic!("expected UnknownType, got {other}"),
        }
    }

    #[test]
    fn expression_breadth_follows_data_driven_flag() {
        let mut desc = descriptor("p", PropertyKind::Number);
        assert_eq!(expr_kind(&desc), ExprKind::Camera);
        assert_eq!(expr_kind(&desc).elm(), "CameraExpression");
        desc.data_driven = true;
        assert_eq!(expr_kind(&desc), ExprKind::Any);
        assert_eq!(expr_kind(&desc).elm(), "any");
    }
}
