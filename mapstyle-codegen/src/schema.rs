//! Schema Loader
//!
//! Parses the whole style spec document into an immutable in-memory schema.
//! The spec's loosely-typed descriptor records are lowered into an exhaustive
//! tagged [`PropertyKind`], so every downstream dispatch is a compile-checked
//! pattern match rather than a string switch. Unknown shapes hard-fail here;
//! nothing downstream sees a descriptor it cannot handle.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::error::{CodegenError, Result};
use crate::ident::title_case;
use crate::requirement::Requirement;

// ── Lowered model ────────────────────────────────────────────────────────────

/// Early-applied (layout) vs late-applied (paint) property classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingClass {
    Layout,
    Paint,
}

impl BindingClass {
    /// The label used both in documentation prose and as the `LayerAttr`
    /// constructor in generated bodies.
    pub fn label(&self) -> &'static str {
        match self {
            BindingClass::Layout => "Layout",
            BindingClass::Paint => "Paint",
        }
    }
}

/// Element kind of an array-typed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Number,
    Text,
}

/// One permitted enumeration literal with its own documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumLiteral {
    pub value: String,
    pub doc: String,
}

/// The eight property kinds, lowered from the spec's `type`/`value`/`values`
/// fields. Adding a ninth kind is a compile-time-enforced gap in every match.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    Number,
    Boolean,
    Text,
    Color,
    Array(ElementKind),
    Formatted,
    /// Literals in declaration order.
    Enum(Vec<EnumLiteral>),
}

/// Optional numeric bounds of a descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
}

/// One lowered schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// Hyphenated schema token, unique within its category.
    pub name: String,
    pub kind: PropertyKind,
    pub doc: String,
    pub bounds: Bounds,
    pub units: Option<String>,
    /// Kind-typed default, kept as raw JSON for literal rendering.
    pub default: Option<Value>,
    /// Requirement predicates in declaration order.
    pub requires: Vec<Requirement>,
    /// Whether the property accepts data-dependent (not just
    /// camera-dependent) expressions.
    pub data_driven: bool,
    pub class: BindingClass,
}

/// A named group of properties applicable to one rendering primitive, in the
/// ordered union of its layout-class then paint-class descriptors.
#[derive(Debug, Clone)]
pub struct LayerCategory {
    /// Human title derived from the category token, e.g. `FillExtrusion`.
    pub title: String,
    pub properties: Vec<PropertyDescriptor>,
}

/// The full lowered schema, read once per run and immutable thereafter.
#[derive(Debug, Clone)]
pub struct StyleSchema {
    /// Categories in first-appearance order of the `layout`/`paint` lists.
    pub categories: Vec<LayerCategory>,
}

// ── Raw document shapes ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawProperty {
    #[serde(rename = "type")]
    kind: String,
    /// Array element kind.
    value: Option<String>,
    /// Enumeration literal → doc map, declaration order preserved.
    values: Option<IndexMap<String, RawEnumValue>>,
    #[serde(default)]
    doc: String,
    default: Option<Value>,
    minimum: Option<Number>,
    maximum: Option<Number>,
    units: Option<String>,
    #[serde(default)]
    requires: Vec<Value>,
    #[serde(rename = "property-type")]
    property_type: Option<String>,
    #[serde(rename = "sdk-support", default)]
    sdk_support: Option<SdkSupport>,
}

#[derive(Debug, Deserialize)]
struct RawEnumValue {
    #[serde(default)]
    doc: String,
}

#[derive(Debug, Default, Deserialize)]
struct SdkSupport {
    #[serde(rename = "data-driven styling", default)]
    data_driven: Option<IndexMap<String, Value>>,
}

// ── Loading ──────────────────────────────────────────────────────────────────

impl StyleSchema {
    /// Parse and lower a style spec document.
    pub fn from_json(src: &str) -> Result<StyleSchema> {
        let document: Value = serde_json::from_str(src)?;
        let root = document.as_object().ok_or_else(|| {
            CodegenError::MalformedSpec {
                detail: "top level is not an object".to_string(),
            }
        })?;

        let layout = category_list(root, "layout")?;
        let paint = category_list(root, "paint")?;

        let mut categories: IndexMap<String, Vec<PropertyDescriptor>> = IndexMap::new();
        for token in &layout {
            collect_category(root, token, BindingClass::Layout, &mut categories)?;
        }
        for token in &paint {
            collect_category(root, token, BindingClass::Paint, &mut categories)?;
        }

        Ok(StyleSchema {
            categories: categories
                .into_iter()
                .map(|(title, properties)| LayerCategory { title, properties })
                .collect(),
        })
    }
}

fn category_list(root: &Map<String, Value>, list: &str) -> Result<Vec<String>> {
    let entries = root
        .get(list)
        .and_then(Value::as_array)
        .ok_or_else(|| CodegenError::MalformedSpec {
            detail: format!("missing '{list}' category list"),
        })?;
    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| CodegenError::MalformedSpec {
                    detail: format!("'{list}' list contains a non-string entry"),
                })
        })
        .collect()
}

/// Title for a category token: the substring after its first separator,
/// title-cased. `layout_fill-extrusion` → `FillExtrusion`.
fn category_title(token: &str) -> String {
    let tail = token.split_once('_').map(|(_, tail)| tail).unwrap_or(token);
    title_case(tail)
}

fn collect_category(
    root: &Map<String, Value>,
    token: &str,
    class: BindingClass,
    categories: &mut IndexMap<String, Vec<PropertyDescriptor>>,
) -> Result<()> {
    let descriptors = root
        .get(token)
        .and_then(Value::as_object)
        .ok_or_else(|| CodegenError::MissingCategory {
            category: token.to_string(),
        })?;

    let bucket = categories.entry(category_title(token)).or_default();
    for (name, raw) in descriptors {
        // `visibility` is replaced by the hand-authored `visible` binding.
        if name == "visibility" {
            continue;
        }
        bucket.push(lower_property(name, raw, class)?);
    }
    Ok(())
}

fn lower_property(name: &str, raw: &Value, class: BindingClass) -> Result<PropertyDescriptor> {
    // Shape problems inside well-formed JSON must name the property; a bare
    // deserialization error would read like a syntax failure.
    let raw: RawProperty =
        serde_json::from_value(raw.clone()).map_err(|e| CodegenError::MalformedSpec {
            detail: format!("property '{name}': {e}"),
        })?;

    if raw.property_type.as_deref() == Some("constant") {
        return Err(CodegenError::UnsupportedProperty {
            property: name.to_string(),
        });
    }

    let kind = match raw.kind.as_str() {
        "number" => PropertyKind::Number,
        "boolean" => PropertyKind::Boolean,
        "string" => PropertyKind::Text,
        "color" => PropertyKind::Color,
        "formatted" => PropertyKind::Formatted,
        "array" => match raw.value.as_deref() {
            Some("number") => PropertyKind::Array(ElementKind::Number),
            Some("string") => PropertyKind::Array(ElementKind::Text),
            other => {
                return Err(CodegenError::UnknownType {
                    property: name.to_string(),
                    kind: format!("array of {}", other.unwrap_or("<missing>")),
                })
            }
        },
        "enum" => {
            let values = raw.values.ok_or_else(|| CodegenError::UnknownType {
                property: name.to_string(),
                kind: "enum without values".to_string(),
            })?;
            PropertyKind::Enum(
                values
                    .into_iter()
                    .map(|(value, entry)| EnumLiteral {
                        value,
                        doc: entry.doc,
                    })
                    .collect(),
            )
        }
        other => {
            return Err(CodegenError::UnknownType {
                property: name.to_string(),
                kind: other.to_string(),
            })
        }
    };

    let requires = raw
        .requires
        .iter()
        .map(|entry| {
            Requirement::parse(entry).ok_or_else(|| CodegenError::MalformedRequirement {
                property: name.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let data_driven = raw
        .sdk_support
        .and_then(|support| support.data_driven)
        .map(|flags| flags.get("js").is_some_and(|flag| !flag.is_null()))
        .unwrap_or(false);

    Ok(PropertyDescriptor {
        name: name.to_string(),
        kind,
        doc: raw.doc,
        bounds: Bounds {
            minimum: raw.minimum,
            maximum: raw.maximum,
        },
        units: raw.units,
        default: raw.default,
        requires,
        data_driven,
        class,
    })
}
