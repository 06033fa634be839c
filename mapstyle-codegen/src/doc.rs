//! Documentation Synthesizer
//!
//! Builds the prose block for one generated binding: base description with
//! literal back-references rewritten to generated identifiers, the
//! binding-class label, bounds, units, default, constraint sentences, and
//! itemized enumeration value docs. Assembly is deterministic and branches
//! only on the descriptor's own fields; the handful of properties whose
//! literal documentation diverges from the generic template live in data
//! tables, not control flow.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::ident::identifier;
use crate::registry::EnumRegistry;
use crate::schema::{PropertyDescriptor, PropertyKind};
use crate::types::TypeRef;

// ── Special-cased properties ─────────────────────────────────────────────────

/// Properties whose description replaces the schema's wholesale.
const FIXED_DOCS: &[(&str, &str)] = &[
    ("heatmap-color", HEATMAP_COLOR_DOC),
    ("text-field", "Value to use for a text label."),
];

/// Properties whose descriptions quote literal code and must not have their
/// backticked spans rewritten.
const RAW_DOC_REFS: &[&str] = &["line-gradient", "line-dasharray"];

/// Properties whose default cannot be rendered as a literal; the default is
/// documented by hand (or not at all) instead.
const NO_DEFAULT_SENTENCE: &[&str] = &["heatmap-color", "text-font"];

const HEATMAP_COLOR_DOC: &str = "Defines the color of each pixel based on its density value in a heatmap. The value should be an Expression that uses `heatmapDensity` as input. Defaults to:

      E.heatmapDensity
      |> E.interpolate E.Linear
        [ (0.0, rgba 0 0 255 0)
        , (0.1, rgba 65 105 225 1)
        , (0.3, rgba 0 255 255 1)
        , (0.5, rgba 0 255 0 1)
        , (0.7, rgba 255 255 0 1)
        , (1.0, rgba 255 0 0 1)]";

static BACKTICK_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.+?)`").expect("valid pattern"));

// ── Assembly ─────────────────────────────────────────────────────────────────

/// Build the documentation block body for one binding (the text between
/// `{-|` and `-}`).
pub fn build_doc(
    descriptor: &PropertyDescriptor,
    type_ref: &TypeRef,
    registry: &EnumRegistry,
) -> String {
    let mut out = String::new();

    out.push_str(&description(descriptor, registry));
    out.push(' ');
    out.push_str(descriptor.class.label());
    out.push_str(" property. ");

    out.push_str(&bounds_sentence(descriptor));

    if let Some(units) = &descriptor.units {
        out.push_str(&format!("\nUnits in {units}. "));
    }

    if let Some(rendered) = default_sentence(descriptor, type_ref, registry) {
        out.push_str(&rendered);
    }

    let requires: Vec<String> = descriptor
        .requires
        .iter()
        .map(|requirement| requirement.render(registry))
        .collect();
    out.push_str(&requires.join(" "));

    if let PropertyKind::Enum(literals) = &descriptor.kind {
        if let Some(shape) = type_ref.enum_shape() {
            for literal in literals {
                out.push_str(&format!(
                    "\n- `{}`: {}",
                    identifier(&literal.value, Some(shape), registry),
                    rewrite_refs(&literal.doc, registry)
                ));
            }
        }
    }

    out
}

/// The base description: a fixed override where one exists, otherwise the
/// schema doc with backticked token references rewritten to identifiers.
fn description(descriptor: &PropertyDescriptor, registry: &EnumRegistry) -> String {
    if let Some((_, fixed)) = FIXED_DOCS
        .iter()
        .find(|(name, _)| *name == descriptor.name)
    {
        return fixed.to_string();
    }
    if RAW_DOC_REFS.contains(&descriptor.name.as_str()) {
        return descriptor.doc.clone();
    }
    rewrite_refs(&descriptor.doc, registry)
}

fn bounds_sentence(descriptor: &PropertyDescriptor) -> String {
    match (&descriptor.bounds.minimum, &descriptor.bounds.maximum) {
        (Some(min), Some(max)) => {
            format!("\n\nShould be between `{min}` and `{max}` inclusive. ")
        }
        (Some(min), None) => format!("\n\nShould be greater than or equal to `{min}`. "),
        (None, Some(max)) => format!("\n\nShould be less than or equal to `{max}`. "),
        (None, None) => String::new(),
    }
}

fn default_sentence(
    descriptor: &PropertyDescriptor,
    type_ref: &TypeRef,
    registry: &EnumRegistry,
) -> Option<String> {
    if NO_DEFAULT_SENTENCE.contains(&descriptor.name.as_str()) {
        return None;
    }
    let default = descriptor.default.as_ref()?;
    let rendered = render_default(default, type_ref, registry)?;
    Some(format!("Defaults to `{rendered}`. "))
}

/// Render a default value as the literal a user would write. Composite
/// defaults (objects, mixed arrays) have no literal rendering and are
/// omitted from the prose.
fn render_default(default: &Value, type_ref: &TypeRef, registry: &EnumRegistry) -> Option<String> {
    match default {
        Value::String(s) if s == "rgba(0, 0, 0, 0)" => Some("rgba 0 0 0 0".to_string()),
        Value::String(s) => Some(identifier(s, type_ref.enum_shape(), registry)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let rendered: Option<Vec<String>> = items
                .iter()
                .map(|item| match item {
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            rendered.map(|parts| parts.join(","))
        }
        Value::Object(_) | Value::Null => None,
    }
}

/// Rewrite backticked token references so the prose matches generated
/// identifiers: `` `fill-color` `` → `` `fillColor` ``.
fn rewrite_refs(text: &str, registry: &EnumRegistry) -> String {
    BACKTICK_REF
        .replace_all(text, |caps: &Captures| {
            format!("`{}`", identifier(&caps[1], None, registry))
        })
        .into_owned()
}
