//! Enum Registry — closed-variant enumeration identities
//!
//! The style spec declares enumeration properties as open literal sets; the
//! generated Elm module types them with a fixed family of named enumerations.
//! This registry maps the exact set of permitted literals to its canonical
//! identity. It is built once per run and never mutated.

use indexmap::IndexMap;

/// One registered enumeration identity.
///
/// `literal_prefix` is prepended to a literal before casing so that values
/// from unrelated enumerations never collide (`butt` → `lineCapButt`). The
/// two anchor shapes share the `anchor` prefix because they share the same
/// underlying Elm type family; the z-order shape uses the shorter synonym
/// `order` instead of its full type name.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumShape {
    /// Canonical identity name, e.g. `LineCap`.
    pub name: &'static str,
    /// Rendered Elm type reference, e.g. `(Anchor Auto)`.
    pub type_ref: &'static str,
    /// Prefix applied to literals before casing.
    pub literal_prefix: &'static str,
    /// Permitted literal tokens.
    pub values: &'static [&'static str],
}

static SHAPES: &[EnumShape] = &[
    EnumShape {
        name: "AnchorAuto",
        type_ref: "(Anchor Auto)",
        literal_prefix: "anchor",
        values: &["map", "viewport", "auto"],
    },
    EnumShape {
        name: "Anchor",
        type_ref: "(Anchor Never)",
        literal_prefix: "anchor",
        values: &["map", "viewport"],
    },
    EnumShape {
        name: "TextJustify",
        type_ref: "TextJustify",
        literal_prefix: "textJustify",
        values: &["left", "center", "right"],
    },
    EnumShape {
        name: "Position",
        type_ref: "Position",
        literal_prefix: "position",
        values: &[
            "center",
            "left",
            "right",
            "top",
            "bottom",
            "top-left",
            "top-right",
            "bottom-left",
            "bottom-right",
        ],
    },
    EnumShape {
        name: "TextFit",
        type_ref: "TextFit",
        literal_prefix: "textFit",
        values: &["none", "width", "height", "both"],
    },
    EnumShape {
        name: "LineCap",
        type_ref: "LineCap",
        literal_prefix: "lineCap",
        values: &["butt", "round", "square"],
    },
    EnumShape {
        name: "LineJoin",
        type_ref: "LineJoin",
        literal_prefix: "lineJoin",
        values: &["bevel", "round", "miter"],
    },
    EnumShape {
        name: "SymbolPlacement",
        type_ref: "SymbolPlacement",
        literal_prefix: "symbolPlacement",
        values: &["point", "line", "line-center"],
    },
    EnumShape {
        name: "TextTransform",
        type_ref: "TextTransform",
        literal_prefix: "textTransform",
        values: &["none", "uppercase", "lowercase"],
    },
    EnumShape {
        name: "RasterResampling",
        type_ref: "RasterResampling",
        literal_prefix: "rasterResampling",
        values: &["linear", "nearest"],
    },
    EnumShape {
        name: "SymbolZOrder",
        type_ref: "SymbolZOrder",
        literal_prefix: "order",
        values: &["viewport-y", "source"],
    },
];

/// Lookup structure resolving enumeration value sets to identities.
///
/// Immutable after [`EnumRegistry::standard`]; passed by reference into the
/// type mapper and identifier transformer.
#[derive(Debug)]
pub struct EnumRegistry {
    shapes: &'static [EnumShape],
    bare: IndexMap<&'static str, &'static str>,
}

impl EnumRegistry {
    /// Build the registry for the standard v8 style spec enumerations.
    pub fn standard() -> Self {
        let mut bare = IndexMap::new();
        for shape in SHAPES {
            for &literal in shape.values {
                // `source` names a core style concept and must stay bare.
                if literal == "source" {
                    continue;
                }
                // Later registrations win for literals shared across shapes.
                bare.insert(literal, shape.literal_prefix);
            }
        }
        Self {
            shapes: SHAPES,
            bare,
        }
    }

    /// Resolve a value set to its identity. Matching is by exact set, so the
    /// declaration order in the spec document is irrelevant.
    pub fn resolve(&self, literals: &[&str]) -> Option<&'static EnumShape> {
        let mut wanted: Vec<&str> = literals.to_vec();
        wanted.sort_unstable();
        wanted.dedup();
        self.shapes.iter().find(|shape| {
            let mut have: Vec<&str> = shape.values.to_vec();
            have.sort_unstable();
            have == wanted
        })
    }

    /// The qualification prefix for a bare literal appearing outside any
    /// enumeration context (doc back-references, requirement values).
    pub fn bare_prefix(&self, literal: &str) -> Option<&'static str> {
        self.bare.get(literal).copied()
    }
}
