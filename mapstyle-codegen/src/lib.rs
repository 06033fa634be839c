//! Mapstyle Codegen — Mapbox GL style spec to Elm bindings
//!
//! This library reads the Mapbox GL style specification (the `v8.json`
//! document shipped with `mapbox-gl-js`) and emits the `Mapbox.Layer` Elm
//! module: one typed attribute binding per layout and paint property, plus
//! the hand-specified layer constructors and general attributes around them.
//!
//! The pipeline is deterministic end to end; the same input document always
//! produces the same bytes (see [`generate_layer_module`]).
//!
//! # Usage
//!
//! ```rust
//! use mapstyle_codegen::{generate_layer_module, validate, EnumRegistry, StyleSchema};
//!
//! let spec = r##"{
//!     "layout": ["layout_fill"],
//!     "paint": ["paint_fill"],
//!     "layout_fill": {
//!         "fill-sort-key": {
//!             "type": "number",
//!             "doc": "Sorts features in ascending order based on this value."
//!         }
//!     },
//!     "paint_fill": {
//!         "fill-color": {
//!             "type": "color",
//!             "doc": "The color of the filled part of this layer.",
//!             "default": "#000000",
//!             "sdk-support": {"data-driven styling": {"js": "0.19.0"}}
//!         }
//!     }
//! }"##;
//!
//! let schema = StyleSchema::from_json(spec).unwrap();
//! let findings = validate(&schema, &EnumRegistry::standard());
//! assert!(findings.is_empty());
//!
//! let module = generate_layer_module(spec).unwrap();
//! assert!(module.contains("fillColor : Expression any Color -> LayerAttr Fill"));
//! assert!(module.contains("fillSortKey : Expression CameraExpression Float -> LayerAttr Fill"));
//! ```

pub mod doc;
pub mod elm;
pub mod error;
pub mod ident;
pub mod registry;
pub mod requirement;
pub mod schema;
pub mod types;
pub mod validate;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use elm::{generate, GENERAL_ATTRIBUTES};
pub use error::{CodegenError, Result};
pub use ident::{camel, identifier, title_case};
pub use registry::{EnumRegistry, EnumShape};
pub use requirement::{MembershipValues, Requirement};
pub use schema::{
    BindingClass, Bounds, ElementKind, EnumLiteral, LayerCategory, PropertyDescriptor,
    PropertyKind, StyleSchema,
};
pub use types::{ExprKind, TypeRef};
pub use validate::{is_valid, validate, Severity, ValidationError};

/// Parse a style spec document and generate the complete Elm module.
///
/// Convenience wrapper over [`StyleSchema::from_json`] and [`generate`] with
/// the standard enum registry.
pub fn generate_layer_module(src: &str) -> Result<String> {
    let schema = StyleSchema::from_json(src)?;
    generate(&schema, &EnumRegistry::standard())
}
