//! Code Emitter
//!
//! Assembles the generated `Mapbox.Layer` module: exposing list, module doc
//! index, the hand-specified prelude (layer types, constructors, general
//! attributes), and one banner-commented section per layer category with its
//! bindings sorted by generated identifier. The schema's own per-category
//! ordering is map-like and not order-preserving across spec revisions, so
//! the explicit sort is what makes output byte-stable across runs.

use std::collections::BTreeMap;

use crate::doc::build_doc;
use crate::error::{CodegenError, Result};
use crate::ident::identifier;
use crate::registry::EnumRegistry;
use crate::schema::{PropertyDescriptor, StyleSchema};
use crate::types::{expr_kind, map_type};

/// The hand-authored general attributes. No generated binding may shadow
/// these.
pub const GENERAL_ATTRIBUTES: &[&str] = &[
    "metadata",
    "sourceLayer",
    "minzoom",
    "maxzoom",
    "filter",
    "visible",
];

/// Generate the complete Elm module for a lowered schema.
///
/// Fails without partial output on the first identifier collision or
/// unmappable descriptor.
pub fn generate(schema: &StyleSchema, registry: &EnumRegistry) -> Result<String> {
    let sections = build_sections(schema, registry)?;

    let mut out = String::with_capacity(64 * 1024);
    out.push_str(EXPOSING_HEAD);
    out.push_str(
        &sections
            .iter()
            .map(|section| section.idents.join(", "))
            .collect::<Vec<_>>()
            .join(",\n  "),
    );
    out.push_str(")\n");

    out.push_str(MODULE_DOC_HEAD);
    out.push_str(
        &sections
            .iter()
            .map(|section| {
                format!(
                    "### {} Attributes\n\n@docs {}",
                    section.title,
                    section.idents.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    );
    out.push_str("\n-}\n\n");

    out.push_str(PRELUDE);

    for section in &sections {
        out.push_str("\n\n-- ");
        out.push_str(&section.title);
        out.push_str("\n\n");
        out.push_str(&section.blocks.join("\n\n"));
    }
    out.push('\n');
    Ok(out)
}

// ── Sections ─────────────────────────────────────────────────────────────────

struct Section {
    title: String,
    /// Generated identifiers, lexicographically sorted.
    idents: Vec<String>,
    /// Binding blocks in the same order as `idents`.
    blocks: Vec<String>,
}

fn build_sections(schema: &StyleSchema, registry: &EnumRegistry) -> Result<Vec<Section>> {
    let mut sections = Vec::with_capacity(schema.categories.len());
    for category in &schema.categories {
        // BTreeMap doubles as the stable sort and the collision guard.
        let mut bindings: BTreeMap<String, (String, String)> = BTreeMap::new();
        for descriptor in &category.properties {
            let ident = identifier(&descriptor.name, None, registry);
            if GENERAL_ATTRIBUTES.contains(&ident.as_str()) {
                return Err(CodegenError::IdentifierCollision {
                    category: category.title.clone(),
                    ident,
                    first: "the general attributes".to_string(),
                    second: descriptor.name.clone(),
                });
            }
            if let Some((previous, _)) = bindings.get(&ident) {
                return Err(CodegenError::IdentifierCollision {
                    category: category.title.clone(),
                    ident,
                    first: previous.clone(),
                    second: descriptor.name.clone(),
                });
            }
            let block = render_binding(descriptor, &ident, &category.title, registry)?;
            bindings.insert(ident, (descriptor.name.clone(), block));
        }
        if bindings.is_empty() {
            continue;
        }
        sections.push(Section {
            title: category.title.clone(),
            idents: bindings.keys().cloned().collect(),
            blocks: bindings.into_values().map(|(_, block)| block).collect(),
        });
    }
    Ok(sections)
}

fn render_binding(
    descriptor: &PropertyDescriptor,
    ident: &str,
    category_title: &str,
    registry: &EnumRegistry,
) -> Result<String> {
    let type_ref = map_type(descriptor, registry)?;
    let breadth = expr_kind(descriptor);
    let doc = build_doc(descriptor, &type_ref, registry);
    Ok(format!(
        "{{-| {doc}\n-}}\n{ident} : Expression {} {} -> LayerAttr {}\n{ident} =\n    Expression.encode >> {} \"{}\"",
        breadth.elm(),
        type_ref.elm(),
        category_title,
        descriptor.class.label(),
        descriptor.name
    ))
}

// ── Hand-specified module text ───────────────────────────────────────────────

const EXPOSING_HEAD: &str = r#"module Mapbox.Layer exposing (
  Layer, SourceId, Background, Fill, Symbol, Line, Raster, Circle, FillExtrusion, Heatmap, Hillshade, LayerAttr,
  encode,
  background, fill, symbol, line, raster, circle, fillExtrusion, heatmap, hillshade,
  metadata, sourceLayer, minzoom, maxzoom, filter, visible,
  "#;

const MODULE_DOC_HEAD: &str = r#"{-|
Layers specify what is actually rendered on the map and are rendered in order.

Except for layers of the background type, each layer needs to refer to a source. Layers take the data that they get from a source, optionally filter features, and then define how those features are styled.

There are two kinds of properties: *Layout* and *Paint* properties.

Layout properties are applied early in the rendering process and define how data for that layer is passed to the GPU. Changes to a layout property require an asynchronous "layout" step.

Paint properties are applied later in the rendering process. Changes to a paint property are cheap and happen synchronously.


### Working with layers

@docs Layer, SourceId, encode

### Layer Types

@docs background, fill, symbol, line, raster, circle, fillExtrusion, heatmap, hillshade
@docs Background, Fill, Symbol, Line, Raster, Circle, FillExtrusion, Heatmap, Hillshade

### General Attributes

@docs LayerAttr
@docs metadata, sourceLayer, minzoom, maxzoom, filter, visible

"#;

const PRELUDE: &str = r#"import Array exposing (Array)
import Json.Encode as Encode exposing (Value)
import Mapbox.Expression as Expression exposing (Anchor, Auto, CameraExpression, Color, DataExpression, Expression, LineCap, LineJoin, Position, RasterResampling, SymbolPlacement, TextFit, TextJustify, TextTransform, FormattedText, SymbolZOrder)

{-| Represents a layer. -}
type Layer
    = Layer Value

{-| All layers (except background layers) need a source -}
type alias SourceId = String

{-| -}
type Background
    = BackgroundLayer

{-| -}
type Fill
    = FillLayer

{-| -}
type Symbol
    = SymbolLayer

{-| -}
type Line
    = LineLayer

{-| -}
type Raster
    = RasterLayer

{-| -}
type Circle
    = CircleLayer

{-| -}
type FillExtrusion
    = FillExtrusionLayer

{-| -}
type Heatmap
    = HeatmapLayer

{-| -}
type Hillshade
    = HillshadeLayer

{-| Turns a layer into JSON -}
encode : Layer -> Value
encode (Layer value) =
    value


layerImpl tipe id source attrs =
    [ ( "type", Encode.string tipe )
    , ( "id", Encode.string id )
    , ( "source", Encode.string source)
    ]
        ++ encodeAttrs attrs
        |> Encode.object
        |> Layer


encodeAttrs attrs =
    let
        { top, layout, paint } =
            List.foldl
                (\attr lists ->
                    case attr of
                        Top key val ->
                            { lists | top = ( key, val ) :: lists.top }

                        Paint key val ->
                            { lists | paint = ( key, val ) :: lists.paint }

                        Layout key val ->
                            { lists | layout = ( key, val ) :: lists.layout }
                )
                { top = [], layout = [], paint = [] }
                attrs
    in
        ( "layout", Encode.object layout ) :: ( "paint", Encode.object paint ) :: top

{-| The background color or pattern of the map. -}
background : String -> List (LayerAttr Background) -> Layer
background id attrs =
    [ ( "type", Encode.string "background" )
    , ( "id", Encode.string id )
    ]
        ++ encodeAttrs attrs
        |> Encode.object
        |> Layer

{-| A filled polygon with an optional stroked border. -}
fill : String -> SourceId -> List (LayerAttr Fill) -> Layer
fill =
    layerImpl "fill"

{-| A stroked line. -}
line : String  -> SourceId -> List (LayerAttr Line) -> Layer
line =
    layerImpl "line"

{-| An icon or a text label. -}
symbol : String  -> SourceId -> List (LayerAttr Symbol) -> Layer
symbol =
    layerImpl "symbol"

{-| Raster map textures such as satellite imagery. -}
raster : String -> SourceId -> List (LayerAttr Raster) -> Layer
raster =
    layerImpl "raster"

{-| A filled circle. -}
circle : String -> SourceId -> List (LayerAttr Circle) -> Layer
circle =
    layerImpl "circle"

{-| An extruded (3D) polygon. -}
fillExtrusion : String -> SourceId -> List (LayerAttr FillExtrusion) -> Layer
fillExtrusion =
    layerImpl "fill-extrusion"

{-| A heatmap. -}
heatmap : String -> SourceId -> List (LayerAttr Heatmap) -> Layer
heatmap =
    layerImpl "heatmap"

{-| Client-side hillshading visualization based on DEM data. Currently, the implementation only supports Mapbox Terrain RGB and Mapzen Terrarium tiles. -}
hillshade : String -> SourceId -> List (LayerAttr Hillshade) -> Layer
hillshade =
    layerImpl "hillshade"

{-| -}
type LayerAttr tipe
    = Top String Value
    | Paint String Value
    | Layout String Value



-- General Attributes

{-| Arbitrary properties useful to track with the layer, but do not influence rendering. Properties should be prefixed to avoid collisions, like 'mapbox:'. -}
metadata : Value -> LayerAttr all
metadata =
    Top "metadata"


{-| Layer to use from a vector tile source. Required for vector tile sources; prohibited for all other source types, including GeoJSON sources. -}
sourceLayer : String -> LayerAttr all
sourceLayer =
    Encode.string >> Top "source-layer"

{-| The minimum zoom level for the layer. At zoom levels less than the minzoom, the layer will be hidden. A number between 0 and 24 inclusive. -}
minzoom : Float -> LayerAttr all
minzoom =
    Encode.float >> Top "minzoom"

{-| The maximum zoom level for the layer. At zoom levels equal to or greater than the maxzoom, the layer will be hidden. A number between 0 and 24 inclusive. -}
maxzoom : Float -> LayerAttr all
maxzoom =
    Encode.float >> Top "maxzoom"

{-| A expression specifying conditions on source features. Only features that match the filter are displayed. -}
filter : Expression any Bool -> LayerAttr all
filter =
    Expression.encode >> Top "filter"

{-| Whether this layer is displayed. -}
visible : Expression CameraExpression Bool -> LayerAttr any
visible vis =
    Layout "visibility" <| Expression.encode <| Expression.ifElse vis (Expression.str "visible") (Expression.str "none")"#;

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SPEC: &str = r##"{
        "layout": ["layout_fill", "layout_line"],
        "paint": ["paint_fill", "paint_line"],
        "layout_fill": {
            "fill-sort-key": {
                "type": "number",
                "doc": "Sorts features in ascending order based on this value."
            },
            "visibility": {
                "type": "enum",
                "values": {"visible": {"doc": "Shown."}, "none": {"doc": "Hidden."}},
                "default": "visible",
                "doc": "Whether this layer is displayed."
            }
        },
        "paint_fill": {
            "fill-color": {
                "type": "color",
                "doc": "The color of the filled part of this layer.",
                "default": "#000000",
                "requires": [{"!": "fill-pattern"}],
                "sdk-support": {"data-driven styling": {"js": "0.19.0"}}
            },
            "fill-antialias": {
                "type": "boolean",
                "doc": "Whether or not the fill should be antialiased.",
                "default": true
            }
        },
        "layout_line": {
            "line-cap": {
                "type": "enum",
                "values": {
                    "butt": {"doc": "A cap with a squared-off end."},
                    "round": {"doc": "A cap with a rounded end."},
                    "square": {"doc": "A cap with a squared-off end drawn beyond the endpoint."}
                },
                "default": "butt",
                "doc": "The display of line endings."
            }
        },
        "paint_line": {
            "line-width": {
                "type": "number",
                "doc": "Stroke thickness.",
                "default": 1,
                "minimum": 0,
                "units": "pixels",
                "sdk-support": {"data-driven styling": {"js": "0.39.0"}}
            }
        }
    }"##;

    fn generate_sample() -> String {
        let schema = StyleSchema::from_json(SAMPLE_SPEC).unwrap();
        generate(&schema, &EnumRegistry::standard()).unwrap()
    }

    #[test]
    fn bindings_carry_type_and_breadth() {
        let out = generate_sample();
        assert!(
            out.contains("fillSortKey : Expression CameraExpression Float -> LayerAttr Fill"),
            "missing fillSortKey signature:\n{out}"
        );
        assert!(
            out.contains("fillColor : Expression any Color -> LayerAttr Fill"),
            "missing fillColor signature:\n{out}"
        );
        assert!(
            out.contains("lineCap : Expression CameraExpression LineCap -> LayerAttr Line"),
            "missing lineCap signature:\n{out}"
        );
    }

    #[test]
    fn bodies_wrap_the_schema_name_and_binding_class() {
        let out = generate_sample();
        assert!(out.contains("fillSortKey =\n    Expression.encode >> Layout \"fill-sort-key\""));
        assert!(out.contains("fillColor =\n    Expression.encode >> Paint \"fill-color\""));
    }

    #[test]
    fn sections_are_banner_commented() {
        let out = generate_sample();
        assert!(out.contains("\n-- Fill\n"), "missing Fill banner:\n{out}");
        assert!(out.contains("\n-- Line\n"), "missing Line banner:\n{out}");
    }

    #[test]
    fn bindings_are_sorted_by_identifier_within_a_section() {
        let out = generate_sample();
        let antialias = out.find("fillAntialias : Expression").unwrap();
        let color = out.find("fillColor : Expression").unwrap();
        let sort_key = out.find("fillSortKey : Expression").unwrap();
        assert!(antialias < color && color < sort_key, "section not sorted:\n{out}");
    }

    #[test]
    fn exposing_list_and_doc_index_mirror_the_sorted_identifiers() {
        let out = generate_sample();
        assert!(
            out.contains("fillAntialias, fillColor, fillSortKey"),
            "exposing list not sorted:\n{out}"
        );
        assert!(out.contains("### Fill Attributes\n\n@docs fillAntialias, fillColor, fillSortKey"));
        assert!(out.contains("### Line Attributes\n\n@docs lineCap, lineWidth"));
    }

    #[test]
    fn general_attributes_are_always_present() {
        let out = generate_sample();
        for attr in GENERAL_ATTRIBUTES {
            assert!(out.contains(&format!("\n{attr} :")), "missing general attribute {attr}");
        }
        // Present even for an empty schema.
        let empty = StyleSchema::from_json(r#"{"layout": [], "paint": []}"#).unwrap();
        let out = generate(&empty, &EnumRegistry::standard()).unwrap();
        for attr in GENERAL_ATTRIBUTES {
            assert!(out.contains(&format!("\n{attr} :")), "missing general attribute {attr}");
        }
    }

    #[test]
    fn visibility_is_never_a_generated_binding() {
        let out = generate_sample();
        assert!(!out.contains("visibility :"), "visibility leaked:\n{out}");
        // The hand-authored replacement is present instead.
        assert!(out.contains("visible : Expression CameraExpression Bool -> LayerAttr any"));
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(generate_sample(), generate_sample());
    }

    #[test]
    fn output_ends_with_single_trailing_newline() {
        let out = generate_sample();
        assert!(out.ends_with('\n'));
        assert!(!out.ends_with("\n\n"));
    }

    #[test]
    fn duplicate_identifiers_within_a_category_are_fatal() {
        let spec = r#"{
            "layout": ["layout_fill"], "paint": ["paint_fill"],
            "layout_fill": {"fill-opacity": {"type": "number", "doc": ""}},
            "paint_fill": {"fill-opacity": {"type": "number", "doc": ""}}
        }"#;
        let schema = StyleSchema::from_json(spec).unwrap();
        let err = generate(&schema, &EnumRegistry::standard()).unwrap_err();
        match err {
            CodegenError::IdentifierCollision { category, ident, .. } => {
                assert_eq!(category, "Fill");
                assert_eq!(ident, "fillOpacity");
            }
            other => panic!("expected IdentifierCollision, got {other}"),
        }
    }

    #[test]
    fn shadowing_a_general_attribute_is_fatal() {
        let spec = r#"{
            "layout": ["layout_fill"], "paint": [],
            "layout_fill": {"source-layer": {"type": "string", "doc": ""}}
        }"#;
        let schema = StyleSchema::from_json(spec).unwrap();
        let err = generate(&schema, &EnumRegistry::standard()).unwrap_err();
        match err {
            CodegenError::IdentifierCollision { ident, .. } => assert_eq!(ident, "sourceLayer"),
            other => panic!("expected IdentifierCollision, got {other}"),
        }
    }

    #[test]
    fn unresolvable_enum_set_aborts_the_run() {
        let spec = r#"{
            "layout": ["layout_symbol"], "paint": [],
            "layout_symbol": {
                "symbol-mode": {
                    "type": "enum",
                    "values": {"alpha": {"doc": ""}, "beta": {"doc": ""}},
                    "doc": ""
                }
            }
        }"#;
        let schema = StyleSchema::from_json(spec).unwrap();
        let err = generate(&schema, &EnumRegistry::standard()).unwrap_err();
        assert!(matches!(err, CodegenError::UnknownType { .. }), "got {err}");
    }

    #[test]
    fn enum_value_docs_are_itemized() {
        let out = generate_sample();
        assert!(out.contains("\n- `lineCapButt`: A cap with a squared-off end."));
        assert!(out.contains("Defaults to `lineCapButt`."));
    }

    #[test]
    fn requirement_prose_matches_generated_identifiers() {
        let out = generate_sample();
        assert!(out.contains("Disabled by `fillPattern`."), "{out}");
    }
}
