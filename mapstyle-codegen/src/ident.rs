//! Identifier Transformer
//!
//! Converts schema-native hyphenated tokens into Elm identifiers. The same
//! literal may transform differently depending on whether it names a
//! property, an enumeration value, or needs disambiguation against a sibling
//! enumeration, so the transform is context-sensitive but pure: identical
//! `(token, context)` pairs always produce identical identifiers.

use crate::registry::{EnumRegistry, EnumShape};

/// Literals whose cased form would collide with an Elm reserved word.
/// Substituted before casing.
const KEYWORD_SYNONYMS: &[(&str, &str)] = &[("in", "inside"), ("type", "kind")];

/// Transform a schema token into an Elm identifier.
///
/// - With an enumeration context the token is qualified by the shape's
///   literal prefix: `identifier("butt", Some(line_cap), …)` → `lineCapButt`.
/// - Without context, ambiguous bare enumeration literals are qualified via
///   the registry's flat literal map: `round` → `lineJoinRound`.
/// - The empty token renders as the empty-literal token `""`, never as an
///   empty identifier.
pub fn identifier(token: &str, context: Option<&EnumShape>, registry: &EnumRegistry) -> String {
    if token.is_empty() {
        return "\"\"".to_string();
    }
    let token = keyword_synonym(token);
    match context {
        Some(shape) => camel(&format!("{} {}", shape.literal_prefix, token)),
        None => match registry.bare_prefix(token) {
            Some(prefix) => camel(&format!("{prefix} {token}")),
            None => camel(token),
        },
    }
}

/// Camel-case a token: split on hyphen, slash, space, and underscore
/// boundaries, lower-case the first letter of the first segment, upper-case
/// the first letter of every later segment, and concatenate.
///
/// Idempotent on already-cased identifiers.
pub fn camel(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for (i, segment) in token
        .split(['-', '/', ' ', '_'])
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        let mut chars = segment.chars();
        match chars.next() {
            None => {}
            Some(first) => {
                if i == 0 {
                    out.extend(first.to_lowercase());
                } else {
                    out.extend(first.to_uppercase());
                }
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

/// Title-case a category token: every segment upper-cased at its first
/// letter, the rest lowered, segments concatenated. `fill-extrusion` →
/// `FillExtrusion`.
pub fn title_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for segment in token.split(['-', ' ']).filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

fn keyword_synonym(token: &str) -> &str {
    KEYWORD_SYNONYMS
        .iter()
        .find(|(keyword, _)| *keyword == token)
        .map(|(_, synonym)| *synonym)
        .unwrap_or(token)
}
