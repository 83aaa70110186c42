//! # Native Backend
//!
//! Emits the engine-side header. For each node type `Name` three macros are
//! produced, all keyed by the upper-cased type name:
//!
//! ```text
//! #define BX_NAME_ATTRIBUTES_DECLARE \     static attribute-index slots
//! #define BX_NAME_ATTRIBUTES_DEFINE \      out-of-line definitions, = -1
//! #define BX_NAME_ATTRIBUTES_CREATE \      registration calls into the slots
//! ```
//!
//! Every macro covers the flattened field set: a derived node class
//! registers its inherited attributes under its own type index.

use bxc_core::canonical::{native_components, native_float};
use bxc_core::{FieldDeclaration, FieldValue};
use bxc_model::SettingsContainer;

/// First line of every generated header.
pub const HEADER_PRELUDE: &str = "#pragma once";

/// Sentinel value of an unregistered attribute index.
pub const INVALID_ATTRIBUTE_INDEX: &str = "-1";

/// The complete header for a list of containers.
pub fn native_header(containers: &[SettingsContainer]) -> Vec<String> {
    let mut lines = vec![HEADER_PRELUDE.to_string()];
    for container in containers {
        lines.extend(emit_native(container));
    }
    lines
}

/// The three macro blocks for one container.
pub fn emit_native(container: &SettingsContainer) -> Vec<String> {
    let ident = container.name.to_uppercase();
    let fields = &container.flattened_fields;
    let mut lines = Vec::with_capacity(fields.len() * 3 + 9);

    lines.push(format!("#define BX_{ident}_ATTRIBUTES_DECLARE \\"));
    for field in fields {
        lines.push(format!("static bx::AttributeIndex attr_{}; \\", field.name));
    }
    lines.push("//".to_string());

    lines.push(format!("#define BX_{ident}_ATTRIBUTES_DEFINE \\"));
    for field in fields {
        lines.push(format!(
            "bx::AttributeIndex {}::attr_{} = {INVALID_ATTRIBUTE_INDEX}; \\",
            container.name, field.name
        ));
    }
    lines.push("//".to_string());

    lines.push(format!("#define BX_{ident}_ATTRIBUTES_CREATE \\"));
    lines.push("{\\".to_string());
    for field in fields {
        lines.push(format!("attr_{} = {} \\", field.name, creation_call(field)));
    }
    lines.push("}".to_string());
    lines.push("//".to_string());
    lines.push(String::new());

    lines
}

/// The registration call for one field, selected by its value kind.
pub fn creation_call(field: &FieldDeclaration) -> String {
    let name = c_string_literal(&field.name);
    match &field.value {
        FieldValue::Float(v) => format!(
            "bx::nodeAttributeAddFloat( typeIndex, {name}, {} );",
            native_float(*v)
        ),
        FieldValue::Int(v) => format!("bx::nodeAttributeAddInt( typeIndex, {name}, {v} );"),
        FieldValue::Bool(b) => format!(
            "bx::nodeAttributeAddInt( typeIndex, {name}, {} );",
            u8::from(*b)
        ),
        // The engine stores enums as ints; registration always starts at 0.
        FieldValue::Enum { .. } => format!("bx::nodeAttributeAddInt( typeIndex, {name}, 0 );"),
        FieldValue::Float3(c) => format!(
            "bx::nodeAttributeAddFloat3( typeIndex, {name}, float3_t({}) );",
            native_components(c)
        ),
        FieldValue::Float4(c) => format!(
            "bx::nodeAttributeAddFloat4( typeIndex, {name}, float4_t({}) );",
            native_components(c)
        ),
        FieldValue::Color(rgb) => format!(
            "bx::nodeAttributeAddFloat3( typeIndex, {name}, float3_t({}) );",
            native_components(rgb)
        ),
        FieldValue::String(s) => format!(
            "bx::nodeAttributeAddString( typeIndex, {name}, {} );",
            c_string_literal(s)
        ),
    }
}

/// Quote `text` as a C string literal.
fn c_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
