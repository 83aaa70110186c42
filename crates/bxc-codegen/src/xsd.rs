//! # Schema Backend
//!
//! Emits an XML Schema document describing each node type as a complex type
//! that extends its base type. Only **direct** fields appear on a type;
//! inherited attributes come in through `xs:extension`.
//!
//! The root base type `nodeType` is declared by the editor's shared schema
//! and is referenced here, never defined.

use bxc_core::canonical::{schema_components, schema_float};
use bxc_core::{FieldDeclaration, FieldValue, ValueKind};
use bxc_model::SettingsContainer;

/// Target namespace used when the caller does not override it.
pub const DEFAULT_NAMESPACE: &str = "bitBox";

/// The W3C XML Schema namespace bound to the `xs` prefix.
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// A complete schema document: header, shared vector types, one complex
/// type per container, footer.
pub fn schema_document(containers: &[SettingsContainer], namespace: &str) -> Vec<String> {
    let mut lines = schema_header(namespace);
    lines.extend(schema_preamble());
    for container in containers {
        lines.extend(emit_schema(container));
    }
    lines.extend(schema_footer());
    lines
}

/// The complex type for one container.
pub fn emit_schema(container: &SettingsContainer) -> Vec<String> {
    let mut lines = Vec::with_capacity(container.direct_fields.len() + 7);
    lines.push(format!(
        "<xs:complexType name=\"{}\">",
        xml_escape(&container.name)
    ));
    lines.push("\t<xs:complexContent>".to_string());
    lines.push(format!(
        "\t\t<xs:extension base=\"{}\">",
        xml_escape(&container.base_name)
    ));
    for field in &container.direct_fields {
        lines.push(format!("\t\t\t{}", attribute_line(field)));
    }
    lines.push("\t\t</xs:extension>".to_string());
    lines.push("\t</xs:complexContent>".to_string());
    lines.push("</xs:complexType>".to_string());
    lines.push(String::new());
    lines
}

/// Schema type name for a value kind.
pub fn schema_type_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Float => "xs:float",
        ValueKind::Int => "xs:int",
        ValueKind::Bool => "xs:boolean",
        ValueKind::Enum => "xs:int",
        ValueKind::Float3 => "float3_t",
        ValueKind::Float4 => "float4_t",
        ValueKind::Color => "color_t",
        ValueKind::String => "xs:string",
    }
}

/// Lexical default for a value, as it appears in the `default` attribute.
pub fn schema_default(value: &FieldValue) -> String {
    match value {
        FieldValue::Float(v) => schema_float(*v),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Enum { variant, .. } => variant.to_string(),
        FieldValue::Float3(c) => schema_components(c),
        FieldValue::Float4(c) => schema_components(c),
        FieldValue::Color(rgb) => schema_components(rgb),
        FieldValue::String(s) => xml_escape(s),
    }
}

fn attribute_line(field: &FieldDeclaration) -> String {
    format!(
        "<xs:attribute name=\"{}\" type=\"{}\" default=\"{}\"/>",
        xml_escape(&field.name),
        schema_type_name(field.kind()),
        schema_default(&field.value)
    )
}

fn schema_header(namespace: &str) -> Vec<String> {
    let ns = xml_escape(namespace);
    vec![
        "<?xml version=\"1.0\" encoding=\"utf-8\" ?>".to_string(),
        "<xs:schema".to_string(),
        "\telementFormDefault=\"qualified\"".to_string(),
        format!("\ttargetNamespace=\"{ns}\""),
        format!("\txmlns=\"{ns}\""),
        format!("\txmlns:xs=\"{XS_NAMESPACE}\" >"),
        String::new(),
    ]
}

fn schema_preamble() -> Vec<String> {
    let mut lines = vec![
        "<xs:simpleType name=\"floatList_t\">".to_string(),
        "\t<xs:list itemType=\"xs:float\"/>".to_string(),
        "</xs:simpleType>".to_string(),
        String::new(),
    ];
    for (name, length) in [("float3_t", 3), ("float4_t", 4), ("color_t", 3)] {
        lines.push(format!("<xs:simpleType name=\"{name}\">"));
        lines.push("\t<xs:restriction base=\"floatList_t\">".to_string());
        lines.push(format!("\t\t<xs:length value=\"{length}\"/>"));
        lines.push("\t</xs:restriction>".to_string());
        lines.push("</xs:simpleType>".to_string());
        lines.push(String::new());
    }
    lines
}

fn schema_footer() -> Vec<String> {
    vec![String::new(), "</xs:schema>".to_string()]
}

/// Escape text for use inside a double-quoted XML attribute value.
fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
    out
}
