//! Integration test: snippet text to generated header and schema text.

use bxc_codegen::{
    native_header, render_lines, schema_document, write_if_changed, WriteOutcome,
    DEFAULT_NAMESPACE, SENTINEL_MARKER,
};
use bxc_model::{build, SettingsContainer};
use bxc_schema::{load, ATTRIBUTES_GROUP};

const LOCATOR_AND_MESH: &str = r#"
Attributes {
    LocatorNode {
        pos = (0.0, 0.0, 0.0);
        rot = (0.0, 0.0, 0.0);
        scale = (1.0, 1.0, 1.0);

        MeshNode {
            mesh = ":box";
            material = "red";
        }
    }
}
"#;

fn containers(source: &str) -> Vec<SettingsContainer> {
    let schema = load(source, &[ATTRIBUTES_GROUP]).unwrap();
    build(schema.group(ATTRIBUTES_GROUP).unwrap()).unwrap()
}

#[test]
fn native_header_for_locator_and_mesh() {
    let header = render_lines(&native_header(&containers(LOCATOR_AND_MESH)));
    let expected = r#"#pragma once
#define BX_LOCATORNODE_ATTRIBUTES_DECLARE \
static bx::AttributeIndex attr_pos; \
static bx::AttributeIndex attr_rot; \
static bx::AttributeIndex attr_scale; \
//
#define BX_LOCATORNODE_ATTRIBUTES_DEFINE \
bx::AttributeIndex LocatorNode::attr_pos = -1; \
bx::AttributeIndex LocatorNode::attr_rot = -1; \
bx::AttributeIndex LocatorNode::attr_scale = -1; \
//
#define BX_LOCATORNODE_ATTRIBUTES_CREATE \
{\
attr_pos = bx::nodeAttributeAddFloat3( typeIndex, "pos", float3_t(0.0000f, 0.0000f, 0.0000f) ); \
attr_rot = bx::nodeAttributeAddFloat3( typeIndex, "rot", float3_t(0.0000f, 0.0000f, 0.0000f) ); \
attr_scale = bx::nodeAttributeAddFloat3( typeIndex, "scale", float3_t(1.0000f, 1.0000f, 1.0000f) ); \
}
//

#define BX_MESHNODE_ATTRIBUTES_DECLARE \
static bx::AttributeIndex attr_pos; \
static bx::AttributeIndex attr_rot; \
static bx::AttributeIndex attr_scale; \
static bx::AttributeIndex attr_mesh; \
static bx::AttributeIndex attr_material; \
//
#define BX_MESHNODE_ATTRIBUTES_DEFINE \
bx::AttributeIndex MeshNode::attr_pos = -1; \
bx::AttributeIndex MeshNode::attr_rot = -1; \
bx::AttributeIndex MeshNode::attr_scale = -1; \
bx::AttributeIndex MeshNode::attr_mesh = -1; \
bx::AttributeIndex MeshNode::attr_material = -1; \
//
#define BX_MESHNODE_ATTRIBUTES_CREATE \
{\
attr_pos = bx::nodeAttributeAddFloat3( typeIndex, "pos", float3_t(0.0000f, 0.0000f, 0.0000f) ); \
attr_rot = bx::nodeAttributeAddFloat3( typeIndex, "rot", float3_t(0.0000f, 0.0000f, 0.0000f) ); \
attr_scale = bx::nodeAttributeAddFloat3( typeIndex, "scale", float3_t(1.0000f, 1.0000f, 1.0000f) ); \
attr_mesh = bx::nodeAttributeAddString( typeIndex, "mesh", ":box" ); \
attr_material = bx::nodeAttributeAddString( typeIndex, "material", "red" ); \
}
//

"#;
    assert_eq!(header, expected);
}

#[test]
fn schema_types_for_locator_and_mesh() {
    let lines = schema_document(&containers(LOCATOR_AND_MESH), DEFAULT_NAMESPACE);
    let text = render_lines(&lines);

    let locator = "<xs:complexType name=\"LocatorNode\">\n\
\t<xs:complexContent>\n\
\t\t<xs:extension base=\"nodeType\">\n\
\t\t\t<xs:attribute name=\"pos\" type=\"float3_t\" default=\"0 0 0\"/>\n\
\t\t\t<xs:attribute name=\"rot\" type=\"float3_t\" default=\"0 0 0\"/>\n\
\t\t\t<xs:attribute name=\"scale\" type=\"float3_t\" default=\"1 1 1\"/>\n\
\t\t</xs:extension>\n\
\t</xs:complexContent>\n\
</xs:complexType>\n";
    let mesh = "<xs:complexType name=\"MeshNode\">\n\
\t<xs:complexContent>\n\
\t\t<xs:extension base=\"LocatorNode\">\n\
\t\t\t<xs:attribute name=\"mesh\" type=\"xs:string\" default=\":box\"/>\n\
\t\t\t<xs:attribute name=\"material\" type=\"xs:string\" default=\"red\"/>\n\
\t\t</xs:extension>\n\
\t</xs:complexContent>\n\
</xs:complexType>\n";

    assert!(text.contains(locator), "{text}");
    assert!(text.contains(mesh), "{text}");
    assert!(text.find(locator) < text.find(mesh));
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n<xs:schema\n"));
    assert!(text.ends_with("\n</xs:schema>\n"));
}

#[test]
fn sibling_fields_of_different_kinds_both_emit() {
    let source = r#"
        Attributes {
            LocatorNode {
                PointNode { pos = (0.0, 0.0, 0.0); }
                GridNode { pos = 3; }
            }
        }
    "#;
    let text = render_lines(&native_header(&containers(source)));
    assert!(text.contains("attr_pos = bx::nodeAttributeAddFloat3( typeIndex, \"pos\""));
    assert!(text.contains("attr_pos = bx::nodeAttributeAddInt( typeIndex, \"pos\", 3 );"));
}

#[test]
fn regenerated_header_keeps_hand_written_tail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nodes_attributes.h");
    let lines = native_header(&containers(LOCATOR_AND_MESH));

    assert_eq!(write_if_changed(&path, &lines).unwrap(), WriteOutcome::Written);
    let mut edited = std::fs::read_to_string(&path).unwrap();
    edited.push_str(&format!("\n{SENTINEL_MARKER}\n#define EXTRA 1\n"));
    std::fs::write(&path, &edited).unwrap();

    assert_eq!(write_if_changed(&path, &lines).unwrap(), WriteOutcome::Unmodified);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), edited);
}
