//! # Schema Loader
//!
//! Turns snippet text into a [`Schema`]. Parsing is purely syntactic; this
//! module gives the syntax tree its meaning:
//!
//! - classifies each field's literal into one of the eight value kinds,
//!   rejecting every other shape with `UnsupportedFieldType`;
//! - resolves `Enum::Variant` references against declared enums;
//! - applies declaration-site markers over documented metadata defaults;
//! - resolves each node type's base from lexical nesting.
//!
//! Duplicate field names are deliberately left in place here. Detecting
//! them needs the inherited field set, which is the model builder's job.

use bxc_core::field::FieldMetadata;
use bxc_core::{
    Bounds, EnumType, FieldDeclaration, FieldValue, SchemaError, SourceLocation, ValueKind,
    ROOT_TYPE_NAME,
};

use crate::ast::{Document, EnumDecl, FieldItem, GroupBlock, Literal, Marker, NodeBlock};
use crate::declaration::{DeclarationGroup, NodeTypeDeclaration, Schema};
use crate::parser::parse_document;

/// Load a snippet, keeping only the groups named in `group_names`.
///
/// # Errors
///
/// - `Parse` for malformed text, bad markers, unknown enum variants and
///   out-of-range numbers.
/// - `UnsupportedFieldType` for values outside the eight kinds.
/// - `MissingDeclarationGroup` when none of `group_names` is present.
pub fn load(source: &str, group_names: &[&str]) -> Result<Schema, SchemaError> {
    let doc = parse_document(source)?;
    load_document(&doc, group_names)
}

/// Give meaning to an already-parsed document.
pub fn load_document(doc: &Document, group_names: &[&str]) -> Result<Schema, SchemaError> {
    let file_enums = convert_enums(&doc.enums, &[])?;
    let mut groups: Vec<DeclarationGroup> = Vec::new();

    for block in &doc.groups {
        if !group_names.contains(&block.name.as_str()) {
            tracing::debug!(group = %block.name, "skipping unrequested declaration group");
            continue;
        }
        if groups.iter().any(|g| g.name == block.name) {
            return Err(SchemaError::parse(
                block.location,
                format!("declaration group `{}` appears more than once", block.name),
            ));
        }
        let group = convert_group(block, &file_enums)?;
        tracing::debug!(
            group = %group.name,
            node_types = group.preorder().len(),
            enums = group.enums.len(),
            "loaded declaration group"
        );
        groups.push(group);
    }

    if groups.is_empty() {
        return Err(SchemaError::MissingDeclarationGroup {
            expected: group_names.iter().map(|s| s.to_string()).collect(),
        });
    }
    Ok(Schema { groups })
}

fn convert_enums(decls: &[EnumDecl], visible: &[EnumType]) -> Result<Vec<EnumType>, SchemaError> {
    let mut out: Vec<EnumType> = Vec::new();
    for decl in decls {
        if visible.iter().chain(out.iter()).any(|e| e.name == decl.name) {
            return Err(SchemaError::parse(
                decl.location,
                format!("enum `{}` is declared more than once", decl.name),
            ));
        }
        if decl.variants.is_empty() {
            return Err(SchemaError::parse(
                decl.location,
                format!("enum `{}` declares no variants", decl.name),
            ));
        }
        let mut variants: Vec<String> = Vec::with_capacity(decl.variants.len());
        for (variant, location) in &decl.variants {
            if variants.contains(variant) {
                return Err(SchemaError::parse(
                    *location,
                    format!("enum `{}` declares variant `{variant}` twice", decl.name),
                ));
            }
            variants.push(variant.clone());
        }
        out.push(EnumType {
            name: decl.name.clone(),
            variants,
        });
    }
    Ok(out)
}

fn convert_group(block: &GroupBlock, file_enums: &[EnumType]) -> Result<DeclarationGroup, SchemaError> {
    let mut enums = file_enums.to_vec();
    enums.extend(convert_enums(&block.enums, file_enums)?);

    let roots = block
        .nodes
        .iter()
        .map(|node| convert_node(node, ROOT_TYPE_NAME, &enums))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DeclarationGroup {
        name: block.name.clone(),
        location: block.location,
        enums,
        roots,
    })
}

fn convert_node(
    block: &NodeBlock,
    base_name: &str,
    enums: &[EnumType],
) -> Result<NodeTypeDeclaration, SchemaError> {
    if block.name == ROOT_TYPE_NAME {
        return Err(SchemaError::parse(
            block.location,
            format!("`{ROOT_TYPE_NAME}` is the reserved root type and cannot be declared"),
        ));
    }

    let fields = block
        .fields
        .iter()
        .map(|item| convert_field(item, &block.name, enums))
        .collect::<Result<Vec<_>, _>>()?;

    let children = block
        .children
        .iter()
        .map(|child| convert_node(child, &block.name, enums))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NodeTypeDeclaration {
        name: block.name.clone(),
        base_name: base_name.to_string(),
        fields,
        children,
        location: block.location,
    })
}

fn convert_field(
    item: &FieldItem,
    type_name: &str,
    enums: &[EnumType],
) -> Result<FieldDeclaration, SchemaError> {
    let value = classify(item, enums)?;
    let kind = value.kind();
    let mut metadata = FieldMetadata::defaults_for(&item.name, type_name);
    let mut bounds = Bounds::default_for(kind);
    apply_markers(item, kind, &mut metadata, &mut bounds)?;

    Ok(FieldDeclaration {
        name: item.name.clone(),
        value,
        metadata,
        bounds,
        location: item.location,
    })
}

/// Map a literal's shape to a typed value.
fn classify(item: &FieldItem, enums: &[EnumType]) -> Result<FieldValue, SchemaError> {
    let at = item.value_location;
    let unsupported = || SchemaError::UnsupportedFieldType {
        field: item.name.clone(),
        found: item.value.describe(),
        location: item.location,
    };

    match &item.value {
        Literal::Float(v) => Ok(FieldValue::Float(to_f32(*v, at)?)),
        Literal::Int(v) => i32::try_from(*v).map(FieldValue::Int).map_err(|_| {
            SchemaError::parse(at, format!("integer {v} does not fit in 32 bits"))
        }),
        Literal::Bool(b) => Ok(FieldValue::Bool(*b)),
        Literal::Str(s) => Ok(FieldValue::String(s.clone())),
        Literal::Tuple(items) => match float_components(items, at)? {
            Some(c) if c.len() == 3 => Ok(FieldValue::Float3([c[0], c[1], c[2]])),
            Some(c) if c.len() == 4 => Ok(FieldValue::Float4([c[0], c[1], c[2], c[3]])),
            _ => Err(unsupported()),
        },
        Literal::Call { name, args } if name == "rgb" => match float_components(args, at)? {
            Some(c) if c.len() == 3 => Ok(FieldValue::Color([c[0], c[1], c[2]])),
            _ => Err(unsupported()),
        },
        Literal::Path { ty, variant } => {
            let Some(enum_type) = enums.iter().find(|e| &e.name == ty) else {
                return Err(unsupported());
            };
            let ordinal = enum_type.ordinal(variant).ok_or_else(|| {
                SchemaError::parse(at, format!("enum `{ty}` has no variant `{variant}`"))
            })?;
            Ok(FieldValue::Enum {
                ty: enum_type.clone(),
                variant: ordinal,
            })
        }
        Literal::Call { .. } | Literal::List(_) | Literal::Ident(_) => Err(unsupported()),
    }
}

/// All-numeric component lists as `f32`s; `None` if any component is not a number.
fn float_components(items: &[Literal], at: SourceLocation) -> Result<Option<Vec<f32>>, SchemaError> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item.as_number() {
            Some(n) => out.push(to_f32(n, at)?),
            None => return Ok(None),
        }
    }
    Ok(Some(out))
}

fn to_f32(value: f64, at: SourceLocation) -> Result<f32, SchemaError> {
    let narrowed = value as f32;
    if narrowed.is_finite() {
        Ok(narrowed)
    } else {
        Err(SchemaError::parse(
            at,
            format!("{value} is out of range for a 32-bit float"),
        ))
    }
}

fn apply_markers(
    item: &FieldItem,
    kind: ValueKind,
    metadata: &mut FieldMetadata,
    bounds: &mut Bounds,
) -> Result<(), SchemaError> {
    let mut seen: Vec<&str> = Vec::new();
    for marker in &item.markers {
        if seen.contains(&marker.name.as_str()) {
            return Err(SchemaError::parse(
                marker.location,
                format!("marker @{} is repeated on field `{}`", marker.name, item.name),
            ));
        }
        seen.push(&marker.name);

        match marker.name.as_str() {
            "display" => metadata.display_name = string_arg(marker)?,
            "help" => metadata.help_text = string_arg(marker)?,
            "group" => metadata.group = string_arg(marker)?,
            "shader_constant" => metadata.use_as_shader_constant = bool_arg(marker)?,
            "min" | "max" | "step" => apply_bound(marker, item, kind, bounds)?,
            other => {
                return Err(SchemaError::parse(
                    marker.location,
                    format!("unknown marker @{other}"),
                ));
            }
        }
    }

    match bounds {
        Bounds::Float(r) if r.min > r.max => Err(SchemaError::parse(
            item.location,
            format!("field `{}` has @min greater than @max", item.name),
        )),
        Bounds::Float(r) if r.step <= 0.0 => Err(SchemaError::parse(
            item.location,
            format!("field `{}` needs a positive @step", item.name),
        )),
        Bounds::Int(r) if r.min > r.max => Err(SchemaError::parse(
            item.location,
            format!("field `{}` has @min greater than @max", item.name),
        )),
        _ => Ok(()),
    }
}

fn apply_bound(
    marker: &Marker,
    item: &FieldItem,
    kind: ValueKind,
    bounds: &mut Bounds,
) -> Result<(), SchemaError> {
    let applies = if marker.name == "step" {
        kind.has_step()
    } else {
        kind.is_bounded()
    };
    if !applies {
        return Err(SchemaError::parse(
            marker.location,
            format!(
                "@{} does not apply to {kind} field `{}`",
                marker.name, item.name
            ),
        ));
    }

    let arg = single_arg(marker)?;
    match bounds {
        Bounds::Float(range) => {
            let n = arg.as_number().ok_or_else(|| {
                SchemaError::parse(marker.location, format!("@{} expects a number", marker.name))
            })?;
            let n = to_f32(n, marker.location)?;
            match marker.name.as_str() {
                "min" => range.min = n,
                "max" => range.max = n,
                _ => range.step = n,
            }
        }
        Bounds::Int(range) => {
            let n = match arg {
                Literal::Int(v) => i32::try_from(*v).ok(),
                _ => None,
            }
            .ok_or_else(|| {
                SchemaError::parse(
                    marker.location,
                    format!("@{} on int field `{}` expects a 32-bit integer", marker.name, item.name),
                )
            })?;
            if marker.name == "min" {
                range.min = n;
            } else {
                range.max = n;
            }
        }
        Bounds::None => {}
    }
    Ok(())
}

fn single_arg(marker: &Marker) -> Result<&Literal, SchemaError> {
    match marker.args.as_slice() {
        [arg] => Ok(arg),
        args => Err(SchemaError::parse(
            marker.location,
            format!("@{} expects one argument, found {}", marker.name, args.len()),
        )),
    }
}

fn string_arg(marker: &Marker) -> Result<String, SchemaError> {
    match single_arg(marker)? {
        Literal::Str(s) => Ok(s.clone()),
        other => Err(SchemaError::parse(
            marker.location,
            format!("@{} expects a string, found {}", marker.name, other.describe()),
        )),
    }
}

fn bool_arg(marker: &Marker) -> Result<bool, SchemaError> {
    match single_arg(marker)? {
        Literal::Bool(b) => Ok(*b),
        other => Err(SchemaError::parse(
            marker.location,
            format!("@{} expects true or false, found {}", marker.name, other.describe()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{ATTRIBUTES_GROUP, DEFAULT_GROUPS, SETTINGS_GROUP};
    use bxc_core::{FloatRange, IntRange};

    fn load_attrs(source: &str) -> Result<DeclarationGroup, SchemaError> {
        let schema = load(source, &DEFAULT_GROUPS)?;
        Ok(schema.group(ATTRIBUTES_GROUP).cloned().expect("attributes group"))
    }

    fn single_field(body: &str) -> Result<FieldDeclaration, SchemaError> {
        let group = load_attrs(&format!("Attributes {{ N {{ {body} }} }}"))?;
        Ok(group.roots[0].fields[0].clone())
    }

    #[test]
    fn literal_shapes_select_kinds() {
        let cases = [
            ("a = 1.5;", ValueKind::Float),
            ("a = 2f;", ValueKind::Float),
            ("a = 7;", ValueKind::Int),
            ("a = false;", ValueKind::Bool),
            ("a = (1, 2, 3);", ValueKind::Float3),
            ("a = (1, 2, 3, 4);", ValueKind::Float4),
            ("a = rgb(1, 0.5, 0);", ValueKind::Color),
            ("a = \"text\";", ValueKind::String),
        ];
        for (body, kind) in cases {
            let field = single_field(body).unwrap();
            assert_eq!(field.kind(), kind, "{body}");
        }
    }

    #[test]
    fn enum_reference_resolves_ordinal_and_domain() {
        let group = load_attrs(
            "enum Quality { Low, Medium, High }\nAttributes { N { q = Quality::Medium; } }",
        )
        .unwrap();
        match &group.roots[0].fields[0].value {
            FieldValue::Enum { ty, variant } => {
                assert_eq!(ty.name, "Quality");
                assert_eq!(ty.variants, vec!["Low", "Medium", "High"]);
                assert_eq!(*variant, 1);
            }
            other => panic!("expected enum, got {other:?}"),
        }
        assert_eq!(group.enums.len(), 1);
    }

    #[test]
    fn unsupported_shapes_name_the_field() {
        for body in [
            "bad = [1, 2];",
            "bad = null;",
            "bad = (1, 2);",
            "bad = (1, \"x\", 3);",
            "bad = quat(0, 0, 0, 1);",
            "bad = rgb(1, 1);",
            "bad = Unknown::Value;",
        ] {
            match single_field(body) {
                Err(SchemaError::UnsupportedFieldType { field, .. }) => assert_eq!(field, "bad"),
                other => panic!("{body}: expected UnsupportedFieldType, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_enum_variant_is_a_parse_error() {
        let err = load_attrs("enum E { A }\nAttributes { N { e = E::B; } }").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
        assert!(err.to_string().contains("no variant `B`"));
    }

    #[test]
    fn metadata_defaults_apply_without_markers() {
        let field = single_field("castShadows = true;").unwrap();
        assert_eq!(field.metadata.display_name, "Cast Shadows");
        assert_eq!(field.metadata.help_text, "");
        assert_eq!(field.metadata.group, "N");
        assert!(field.metadata.use_as_shader_constant);
        assert_eq!(field.bounds, Bounds::None);
    }

    #[test]
    fn markers_override_metadata_and_bounds() {
        let field = single_field(
            r#"@display("Light Power") @help("Watts") @group("Lighting")
               @min(0) @max(100.0) @step(0.5) @shader_constant(false)
               power = 60.0;"#,
        )
        .unwrap();
        assert_eq!(field.metadata.display_name, "Light Power");
        assert_eq!(field.metadata.help_text, "Watts");
        assert_eq!(field.metadata.group, "Lighting");
        assert!(!field.metadata.use_as_shader_constant);
        assert_eq!(
            field.bounds,
            Bounds::Float(FloatRange {
                min: 0.0,
                max: 100.0,
                step: 0.5
            })
        );
    }

    #[test]
    fn int_bounds_require_integers() {
        let field = single_field("@min(1) @max(8) samples = 4;").unwrap();
        assert_eq!(field.bounds, Bounds::Int(IntRange { min: 1, max: 8 }));
        assert!(single_field("@min(0.5) samples = 4;").is_err());
        assert!(single_field("@step(1) samples = 4;").is_err());
    }

    #[test]
    fn bad_markers_are_rejected() {
        for body in [
            "@min(0) flag = true;",
            "@step(0.1) name = \"x\";",
            "@display(3) a = 1.0;",
            "@help(\"a\") @help(\"b\") a = 1.0;",
            "@tooltip(\"x\") a = 1.0;",
            "@min(5) @max(1) a = 1.0;",
            "@step(0) a = 1.0;",
            "@shader_constant(1) a = 1.0;",
            "@min() a = 1.0;",
        ] {
            assert!(
                matches!(single_field(body), Err(SchemaError::Parse { .. })),
                "{body} should be rejected"
            );
        }
    }

    #[test]
    fn base_names_follow_nesting() {
        let group = load_attrs(
            "Attributes { LocatorNode { pos = (0, 0, 0); MeshNode { mesh = \":box\"; } } LightNode { i = 1.0; } }",
        )
        .unwrap();
        let names: Vec<_> = group
            .preorder()
            .iter()
            .map(|n| (n.name.as_str(), n.base_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("LocatorNode", "nodeType"),
                ("MeshNode", "LocatorNode"),
                ("LightNode", "nodeType"),
            ]
        );
    }

    #[test]
    fn missing_groups_fail() {
        let err = load("Other { N { a = 1; } }", &DEFAULT_GROUPS).unwrap_err();
        match err {
            SchemaError::MissingDeclarationGroup { expected } => {
                assert_eq!(expected, vec!["Settings", "Attributes"]);
            }
            other => panic!("expected MissingDeclarationGroup, got {other:?}"),
        }
        assert!(matches!(
            load("", &DEFAULT_GROUPS),
            Err(SchemaError::MissingDeclarationGroup { .. })
        ));
    }

    #[test]
    fn either_group_alone_is_enough() {
        let schema = load("Settings { S { a = 1; } }", &DEFAULT_GROUPS).unwrap();
        assert!(schema.group(SETTINGS_GROUP).is_some());
        assert!(schema.group(ATTRIBUTES_GROUP).is_none());
    }

    #[test]
    fn repeated_group_is_rejected() {
        let err = load("Attributes { } Attributes { }", &DEFAULT_GROUPS).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn reserved_root_name_is_rejected() {
        let err = load("Attributes { nodeType { } }", &DEFAULT_GROUPS).unwrap_err();
        assert!(err.to_string().contains("reserved root type"));
    }

    #[test]
    fn enum_declaration_errors() {
        assert!(load("enum E { A, A }\nAttributes { }", &DEFAULT_GROUPS).is_err());
        assert!(load("enum E { }\nAttributes { }", &DEFAULT_GROUPS).is_err());
        assert!(load("enum E { A }\nAttributes { enum E { B } }", &DEFAULT_GROUPS).is_err());
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert!(matches!(
            single_field("a = 3000000000;"),
            Err(SchemaError::Parse { .. })
        ));
        assert!(matches!(
            single_field("a = 1e40;"),
            Err(SchemaError::Parse { .. })
        ));
    }

    #[test]
    fn duplicate_fields_survive_loading() {
        let group = load_attrs("Attributes { N { a = 1; a = 2.0; } }").unwrap();
        assert_eq!(group.roots[0].fields.len(), 2);
    }
}
