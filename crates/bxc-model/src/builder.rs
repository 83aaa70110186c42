//! # Attribute Model Builder
//!
//! Pre-order walk over the declaration forest. Each node type starts from
//! its parent's already-flattened field list and appends its own fields,
//! so parents are always processed before their children. Lexical nesting
//! admits no forward references, which makes document order a valid
//! topological order.

use std::collections::HashSet;

use bxc_core::{FieldDeclaration, SchemaError};
use bxc_schema::{DeclarationGroup, NodeTypeDeclaration, Schema};

use crate::container::{AttributeModel, ModelGroup, SettingsContainer};

/// Build the containers of one declaration group, in document order.
///
/// # Errors
///
/// - `DuplicateFieldName` when a field name collides with an inherited
///   field or with another field declared on the same type.
/// - `DuplicateNodeType` when two node types in the group share a name.
pub fn build(group: &DeclarationGroup) -> Result<Vec<SettingsContainer>, SchemaError> {
    let mut containers = Vec::new();
    let mut type_names: HashSet<&str> = HashSet::new();
    for root in &group.roots {
        visit(root, &[], &mut type_names, &mut containers)?;
    }
    tracing::debug!(
        group = %group.name,
        containers = containers.len(),
        "built attribute model"
    );
    Ok(containers)
}

/// Build every group of a loaded schema.
pub fn build_schema(schema: &Schema) -> Result<AttributeModel, SchemaError> {
    let groups = schema
        .groups
        .iter()
        .map(|group| -> Result<ModelGroup, SchemaError> {
            Ok(ModelGroup {
                name: group.name.clone(),
                containers: build(group)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AttributeModel { groups })
}

fn visit<'a>(
    node: &'a NodeTypeDeclaration,
    inherited: &[FieldDeclaration],
    type_names: &mut HashSet<&'a str>,
    out: &mut Vec<SettingsContainer>,
) -> Result<(), SchemaError> {
    if !type_names.insert(node.name.as_str()) {
        return Err(SchemaError::DuplicateNodeType {
            type_name: node.name.clone(),
            location: node.location,
        });
    }

    let mut names: HashSet<&str> = inherited.iter().map(|f| f.name.as_str()).collect();
    for field in &node.fields {
        if !names.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateFieldName {
                type_name: node.name.clone(),
                field_name: field.name.clone(),
                location: field.location,
            });
        }
    }

    let mut flattened = Vec::with_capacity(inherited.len() + node.fields.len());
    flattened.extend_from_slice(inherited);
    flattened.extend_from_slice(&node.fields);

    let container = SettingsContainer {
        name: node.name.clone(),
        base_name: node.base_name.clone(),
        direct_fields: node.fields.clone(),
        flattened_fields: flattened.clone(),
    };
    tracing::trace!(
        node_type = %container.name,
        base = %container.base_name,
        direct = container.direct_fields.len(),
        inherited = container.inherited_count(),
        "resolved node type"
    );
    out.push(container);

    for child in &node.children {
        visit(child, &flattened, type_names, out)?;
    }
    Ok(())
}
