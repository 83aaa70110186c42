//! # Declaration Tree
//!
//! The typed output of the schema loader. A [`Schema`] holds one
//! [`DeclarationGroup`] per recognized top-level group; each group holds a
//! forest of [`NodeTypeDeclaration`]s whose nesting is their inheritance.
//!
//! Parentage is lexical: a node type's base is the node type whose body it
//! is declared in, or the sentinel root `nodeType` for top-level types.
//! References by name are never followed, so the tree cannot contain cycles.

use serde::Serialize;

use bxc_core::{EnumType, FieldDeclaration, SourceLocation};

/// Group whose node types have no output backend but are still validated.
pub const SETTINGS_GROUP: &str = "Settings";

/// Group whose node types are emitted as native attributes and schema types.
pub const ATTRIBUTES_GROUP: &str = "Attributes";

/// The groups a compiler run looks for, in output order.
pub const DEFAULT_GROUPS: [&str; 2] = [SETTINGS_GROUP, ATTRIBUTES_GROUP];

/// A named node type and the fields declared directly on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeTypeDeclaration {
    pub name: String,
    /// Enclosing node type's name, or `nodeType` at the top level.
    pub base_name: String,
    /// Fields declared on this type only, in declaration order.
    pub fields: Vec<FieldDeclaration>,
    /// Node types declared inside this one, in declaration order.
    pub children: Vec<NodeTypeDeclaration>,
    pub location: SourceLocation,
}

/// One top-level declaration group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationGroup {
    pub name: String,
    pub location: SourceLocation,
    /// Enum types visible inside the group (file-level ones included).
    pub enums: Vec<EnumType>,
    /// Top-level node types, in declaration order.
    pub roots: Vec<NodeTypeDeclaration>,
}

impl DeclarationGroup {
    /// All node types in document order, each before its children.
    pub fn preorder(&self) -> Vec<&NodeTypeDeclaration> {
        fn walk<'a>(node: &'a NodeTypeDeclaration, out: &mut Vec<&'a NodeTypeDeclaration>) {
            out.push(node);
            for child in &node.children {
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        for root in &self.roots {
            walk(root, &mut out);
        }
        out
    }
}

/// The loaded snippet: the requested groups that were present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub groups: Vec<DeclarationGroup>,
}

impl Schema {
    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&DeclarationGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}
