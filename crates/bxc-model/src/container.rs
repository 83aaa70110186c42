//! Model-builder output types.

use serde::Serialize;

use bxc_core::FieldDeclaration;

/// The resolved attribute set of one node type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsContainer {
    pub name: String,
    pub base_name: String,
    /// Fields declared on this type only.
    pub direct_fields: Vec<FieldDeclaration>,
    /// Ancestor fields, outermost first, followed by `direct_fields`.
    pub flattened_fields: Vec<FieldDeclaration>,
}

impl SettingsContainer {
    /// Look up a field in the flattened set.
    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.flattened_fields.iter().find(|f| f.name == name)
    }

    /// Number of fields inherited from ancestors.
    pub fn inherited_count(&self) -> usize {
        self.flattened_fields.len() - self.direct_fields.len()
    }
}

/// Containers built from one declaration group, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelGroup {
    pub name: String,
    pub containers: Vec<SettingsContainer>,
}

/// Containers for every loaded group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeModel {
    pub groups: Vec<ModelGroup>,
}

impl AttributeModel {
    /// Containers of the named group, if it was loaded.
    pub fn group(&self, name: &str) -> Option<&[SettingsContainer]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.containers.as_slice())
    }
}
