use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::field::{FieldKind, FieldNode, FieldRegistry, GroupOption};

/// Errors raised while loading or converting a form document. The
/// running engine itself never errors; this is the only fallible surface.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("failed to parse form document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate field '{0}'")]
    DuplicateField(String),
    #[error("field '{field}' references unknown parent '{parent}'")]
    UnknownParent { field: String, parent: String },
    #[error("group field '{0}' has no options")]
    EmptyGroup(String),
}

/// Input classification of a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldDefKind {
    #[default]
    Scalar,
    Checkbox,
    Radio,
    Checkboxes,
    Fieldset,
}

/// One option of a radio/checkboxes field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OptionDef {
    pub value: String,
    /// Visible label; defaults to the value when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

/// One field (or container) of a form document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub kind: FieldDefKind,
    /// Current value for scalars; submit value for checkboxes (defaults
    /// to "1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_if: Option<String>,
}

/// A form described as data: the shape the CLI and hosts feed the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormDoc {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub fields: Vec<FieldDef>,
}

impl FormDoc {
    pub fn from_json(json: &str) -> Result<Self, DocError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts the document into the runtime registry the engine scans.
    pub fn build_registry(&self) -> Result<FieldRegistry, DocError> {
        let mut registry = FieldRegistry::new();
        for def in &self.fields {
            if registry.contains(&def.name) {
                return Err(DocError::DuplicateField(def.name.clone()));
            }
            registry.insert(def.to_node()?);
        }
        for def in &self.fields {
            if let Some(parent) = &def.parent
                && !registry.contains(parent)
            {
                return Err(DocError::UnknownParent {
                    field: def.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
        Ok(registry)
    }
}

impl FieldDef {
    fn to_node(&self) -> Result<FieldNode, DocError> {
        let kind = match self.kind {
            FieldDefKind::Scalar => FieldKind::Scalar {
                value: self.value.clone(),
            },
            FieldDefKind::Checkbox => FieldKind::Checkbox {
                value: self.value.clone().unwrap_or_else(|| "1".to_string()),
                checked: self.checked,
            },
            FieldDefKind::Radio => FieldKind::RadioGroup {
                options: self.group_options()?,
            },
            FieldDefKind::Checkboxes => FieldKind::CheckboxGroup {
                options: self.group_options()?,
            },
            FieldDefKind::Fieldset => FieldKind::Fieldset,
        };

        let mut node = FieldNode::new(self.name.clone(), kind)
            .with_required(self.required)
            .with_collapsed(self.collapsed);
        node.parent = self.parent.clone();
        node.show_if = self.show_if.clone();
        node.required_if = self.required_if.clone();
        Ok(node)
    }

    fn group_options(&self) -> Result<Vec<GroupOption>, DocError> {
        if self.options.is_empty() {
            return Err(DocError::EmptyGroup(self.name.clone()));
        }
        Ok(self
            .options
            .iter()
            .map(|option| {
                GroupOption::new(
                    option.value.clone(),
                    option
                        .label
                        .clone()
                        .unwrap_or_else(|| option.value.clone()),
                    option.checked,
                )
            })
            .collect())
    }
}

/// JSON Schema for the form document shape.
pub fn doc_schema() -> Value {
    serde_json::to_value(schema_for!(FormDoc)).unwrap_or(Value::Null)
}
