use std::collections::BTreeMap;

/// One selectable option inside a radio or checkbox group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOption {
    pub value: String,
    /// Visible label text, used by the fallback match when no option
    /// identifies by value.
    pub label: String,
    pub checked: bool,
}

impl GroupOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, checked: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            checked,
        }
    }
}

/// Input classification chosen once at construction; the resolver
/// dispatches on this instead of inspecting the host widget.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Text, select, number and friends: one current value.
    Scalar { value: Option<String> },
    /// A single checkbox with a fixed submit value.
    Checkbox { value: String, checked: bool },
    RadioGroup { options: Vec<GroupOption> },
    CheckboxGroup { options: Vec<GroupOption> },
    /// A container (fieldset/tab). Carries no value; exists so cascading
    /// reveal can walk and open it.
    Fieldset,
}

impl FieldKind {
    pub fn options(&self) -> Option<&[GroupOption]> {
        match self {
            FieldKind::RadioGroup { options } | FieldKind::CheckboxGroup { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn checked_count(&self) -> usize {
        match self {
            FieldKind::Checkbox { checked, .. } => usize::from(*checked),
            FieldKind::RadioGroup { options } | FieldKind::CheckboxGroup { options } => {
                options.iter().filter(|option| option.checked).count()
            }
            _ => 0,
        }
    }
}

/// Runtime representation of one form field or container.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub name: String,
    pub kind: FieldKind,
    pub visible: bool,
    pub required: bool,
    /// Collapsed container or inactive tab; cleared by cascading reveal.
    pub collapsed: bool,
    /// Enclosing container, when nested.
    pub parent: Option<String>,
    pub show_if: Option<String>,
    pub required_if: Option<String>,
}

impl FieldNode {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visible: true,
            required: false,
            collapsed: false,
            parent: None,
            show_if: None,
            required_if: None,
        }
    }

    pub fn scalar(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Scalar {
                value: Some(value.into()),
            },
        )
    }

    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::new(
            name,
            FieldKind::Checkbox {
                value: value.into(),
                checked,
            },
        )
    }

    pub fn fieldset(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Fieldset)
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_show_if(mut self, selector: impl Into<String>) -> Self {
        self.show_if = Some(selector.into());
        self
    }

    pub fn with_required_if(mut self, selector: impl Into<String>) -> Self {
        self.required_if = Some(selector.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn has_dependencies(&self) -> bool {
        self.show_if.is_some() || self.required_if.is_some()
    }
}

/// All fields of one form, looked up by name. Insertion order is kept so
/// reports read in authoring order.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldNode>,
    index: BTreeMap<String, usize>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any previous field with the same name.
    pub fn insert(&mut self, field: FieldNode) {
        match self.index.get(&field.name) {
            Some(&slot) => self.fields[slot] = field,
            None => {
                self.index.insert(field.name.clone(), self.fields.len());
                self.fields.push(field);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldNode> {
        self.index.get(name).map(|&slot| &self.fields[slot])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldNode> {
        self.index.get(name).map(|&slot| &mut self.fields[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldNode> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
