use crate::field::{FieldKind, FieldNode, GroupOption};
use crate::selector::{Condition, Subfield};
use crate::value::CondValue;

/// Normalized current value(s) of one referenced field.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub values: Vec<CondValue>,
    pub group: bool,
}

impl Resolved {
    fn empty() -> Self {
        Self {
            values: Vec::new(),
            group: false,
        }
    }

    fn single(value: CondValue) -> Self {
        Self {
            values: vec![value],
            group: false,
        }
    }
}

/// Resolves the current value set of `field` for one condition.
///
/// Grouped inputs resolve against the condition's own values (one entry
/// per condition value), so the caller must pass the owning condition.
/// Never fails; anything unresolvable yields an empty set and the clause
/// simply does not match.
pub fn resolve(field: &FieldNode, condition: &Condition) -> Resolved {
    match &condition.subfield {
        Some(Subfield::Count) => {
            return Resolved::single(CondValue::Number(field.kind.checked_count() as f64));
        }
        // Nested accessors have no runtime representation here; degrade
        // to "never matches".
        Some(Subfield::Accessor(_)) => return Resolved::empty(),
        None => {}
    }

    match &field.kind {
        FieldKind::Scalar { value } => {
            Resolved::single(CondValue::text(value.clone().unwrap_or_default()))
        }
        FieldKind::Checkbox { value, checked } => resolve_checkbox(value, *checked),
        FieldKind::RadioGroup { options } | FieldKind::CheckboxGroup { options } => {
            resolve_group(options, condition)
        }
        FieldKind::Fieldset => Resolved::empty(),
    }
}

fn resolve_checkbox(value: &str, checked: bool) -> Resolved {
    if checked {
        return Resolved::single(CondValue::text(value));
    }
    let mut values = vec![CondValue::text("")];
    // Unchecked also answers to "0", letting authors write `field=0`,
    // unless the checkbox's own value is literally "0".
    if value != "0" {
        values.push(CondValue::text("0"));
    }
    Resolved { values, group: false }
}

fn resolve_group(options: &[GroupOption], condition: &Condition) -> Resolved {
    let mut values = Vec::with_capacity(condition.values.len());
    for wanted in &condition.values {
        let literal = wanted.as_text();
        let ident = option_ident(&literal);
        let entry = match options.iter().find(|option| option.value == ident) {
            Some(option) if option.checked => wanted.clone(),
            Some(_) => CondValue::text(""),
            // No option identifies by value; fall back to the visible
            // label text of checked options. First checked match wins.
            None => match checked_label_match(options, &literal) {
                Some(_) => wanted.clone(),
                None => CondValue::text(""),
            },
        };
        values.push(entry);
    }
    Resolved {
        values,
        group: true,
    }
}

fn checked_label_match<'a>(options: &'a [GroupOption], literal: &str) -> Option<&'a GroupOption> {
    options
        .iter()
        .find(|option| option.checked && option.label.trim() == literal)
}

/// Expected option identifier for a condition value: spaces become
/// underscores, matching how option values are generated upstream.
pub fn option_ident(literal: &str) -> String {
    literal.replace(' ', "_")
}
