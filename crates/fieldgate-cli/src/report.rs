use std::fmt::Write;

use fieldgate::{Engine, EngineEvent, FieldKind, LintReport};
use serde::Serialize;
use serde_json::{Value, json};

/// One row of the per-field state table.
#[derive(Debug, Serialize)]
pub struct FieldRow {
    pub name: String,
    pub kind: &'static str,
    pub visible: bool,
    pub required: bool,
    pub collapsed: bool,
}

/// Snapshot of engine state plus the events a batch of changes caused.
#[derive(Debug, Serialize)]
pub struct StateReport {
    pub form: String,
    pub fields: Vec<FieldRow>,
    pub events: Vec<Value>,
}

impl StateReport {
    pub fn collect(form: &str, engine: &Engine, events: &[EngineEvent]) -> Self {
        let fields = engine
            .registry()
            .iter()
            .map(|field| FieldRow {
                name: field.name.clone(),
                kind: kind_label(&field.kind),
                visible: field.visible,
                required: field.required,
                collapsed: field.collapsed,
            })
            .collect();
        Self {
            form: form.to_string(),
            fields,
            events: events.iter().map(event_json).collect(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Form: {}", self.form);
        for row in &self.fields {
            let mut line = format!(" - {} ({})", row.name, row.kind);
            line.push_str(if row.visible { " visible" } else { " hidden" });
            if row.required {
                line.push_str(" [required]");
            }
            if row.collapsed {
                line.push_str(" [collapsed]");
            }
            let _ = writeln!(out, "{}", line);
        }
        if !self.events.is_empty() {
            let _ = writeln!(out, "Events:");
            for event in &self.events {
                let _ = writeln!(out, " - {}", event_text(event));
            }
        }
        out
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn kind_label(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Scalar { .. } => "scalar",
        FieldKind::Checkbox { .. } => "checkbox",
        FieldKind::RadioGroup { .. } => "radio",
        FieldKind::CheckboxGroup { .. } => "checkboxes",
        FieldKind::Fieldset => "fieldset",
    }
}

fn event_json(event: &EngineEvent) -> Value {
    match event {
        EngineEvent::FieldShown(field) => json!({ "event": "field_shown", "field": field }),
        EngineEvent::FieldHidden(field) => json!({ "event": "field_hidden", "field": field }),
        EngineEvent::RequiredChanged { field, required } => {
            json!({ "event": "required_changed", "field": field, "required": required })
        }
        EngineEvent::AncestorOpened(field) => {
            json!({ "event": "ancestor_opened", "field": field })
        }
        EngineEvent::Reflow => json!({ "event": "reflow" }),
    }
}

fn event_text(event: &Value) -> String {
    let name = event
        .get("event")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    match event.get("field").and_then(Value::as_str) {
        Some(field) => match event.get("required").and_then(Value::as_bool) {
            Some(required) => format!("{name} {field} -> {required}"),
            None => format!("{name} {field}"),
        },
        None => name.to_string(),
    }
}

/// Renders lint findings for condition authors.
pub fn lint_text(report: &LintReport) -> String {
    if report.is_clean() {
        return "No condition problems found.\n".to_string();
    }
    let mut out = String::new();
    for issue in &report.issues {
        let mut line = format!("{}: {}", issue.field, issue.message);
        if let Some(clause) = &issue.clause {
            let _ = write!(line, " ({clause})");
        }
        let _ = write!(line, " [{}]", issue.code);
        let _ = writeln!(out, "{}", line);
    }
    out
}
