use serde::Serialize;

/// One non-fatal problem found while wiring a form's conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    /// Dependent field whose selector produced the issue.
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
    pub message: String,
    pub code: &'static str,
}

pub const SKIPPED_CLAUSE: &str = "skipped_clause";
pub const UNKNOWN_REFERENCE: &str = "unknown_reference";

/// Setup diagnostics for condition authors. The engine runs regardless;
/// these only explain which clauses can never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn skipped_clause(&mut self, field: &str, axis: &str, raw: &str) {
        self.issues.push(LintIssue {
            field: field.to_string(),
            clause: Some(raw.to_string()),
            message: format!("{axis} clause does not match the grammar and was dropped"),
            code: SKIPPED_CLAUSE,
        });
    }

    pub fn unknown_reference(&mut self, field: &str, referenced: &str) {
        self.issues.push(LintIssue {
            field: field.to_string(),
            clause: None,
            message: format!("condition references unknown field '{referenced}'"),
            code: UNKNOWN_REFERENCE,
        });
    }
}
