use crate::value::CondValue;

/// Comparison operators accepted by the condition grammar.
///
/// `%=` and `*=` are both spelled "contains" and collapse to one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Le,
    Ge,
    Lt,
    Gt,
    Contains,
}

/// Which axis a condition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Show,
    Required,
}

impl ConditionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::Show => "show-if",
            ConditionKind::Required => "required-if",
        }
    }
}

/// Optional accessor split off the field name at the first `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subfield {
    /// Compare the number of checked options rather than their values.
    Count,
    /// A nested accessor the runtime cannot resolve; the clause degrades
    /// to "never matches".
    Accessor(String),
}

/// One parsed clause of a `show-if` / `required-if` selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub kind: ConditionKind,
    /// OR-group of referenced field names.
    pub fields: Vec<String>,
    pub subfield: Option<Subfield>,
    pub op: Operator,
    /// OR-group of comparison values, numeric-coerced where they look numeric.
    pub values: Vec<CondValue>,
}

/// Clause that did not match the grammar and was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedClause {
    pub kind: ConditionKind,
    pub raw: String,
}

/// All conditions owned by one dependent field, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    pub conditions: Vec<Condition>,
}

impl ConditionSet {
    /// Parses the two selector axes of a dependent field.
    ///
    /// Malformed clauses are reported, not fatal; the remaining clauses
    /// of the same selector still parse.
    pub fn parse(show_if: Option<&str>, required_if: Option<&str>) -> (Self, Vec<SkippedClause>) {
        let mut set = ConditionSet::default();
        let mut skipped = Vec::new();
        if let Some(selector) = show_if {
            parse_selector(selector, ConditionKind::Show, &mut set.conditions, &mut skipped);
        }
        if let Some(selector) = required_if {
            parse_selector(
                selector,
                ConditionKind::Required,
                &mut set.conditions,
                &mut skipped,
            );
        }
        (set, skipped)
    }

    pub fn is_inert(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn show_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions
            .iter()
            .filter(|condition| condition.kind == ConditionKind::Show)
    }

    pub fn required_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions
            .iter()
            .filter(|condition| condition.kind == ConditionKind::Required)
    }

    pub fn has_required_conditions(&self) -> bool {
        self.required_conditions().next().is_some()
    }

    /// Distinct field names referenced anywhere in this set, in first-seen order.
    pub fn referenced_fields(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for condition in &self.conditions {
            for field in &condition.fields {
                if !names.iter().any(|known| known == field) {
                    names.push(field.clone());
                }
            }
        }
        names
    }
}

fn parse_selector(
    selector: &str,
    kind: ConditionKind,
    out: &mut Vec<Condition>,
    skipped: &mut Vec<SkippedClause>,
) {
    for clause in split_top_level(selector, ',') {
        let trimmed = clause.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_clause(trimmed, kind) {
            Some(condition) => out.push(condition),
            None => skipped.push(SkippedClause {
                kind,
                raw: trimmed.to_string(),
            }),
        }
    }
}

fn parse_clause(clause: &str, kind: ConditionKind) -> Option<Condition> {
    let mut scanner = Scanner::new(clause);
    let field_part = scanner.take_until_operator();
    let op = scanner.take_operator()?;
    let value_part = scanner.rest();

    let field_part = field_part.trim();
    if field_part.is_empty() {
        return None;
    }

    // The subfield follows the whole OR-list, split at the first `.`.
    let (field_or, subfield) = match field_part.split_once('.') {
        Some((fields, sub)) if !sub.trim().is_empty() => {
            let sub = sub.trim();
            let subfield = if sub == "count" {
                Subfield::Count
            } else {
                Subfield::Accessor(sub.to_string())
            };
            (fields, Some(subfield))
        }
        _ => (field_part, None),
    };

    let fields: Vec<String> = field_or
        .split('|')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();
    if fields.is_empty() {
        return None;
    }

    let values: Vec<CondValue> = split_top_level(value_part, '|')
        .into_iter()
        .map(|value| CondValue::parse(strip_quotes(value.trim())))
        .collect();

    Some(Condition {
        kind,
        fields,
        subfield,
        op,
        values,
    })
}

/// Splits on `delimiter` while ignoring occurrences inside quotes.
fn split_top_level(input: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    for (index, ch) in input.char_indices() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                }
            }
            None => {
                if ch == '\'' || ch == '"' {
                    quote = Some(ch);
                } else if ch == delimiter {
                    parts.push(&input[start..index]);
                    start = index + ch.len_utf8();
                }
            }
        }
    }
    parts.push(&input[start..]);
    parts
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Character scanner over one clause; quote-aware, maximal-munch on operators.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Consumes up to (not including) the first operator character outside
    /// quotes and returns the consumed text.
    fn take_until_operator(&mut self) -> &'a str {
        let start = self.pos;
        let mut quote: Option<char> = None;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            let ch = bytes[self.pos] as char;
            match quote {
                Some(open) => {
                    if ch == open {
                        quote = None;
                    }
                }
                None => match ch {
                    '\'' | '"' => quote = Some(ch),
                    '=' | '!' | '<' | '>' | '%' | '*' => break,
                    _ => {}
                },
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Consumes one operator token, longest spelling first.
    fn take_operator(&mut self) -> Option<Operator> {
        let rest = &self.input[self.pos..];
        let (op, len) = if rest.starts_with("!=") {
            (Operator::Ne, 2)
        } else if rest.starts_with("<=") {
            (Operator::Le, 2)
        } else if rest.starts_with(">=") {
            (Operator::Ge, 2)
        } else if rest.starts_with("%=") || rest.starts_with("*=") {
            (Operator::Contains, 2)
        } else if rest.starts_with('=') {
            (Operator::Eq, 1)
        } else if rest.starts_with('<') {
            (Operator::Lt, 1)
        } else if rest.starts_with('>') {
            (Operator::Gt, 1)
        } else {
            return None;
        };
        self.pos += len;
        Some(op)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }
}
