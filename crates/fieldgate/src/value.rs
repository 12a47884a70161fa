use std::borrow::Cow;

use crate::selector::Operator;

/// A condition or resolved field value, coerced to a number when it looks
/// like one so that `2 > 10` does not fall into lexical string ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum CondValue {
    Number(f64),
    Text(String),
}

impl CondValue {
    /// Coerces numeric-looking text to `Number`; everything else stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty()
            && let Ok(number) = trimmed.parse::<f64>()
            && number.is_finite()
        {
            return CondValue::Number(number);
        }
        CondValue::Text(raw.to_string())
    }

    /// Keeps the value as literal text, no numeric coercion.
    pub fn text(raw: impl Into<String>) -> Self {
        CondValue::Text(raw.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CondValue::Number(number) => Some(*number),
            CondValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
                }
            }
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CondValue::Text(text) => Cow::Borrowed(text),
            CondValue::Number(number) => {
                if number.fract() == 0.0 && number.abs() < 1e15 {
                    Cow::Owned(format!("{}", *number as i64))
                } else {
                    Cow::Owned(number.to_string())
                }
            }
        }
    }

    fn is_number(&self) -> bool {
        matches!(self, CondValue::Number(_))
    }
}

/// Applies `op` to one resolved value and one condition value.
///
/// When either side is already numeric and the other coerces, the
/// comparison runs on numbers; otherwise it runs on the literal text.
pub fn compare(op: Operator, have: &CondValue, want: &CondValue) -> bool {
    if op == Operator::Contains {
        return have.as_text().contains(want.as_text().as_ref());
    }

    if have.is_number() || want.is_number() {
        if let (Some(left), Some(right)) = (have.as_number(), want.as_number()) {
            return match op {
                Operator::Eq => left == right,
                Operator::Ne => left != right,
                Operator::Lt => left < right,
                Operator::Gt => left > right,
                Operator::Le => left <= right,
                Operator::Ge => left >= right,
                Operator::Contains => unreachable!(),
            };
        }
        // Mixed numeric/non-numeric never orders and never equates.
        return op == Operator::Ne;
    }

    let left = have.as_text();
    let right = want.as_text();
    match op {
        Operator::Eq => left == right,
        Operator::Ne => left != right,
        Operator::Lt => left < right,
        Operator::Gt => left > right,
        Operator::Le => left <= right,
        Operator::Ge => left >= right,
        Operator::Contains => unreachable!(),
    }
}
