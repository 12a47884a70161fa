use crate::field::FieldRegistry;
use crate::resolve::resolve;
use crate::selector::{Condition, Operator};
use crate::value::compare;

/// Match count and threshold produced by evaluating one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub matched: usize,
    pub required: usize,
}

impl Evaluation {
    pub fn satisfied(&self) -> bool {
        self.matched >= self.required
    }
}

/// Evaluates one condition against current form state.
///
/// Pure with respect to the registry: repeated calls with unchanged
/// values yield the same result. Fields that do not resolve contribute
/// nothing and can never satisfy the clause.
pub fn evaluate(condition: &Condition, registry: &FieldRegistry) -> Evaluation {
    let mut matched = 0;
    let mut pairs = 0;

    // OR across fields: every referenced field that resolves contributes
    // its value set additively.
    for name in &condition.fields {
        let Some(field) = registry.get(name) else {
            continue;
        };
        let resolved = resolve(field, condition);
        for value in &resolved.values {
            for wanted in &condition.values {
                pairs += 1;
                if compare(condition.op, value, wanted) {
                    matched += 1;
                }
            }
        }
    }

    // `!=` is pure exclusion: every resolved value must differ from every
    // forbidden value. All other operators need any one pair to match.
    // The floor of 1 keeps an unresolvable reference from being
    // trivially satisfied.
    let required = match condition.op {
        Operator::Ne => pairs.max(1),
        _ => 1,
    };

    Evaluation { matched, required }
}
