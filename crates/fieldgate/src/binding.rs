use std::collections::{BTreeMap, BTreeSet};

use crate::selector::ConditionSet;

/// Graph from referenced field name to the dependent fields whose
/// condition sets must re-run when it changes. Built once at setup.
#[derive(Debug, Clone, Default)]
pub struct BindingMap {
    edges: BTreeMap<String, Vec<String>>,
    bound: BTreeSet<String>,
}

impl BindingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every field referenced by `set` as a trigger for
    /// `dependent`. Re-binding an already-bound dependent is a no-op.
    pub fn bind(&mut self, dependent: &str, set: &ConditionSet) {
        if !self.bound.insert(dependent.to_string()) {
            return;
        }
        for referenced in set.referenced_fields() {
            let dependents = self.edges.entry(referenced).or_default();
            if !dependents.iter().any(|name| name == dependent) {
                dependents.push(dependent.to_string());
            }
        }
    }

    pub fn is_bound(&self, dependent: &str) -> bool {
        self.bound.contains(dependent)
    }

    /// Dependents to re-evaluate when `referenced` changes.
    pub fn dependents_of(&self, referenced: &str) -> &[String] {
        self.edges
            .get(referenced)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every field name some condition refers to.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }
}
