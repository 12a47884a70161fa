use std::collections::BTreeMap;

use crate::binding::BindingMap;
use crate::field::{FieldKind, FieldNode, FieldRegistry};
use crate::lint::LintReport;
use crate::selector::ConditionSet;
use crate::state::{self, EngineEvent};

/// Orchestrates one form: owns the field registry, the parsed condition
/// sets, and the binding graph, and runs synchronous re-evaluation
/// cascades when field values change.
///
/// One engine per form; the burst guard is instance state, so multiple
/// forms on one page never share re-entrancy bookkeeping.
#[derive(Debug)]
pub struct Engine {
    registry: FieldRegistry,
    sets: BTreeMap<String, ConditionSet>,
    bindings: BindingMap,
    lint: LintReport,
    events: Vec<EngineEvent>,
    burst_depth: usize,
    reflow_pending: bool,
}

impl Engine {
    /// Scans the registry for fields carrying `show-if`/`required-if`
    /// metadata, parses their selectors, builds the binding graph, and
    /// runs the initial evaluation pass as a single burst.
    pub fn new(registry: FieldRegistry) -> Self {
        let mut engine = Self {
            registry,
            sets: BTreeMap::new(),
            bindings: BindingMap::new(),
            lint: LintReport::default(),
            events: Vec::new(),
            burst_depth: 0,
            reflow_pending: false,
        };
        engine.setup();
        engine
    }

    fn setup(&mut self) {
        let dependents: Vec<(String, Option<String>, Option<String>)> = self
            .registry
            .iter()
            .filter(|field| field.has_dependencies())
            .map(|field| {
                (
                    field.name.clone(),
                    field.show_if.clone(),
                    field.required_if.clone(),
                )
            })
            .collect();

        for (name, show_if, required_if) in &dependents {
            let (set, skipped) = ConditionSet::parse(show_if.as_deref(), required_if.as_deref());
            for clause in &skipped {
                self.lint.skipped_clause(name, clause.kind.as_str(), &clause.raw);
            }
            for referenced in set.referenced_fields() {
                if !self.registry.contains(&referenced) {
                    self.lint.unknown_reference(name, &referenced);
                }
            }
            self.bindings.bind(name, &set);
            self.sets.insert(name.clone(), set);
        }

        self.begin_burst();
        for (name, _, _) in &dependents {
            self.apply_dependent(name);
        }
        self.end_burst();
    }

    /// Sets the current value of a scalar field and cascades.
    pub fn set_value(&mut self, field: &str, value: &str) {
        let changed = match self.registry.get_mut(field).map(|node| &mut node.kind) {
            Some(FieldKind::Scalar { value: current }) => {
                let next = Some(value.to_string());
                if *current == next {
                    false
                } else {
                    *current = next;
                    true
                }
            }
            _ => false,
        };
        if changed {
            self.notify_change(field);
        }
    }

    /// Checks or unchecks a single checkbox and cascades.
    pub fn set_checked(&mut self, field: &str, checked: bool) {
        let changed = match self.registry.get_mut(field).map(|node| &mut node.kind) {
            Some(FieldKind::Checkbox { checked: current, .. }) => {
                if *current == checked {
                    false
                } else {
                    *current = checked;
                    true
                }
            }
            _ => false,
        };
        if changed {
            self.notify_change(field);
        }
    }

    /// Checks or unchecks one option of a grouped field and cascades.
    /// Checking a radio option unchecks its siblings.
    pub fn set_option_checked(&mut self, field: &str, option: &str, checked: bool) {
        let changed = match self.registry.get_mut(field).map(|node| &mut node.kind) {
            Some(FieldKind::RadioGroup { options }) => {
                let mut changed = false;
                for entry in options.iter_mut() {
                    let wanted = if entry.value == option {
                        checked
                    } else if checked {
                        // Checking a radio clears its siblings.
                        false
                    } else {
                        entry.checked
                    };
                    if entry.checked != wanted {
                        entry.checked = wanted;
                        changed = true;
                    }
                }
                changed
            }
            Some(FieldKind::CheckboxGroup { options }) => {
                match options.iter_mut().find(|entry| entry.value == option) {
                    Some(entry) if entry.checked != checked => {
                        entry.checked = checked;
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        };
        if changed {
            self.notify_change(field);
        }
    }

    /// Replaces the checked set of a grouped field in one burst.
    pub fn set_group_checked(&mut self, field: &str, checked_values: &[&str]) {
        let changed = match self.registry.get_mut(field).map(|node| &mut node.kind) {
            Some(FieldKind::RadioGroup { options }) | Some(FieldKind::CheckboxGroup { options }) => {
                let mut changed = false;
                for entry in options.iter_mut() {
                    let wanted = checked_values.iter().any(|value| *value == entry.value);
                    if entry.checked != wanted {
                        entry.checked = wanted;
                        changed = true;
                    }
                }
                changed
            }
            _ => false,
        };
        if changed {
            self.notify_change(field);
        }
    }

    /// Change-event entry point: re-runs every dependent bound to
    /// `field`, synchronously, as one burst.
    pub fn notify_change(&mut self, field: &str) {
        self.begin_burst();
        let dependents: Vec<String> = self
            .bindings
            .dependents_of(field)
            .iter()
            .cloned()
            .collect();
        for dependent in dependents {
            self.apply_dependent(&dependent);
        }
        self.end_burst();
    }

    /// Mass update: re-evaluates every dependent field in one burst, for
    /// hosts that replaced several values out of band.
    pub fn refresh_all(&mut self) {
        self.begin_burst();
        let dependents: Vec<String> = self.sets.keys().cloned().collect();
        for dependent in dependents {
            self.apply_dependent(&dependent);
        }
        self.end_burst();
    }

    fn apply_dependent(&mut self, dependent: &str) {
        let Some(set) = self.sets.get(dependent).cloned() else {
            return;
        };
        state::apply(
            &mut self.registry,
            dependent,
            &set,
            &mut self.events,
            &mut self.reflow_pending,
        );
    }

    // The burst guard does not suppress evaluation; it only keeps the
    // reflow request from firing more than once while a cascade settles.
    fn begin_burst(&mut self) {
        self.burst_depth += 1;
    }

    fn end_burst(&mut self) {
        self.burst_depth -= 1;
        if self.burst_depth == 0 && self.reflow_pending {
            self.reflow_pending = false;
            self.events.push(EngineEvent::Reflow);
        }
    }

    /// Drains events accumulated since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_visible(&self, field: &str) -> Option<bool> {
        self.registry.get(field).map(|node| node.visible)
    }

    pub fn is_required(&self, field: &str) -> Option<bool> {
        self.registry.get(field).map(|node| node.required)
    }

    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.registry.get(name)
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Dependents that re-evaluate when `field` changes.
    pub fn dependents_of(&self, field: &str) -> &[String] {
        self.bindings.dependents_of(field)
    }

    pub fn lint(&self) -> &LintReport {
        &self.lint
    }
}
