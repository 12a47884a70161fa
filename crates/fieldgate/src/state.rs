use crate::evaluate::evaluate;
use crate::field::FieldRegistry;
use crate::selector::ConditionSet;

/// Mutations and requests the engine emits toward the surrounding UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FieldShown(String),
    FieldHidden(String),
    RequiredChanged { field: String, required: bool },
    /// A collapsed or hidden ancestor container was opened so a nested
    /// field could become visible.
    AncestorOpened(String),
    /// Layout widths need recomputation. Emitted at most once per
    /// settled burst of transitions.
    Reflow,
}

/// Re-evaluates one dependent field's condition set and applies the
/// show/required transitions, recording emitted events and whether a
/// reflow became necessary.
pub fn apply(
    registry: &mut FieldRegistry,
    dependent: &str,
    set: &ConditionSet,
    events: &mut Vec<EngineEvent>,
    reflow_pending: &mut bool,
) {
    if !registry.contains(dependent) {
        return;
    }

    // A field with no show conditions defaults to visible.
    let show = set
        .show_conditions()
        .all(|condition| evaluate(condition, registry).satisfied());

    let mut required_matches = 0;
    let mut not_required_matches = 0;
    for condition in set.required_conditions() {
        if evaluate(condition, registry).satisfied() {
            required_matches += 1;
        } else {
            not_required_matches += 1;
        }
    }

    let was_visible = registry
        .get(dependent)
        .map(|field| field.visible)
        .unwrap_or(true);

    if show != was_visible {
        if show {
            reveal_ancestors(registry, dependent, events);
        }
        if let Some(field) = registry.get_mut(dependent) {
            field.visible = show;
        }
        events.push(if show {
            EngineEvent::FieldShown(dependent.to_string())
        } else {
            EngineEvent::FieldHidden(dependent.to_string())
        });
        *reflow_pending = true;
    }

    // Required transitions only apply when required conditions exist;
    // otherwise the statically authored flag stays untouched. A hidden
    // field is never required.
    if set.has_required_conditions() {
        let wanted = show && required_matches > 0 && not_required_matches == 0;
        if let Some(field) = registry.get_mut(dependent)
            && field.required != wanted
        {
            field.required = wanted;
            events.push(EngineEvent::RequiredChanged {
                field: dependent.to_string(),
                required: wanted,
            });
        }
    }
}

/// Opens every collapsed or hidden ancestor of `dependent`, outermost
/// first, so the field does not become visible inside a container the
/// user cannot see.
fn reveal_ancestors(registry: &mut FieldRegistry, dependent: &str, events: &mut Vec<EngineEvent>) {
    let mut chain = Vec::new();
    let mut seen = std::collections::BTreeSet::new();
    let mut cursor = registry
        .get(dependent)
        .and_then(|field| field.parent.clone());
    while let Some(name) = cursor {
        if !seen.insert(name.clone()) {
            break;
        }
        let Some(ancestor) = registry.get(&name) else {
            break;
        };
        cursor = ancestor.parent.clone();
        chain.push(name);
    }

    for name in chain.into_iter().rev() {
        if let Some(ancestor) = registry.get_mut(&name)
            && (ancestor.collapsed || !ancestor.visible)
        {
            ancestor.collapsed = false;
            ancestor.visible = true;
            events.push(EngineEvent::AncestorOpened(name));
        }
    }
}
