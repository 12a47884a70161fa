use fieldgate::{CondValue, ConditionKind, ConditionSet, Operator, Subfield};

#[test]
fn parses_single_clause() {
    let (set, skipped) = ConditionSet::parse(Some("country=US"), None);
    assert!(skipped.is_empty());
    assert_eq!(set.conditions.len(), 1);
    let condition = &set.conditions[0];
    assert_eq!(condition.kind, ConditionKind::Show);
    assert_eq!(condition.fields, vec!["country".to_string()]);
    assert_eq!(condition.op, Operator::Eq);
    assert_eq!(condition.subfield, None);
    assert_eq!(condition.values, vec![CondValue::Text("US".into())]);
}

#[test]
fn parses_or_groups_on_both_sides() {
    let (set, _) = ConditionSet::parse(Some("country|region=US|CA"), None);
    let condition = &set.conditions[0];
    assert_eq!(
        condition.fields,
        vec!["country".to_string(), "region".to_string()]
    );
    assert_eq!(
        condition.values,
        vec![CondValue::Text("US".into()), CondValue::Text("CA".into())]
    );
}

#[test]
fn parses_comma_separated_clauses_per_axis() {
    let (set, _) = ConditionSet::parse(Some("a=1, b=2"), Some("c!=3"));
    assert_eq!(set.conditions.len(), 3);
    assert_eq!(set.show_conditions().count(), 2);
    assert_eq!(set.required_conditions().count(), 1);
    assert_eq!(set.conditions[2].kind, ConditionKind::Required);
    assert_eq!(set.conditions[2].op, Operator::Ne);
}

#[test]
fn numeric_looking_values_coerce() {
    let (set, _) = ConditionSet::parse(Some("qty>=10"), None);
    assert_eq!(set.conditions[0].op, Operator::Ge);
    assert_eq!(set.conditions[0].values, vec![CondValue::Number(10.0)]);
}

#[test]
fn quoted_values_are_stripped() {
    let (set, _) = ConditionSet::parse(Some("title='hello world'"), None);
    assert_eq!(
        set.conditions[0].values,
        vec![CondValue::Text("hello world".into())]
    );

    let (set, _) = ConditionSet::parse(Some("title=\"x\""), None);
    assert_eq!(set.conditions[0].values, vec![CondValue::Text("x".into())]);
}

#[test]
fn quoted_values_may_contain_delimiters() {
    let (set, skipped) = ConditionSet::parse(Some("note='a, b|c', other=1"), None);
    assert!(skipped.is_empty());
    assert_eq!(set.conditions.len(), 2);
    assert_eq!(
        set.conditions[0].values,
        vec![CondValue::Text("a, b|c".into())]
    );
}

#[test]
fn count_subfield_is_recognized() {
    let (set, _) = ConditionSet::parse(Some("tags.count>=2"), None);
    let condition = &set.conditions[0];
    assert_eq!(condition.fields, vec!["tags".to_string()]);
    assert_eq!(condition.subfield, Some(Subfield::Count));
    assert_eq!(condition.values, vec![CondValue::Number(2.0)]);
}

#[test]
fn other_subfields_parse_as_accessors() {
    let (set, _) = ConditionSet::parse(Some("owner.name=bob"), None);
    assert_eq!(
        set.conditions[0].subfield,
        Some(Subfield::Accessor("name".into()))
    );
}

#[test]
fn contains_operator_has_two_spellings() {
    let (set, _) = ConditionSet::parse(Some("tags%=red, tags*=blue"), None);
    assert_eq!(set.conditions[0].op, Operator::Contains);
    assert_eq!(set.conditions[1].op, Operator::Contains);
}

#[test]
fn malformed_clause_is_skipped_but_siblings_parse() {
    let (set, skipped) = ConditionSet::parse(Some("no operator here, b=2"), None);
    assert_eq!(set.conditions.len(), 1);
    assert_eq!(set.conditions[0].fields, vec!["b".to_string()]);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].raw, "no operator here");
}

#[test]
fn parse_is_idempotent() {
    let show = Some("a|b=1|2, c.count>=3");
    let required = Some("d!='x y'");
    let (first, _) = ConditionSet::parse(show, required);
    let (second, _) = ConditionSet::parse(show, required);
    assert_eq!(first, second);
}

#[test]
fn referenced_fields_are_distinct_in_order() {
    let (set, _) = ConditionSet::parse(Some("a=1, b|a=2"), Some("c=3"));
    assert_eq!(
        set.referenced_fields(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn empty_selector_yields_inert_set() {
    let (set, skipped) = ConditionSet::parse(None, None);
    assert!(set.is_inert());
    assert!(skipped.is_empty());
}
