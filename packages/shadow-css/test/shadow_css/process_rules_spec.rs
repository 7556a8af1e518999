//! Process Rules Tests

use shadow_css::{process_rules, CssRule};

fn capture_rules(input: &str) -> Vec<CssRule> {
    let mut result = Vec::new();
    process_rules(input, |rule| {
        result.push(rule.clone());
        rule
    });
    result
}

#[test]
fn should_work_with_empty_css() {
    assert!(capture_rules("").is_empty());
}

#[test]
fn should_capture_a_rule_without_body() {
    assert_eq!(capture_rules("a;"), vec![CssRule::new("a".into(), "".into())]);
}

#[test]
fn should_capture_css_rules_with_body() {
    assert_eq!(capture_rules("a {b}"), vec![CssRule::new("a".into(), "b".into())]);
}

#[test]
fn should_capture_css_rules_with_nested_rules() {
    assert_eq!(
        capture_rules("a {b {c}} d {e}"),
        vec![
            CssRule::new("a".into(), "b {c}".into()),
            CssRule::new("d".into(), "e".into()),
        ]
    );
}

#[test]
fn should_capture_multiple_rules_where_some_have_no_body() {
    assert_eq!(
        capture_rules("@import a ; b {c}"),
        vec![
            CssRule::new("@import a".into(), "".into()),
            CssRule::new("b".into(), "c".into()),
        ]
    );
}

#[test]
fn should_allow_to_change_the_selector_while_preserving_whitespaces() {
    let result = process_rules("@import a; b {c {d}} e {f}", |rule| {
        CssRule::new(format!("{}2", rule.selector), rule.content)
    });
    assert_eq!(result, "@import a2; b2 {c {d}} e2 {f}");
}

#[test]
fn should_allow_to_change_the_content() {
    let result = process_rules("a {b}", |rule| {
        CssRule::new(rule.selector, format!("{}2", rule.content))
    });
    assert_eq!(result, "a {b2}");
}

#[test]
fn should_leave_text_that_is_not_a_rule_untouched() {
    let result = process_rules("a {b} garbage", |rule| {
        CssRule::new(rule.selector.to_uppercase(), rule.content)
    });
    assert_eq!(result, "A {b} garbage");
}

#[test]
fn should_visit_rules_in_source_order() {
    let selectors: Vec<String> = capture_rules("x {} y {z {}} w;")
        .into_iter()
        .map(|rule| rule.selector)
        .collect();
    assert_eq!(selectors, vec!["x", "y", "w"]);
}
