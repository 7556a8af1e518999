//! Shadow piercing selector Tests

mod utils;

use utils::{assert_equal_css, assert_not_contains, shim};

#[test]
fn should_stop_scoping_at_the_deep_combinator() {
    assert_equal_css(&shim("x >>> y {}", "contenta", ""), "x[contenta] y {}");
    assert_equal_css(&shim("x /deep/ y {}", "contenta", ""), "x[contenta] y {}");
}

#[test]
fn should_not_scope_anything_after_the_deep_combinator() {
    let shimmed = shim(":host >>> .x .y {}", "contenta", "a-host");
    assert_equal_css(&shimmed, "[a-host] .x .y {}");
    assert_not_contains(&shimmed, "[contenta]");
}

#[test]
fn should_only_affect_the_selector_it_appears_in() {
    assert_equal_css(
        &shim("a, b >>> c {}", "contenta", ""),
        "a[contenta], b[contenta] c {}",
    );
}

#[test]
fn should_collapse_shadow_pseudo_elements() {
    assert_equal_css(
        &shim("x::shadow > y {}", "contenta", ""),
        "x[contenta] > y[contenta] {}",
    );
    assert_equal_css(
        &shim("x::content y {}", "contenta", ""),
        "x[contenta] y[contenta] {}",
    );
}

#[test]
fn should_collapse_shadow_combinators() {
    assert_equal_css(
        &shim("x /shadow-deep/ y {}", "contenta", ""),
        "x[contenta] y[contenta] {}",
    );
    assert_equal_css(
        &shim("x /shadow/ y {}", "contenta", ""),
        "x[contenta] y[contenta] {}",
    );
}
