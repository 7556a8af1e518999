//! `:host` and `:host-context()` Tests

mod utils;

use utils::{assert_equal_css, assert_not_contains, shim};

mod host {
    use super::*;

    #[test]
    fn should_handle_no_context() {
        assert_equal_css(&shim(":host {}", "contenta", "a-host"), "[a-host] {}");
    }

    #[test]
    fn should_rewrite_declarations_as_is() {
        assert_eq!(
            shim(":host { color: red; }", "x-foo", "x-foo-host"),
            "[x-foo-host] { color: red; }"
        );
    }

    #[test]
    fn should_handle_a_selector_argument() {
        assert_equal_css(&shim(":host(.x) {}", "contenta", "a-host"), "[a-host].x {}");
        assert_eq!(
            shim(":host(.active) { color: blue; }", "x-foo", "x-foo-host"),
            "[x-foo-host].active { color: blue; }"
        );
    }

    #[test]
    fn should_handle_multiple_selector_arguments() {
        assert_equal_css(
            &shim(":host(.x,.y) {}", "contenta", "a-host"),
            "[a-host].x, [a-host].y {}",
        );
        assert_equal_css(
            &shim(":host(.x, .y) {}", "contenta", "a-host"),
            "[a-host].x, [a-host].y {}",
        );
    }

    #[test]
    fn should_handle_pseudo_selectors() {
        assert_equal_css(
            &shim(":host:hover {}", "contenta", "a-host"),
            "[a-host]:hover {}",
        );
        assert_equal_css(
            &shim(":host(:not(.a)) {}", "contenta", "a-host"),
            "[a-host]:not(.a) {}",
        );
    }

    #[test]
    fn should_scope_descendants_of_the_host() {
        assert_equal_css(
            &shim(":host .x {}", "contenta", "a-host"),
            "[a-host] .x[contenta] {}",
        );
        assert_equal_css(
            &shim(":host > .x {}", "contenta", "a-host"),
            "[a-host] > .x[contenta] {}",
        );
    }

    #[test]
    fn should_treat_an_empty_argument_as_the_host() {
        let shimmed = shim("b {x:1;} :host() {y:2;} c {z:3;}", "x-foo", "x-foo-host");
        assert_eq!(shimmed, "b[x-foo] {x:1;} [x-foo-host] {y:2;} c[x-foo] {z:3;}");
        assert_not_contains(&shimmed, "%BLOCK%");
    }

    #[test]
    fn should_keep_empty_entries_of_a_selector_list() {
        assert_equal_css(
            &shim(":host(.x,) {}", "contenta", "a-host"),
            "[a-host].x, [a-host] {}",
        );
    }

    #[test]
    fn should_be_case_insensitive() {
        assert_equal_css(&shim(":HOST {}", "contenta", "a-host"), "[a-host] {}");
    }

    #[test]
    fn should_rewrite_host_inside_media_queries() {
        assert_equal_css(
            &shim("@media print {:host {display: none;}}", "contenta", "a-host"),
            "@media print {[a-host] {display:none;}}",
        );
    }
}

mod host_context {
    use super::*;

    #[test]
    fn should_handle_a_single_selector() {
        assert_equal_css(
            &shim(":host-context(.x) {}", "contenta", "a-host"),
            "[a-host].x, .x [a-host] {}",
        );
    }

    #[test]
    fn should_scope_what_follows_the_host() {
        assert_equal_css(
            &shim(":host-context(.x) > .y {}", "contenta", "a-host"),
            "[a-host].x > .y[contenta], .x [a-host] > .y[contenta] {}",
        );
        assert_equal_css(
            &shim(
                ":host-context(.theme-dark) .title { color: white; }",
                "x-foo",
                "x-foo-host",
            ),
            "[x-foo-host].theme-dark .title[x-foo], .theme-dark [x-foo-host] .title[x-foo] { color: white; }",
        );
    }

    #[test]
    fn should_handle_multiple_selectors() {
        assert_equal_css(
            &shim(":host-context(.a, .b) {}", "contenta", "a-host"),
            "[a-host].a, .a [a-host], [a-host].b, .b [a-host] {}",
        );
    }

    #[test]
    fn should_not_scope_ancestors_of_the_host() {
        let shimmed = shim(":host-context(.x) {}", "contenta", "a-host");
        assert_not_contains(&shimmed, ".x[contenta]");
    }

    #[test]
    fn should_only_produce_the_compound_form_when_the_context_contains_host() {
        assert_equal_css(
            &shim(":host-context(.x:host) .y {}", "contenta", "a-host"),
            "[a-host].x .y[contenta] {}",
        );
    }
}
