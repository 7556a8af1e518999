//! Polyfill directive Tests

mod utils;

use utils::{assert_equal_css, assert_not_contains, shim};

mod polyfill_next_selector {
    use super::*;

    #[test]
    fn should_use_the_content_as_the_next_selector() {
        let css = "polyfill-next-selector {content: 'x > y'} z {}";
        assert_equal_css(&shim(css, "contenta", ""), "x[contenta] > y[contenta]{}");

        let css = "polyfill-next-selector {content: \"x > y\"} z {}";
        assert_equal_css(&shim(css, "contenta", ""), "x[contenta] > y[contenta]{}");
    }

    #[test]
    fn should_accept_the_other_quote_inside_the_content() {
        let css = "polyfill-next-selector {content: 'button[priority=\"1\"]'} z {}";
        assert_equal_css(
            &shim(css, "contenta", ""),
            "button[priority=\"1\"][contenta]{}",
        );
    }

    #[test]
    fn should_rewrite_host_in_the_content() {
        let css = "polyfill-next-selector {content: ':host menu-item'} ::content menu-item {}";
        assert_equal_css(
            &shim(css, "contenta", "a-host"),
            "[a-host] menu-item[contenta]{}",
        );
    }
}

mod polyfill_rule {
    use super::*;

    #[test]
    fn should_scope_the_content_selector() {
        let css = "polyfill-rule {content: ':host.foo .bar';color: blue;}";
        assert_equal_css(
            &shim(css, "contenta", "a-host"),
            "[a-host].foo .bar[contenta] {;color:blue;}",
        );

        let css = "polyfill-rule {content: \":host.foo .bar\";color:blue;}";
        assert_equal_css(
            &shim(css, "contenta", "a-host"),
            "[a-host].foo .bar[contenta] {;color:blue;}",
        );
    }

    #[test]
    fn should_accept_the_other_quote_inside_the_content() {
        let css = "polyfill-rule {content: 'button[priority=\"1\"]'}";
        assert_equal_css(
            &shim(css, "contenta", "a-host"),
            "button[priority=\"1\"][contenta] {}",
        );
    }
}

mod polyfill_unscoped_rule {
    use super::*;

    #[test]
    fn should_not_scope_the_rule() {
        let css = "polyfill-unscoped-rule {content: '#menu > .bar';color: blue;}";
        assert_eq!(shim(css, "contenta", ""), "#menu > .bar {;color: blue;}");

        let css = "polyfill-unscoped-rule {content: \"#menu > .bar\";color: blue;}";
        assert_eq!(shim(css, "contenta", ""), "#menu > .bar {;color: blue;}");
    }

    #[test]
    fn should_accept_the_other_quote_inside_the_content() {
        let css = "polyfill-unscoped-rule {content: 'button[priority=\"1\"]'}";
        assert_eq!(shim(css, "contenta", ""), "button[priority=\"1\"] {}");
    }

    #[test]
    fn should_support_multiple_rules() {
        let css = "polyfill-unscoped-rule {content: 'foo';color: blue;}\
                   polyfill-unscoped-rule {content: 'bar';color: blue;}";
        assert_eq!(
            shim(css, "contenta", ""),
            "foo {;color: blue;}\n\nbar {;color: blue;}"
        );
    }

    #[test]
    fn should_append_the_rules_after_the_scoped_ones() {
        let css = "div {} polyfill-unscoped-rule { content: 'menu-item'; color: red; }";
        let shimmed = shim(css, "contenta", "");
        assert_eq!(shimmed, "div[contenta] {}\n\nmenu-item { ; color: red; }");
        assert_not_contains(&shimmed, "menu-item[contenta]");
    }
}
