//! Integration tests for bulk `cssText` parsing: fail-soft recovery,
//! duplicate handling, nested-block and at-rule quirks, and notification.

use std::cell::RefCell;
use std::rc::Rc;

use quokka_cssom::{Priority, StyleDeclaration};

#[test]
fn test_basic_round_trip() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("color: red; margin-top: 4px");
    assert_eq!(style.css_text(), "color: red; margin-top: 4px;");
}

#[test]
fn test_replaces_existing_state() {
    let mut style = StyleDeclaration::new();
    style.set_property("opacity", "0.5", Priority::Normal);
    style.set_css_text("color: red;");
    assert_eq!(style.css_text(), "color: red;");
    assert_eq!(style.get_property_value("opacity"), "");
}

#[test]
fn test_important_priority_survives() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("margin-top: 3px !important; color: red");
    assert_eq!(style.get_property_priority("margin-top"), "important");
    assert_eq!(style.css_text(), "margin-top: 3px !important; color: red;");
}

#[test]
fn test_values_are_normalized_like_incremental_sets() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("color: #f00; opacity: .5");
    assert_eq!(style.get_property_value("color"), "rgb(255, 0, 0)");
    assert_eq!(style.get_property_value("opacity"), "0.5");
}

#[test]
fn test_malformed_declaration_is_dropped_not_fatal() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("color red; background-color: blue");
    assert_eq!(style.css_text(), "background-color: blue;");
}

#[test]
fn test_unknown_properties_are_dropped() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("colour: red; color: blue");
    assert_eq!(style.css_text(), "color: blue;");
}

#[test]
fn test_duplicate_declarations_keep_last_value() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("color: red; margin-top: 1px; color: blue");
    assert_eq!(style.get_property_value("color"), "blue");
    // Position follows the first occurrence.
    assert_eq!(style.css_text(), "color: blue; margin-top: 1px;");
}

#[test]
fn test_nested_selector_block_skips_following_declaration() {
    let mut style = StyleDeclaration::new();
    style.set_css_text(
        "color: red; &.nested { color: blue; } margin-top: 10px; padding-top: 2px;",
    );
    assert_eq!(style.get_property_value("color"), "red");
    assert_eq!(style.get_property_value("margin-top"), "");
    assert_eq!(style.get_property_value("padding-top"), "2px");
}

#[test]
fn test_declarations_after_at_rule_block_are_included() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("color: red; @media (min-width: 100px) { color: blue; } margin-top: 10px;");
    assert_eq!(style.get_property_value("color"), "red");
    assert_eq!(style.get_property_value("margin-top"), "10px");
}

#[test]
fn test_custom_properties_via_css_text() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("--accent: #00f; color: var(--accent)");
    assert_eq!(style.get_property_value("--accent"), "#00f");
    assert_eq!(style.get_property_value("color"), "var(--accent)");
}

#[test]
fn test_garbage_yields_empty_block_without_error() {
    let mut style = StyleDeclaration::new();
    style.set_css_text("@!#$%");
    assert_eq!(style.css_text(), "");
    style.set_css_text("{}{}{}");
    assert_eq!(style.css_text(), "");
}

#[test]
fn test_single_notification_for_whole_replacement() {
    let count: Rc<RefCell<usize>> = Rc::default();
    let sink = Rc::clone(&count);
    let mut style =
        StyleDeclaration::with_change_handler(Box::new(move |_| *sink.borrow_mut() += 1));

    style.set_css_text("color: red; margin: 1px 2px; opacity: 0.5");
    assert_eq!(*count.borrow(), 1);

    // Re-assigning text that serializes identically is a no-op.
    style.set_css_text("color: red; margin: 1px 2px; opacity: 0.5");
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_shorthands_normalize_identically_to_incremental() {
    let mut bulk = StyleDeclaration::new();
    bulk.set_css_text("margin: 1px 2px 1px 2px; border: 1px solid red;");

    let mut incremental = StyleDeclaration::new();
    incremental.set_property("margin", "1px 2px 1px 2px", Priority::Normal);
    incremental.set_property("border", "1px solid red", Priority::Normal);

    assert_eq!(bulk.css_text(), incremental.css_text());
    assert_eq!(bulk.css_text(), "margin: 1px 2px; border: 1px solid red;");
}
