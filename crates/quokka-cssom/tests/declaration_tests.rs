//! Integration tests for the declaration store: get/set/remove, ordering,
//! priorities, indexed access, and change notification.

use std::cell::RefCell;
use std::rc::Rc;

use quokka_cssom::{Priority, StyleDeclaration, StyleError};

#[test]
fn test_set_and_get_property() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Normal);
    assert_eq!(style.get_property_value("color"), "red");
    assert_eq!(style.css_text(), "color: red;");
}

#[test]
fn test_property_names_case_insensitive() {
    let mut style = StyleDeclaration::new();
    style.set_property("COLOR", "red", Priority::Normal);
    assert_eq!(style.get_property_value("Color"), "red");
    assert_eq!(style.css_text(), "color: red;");
}

#[test]
fn test_priority_tracked_and_serialized() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Important);
    assert_eq!(style.get_property_priority("color"), "important");
    assert_eq!(style.css_text(), "color: red !important;");

    style.set_property("color", "blue", Priority::Normal);
    assert_eq!(style.get_property_priority("color"), "");
    assert_eq!(style.css_text(), "color: blue;");
}

#[test]
fn test_remove_property_returns_prior_value() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Normal);
    assert_eq!(style.remove_property("color"), "red");
    assert_eq!(style.remove_property("color"), "");
    assert_eq!(style.css_text(), "");
}

#[test]
fn test_empty_value_removes_property() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Normal);
    style.set_property("color", "", Priority::Normal);
    assert_eq!(style.get_property_value("color"), "");
    assert_eq!(style.length(), 0);
}

#[test]
fn test_unknown_property_is_ignored() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Normal);
    style.set_property("not-a-real-property", "x", Priority::Normal);
    assert_eq!(style.length(), 1);
    assert_eq!(style.css_text(), "color: red;");
}

#[test]
fn test_invalid_value_leaves_property_unchanged() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Normal);
    style.set_property("color", "notacolor", Priority::Normal);
    assert_eq!(style.get_property_value("color"), "red");
}

#[test]
fn test_item_and_indexed_access() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Normal);
    style.set_property("margin-top", "1px", Priority::Normal);

    assert_eq!(style.length(), 2);
    assert_eq!(style.item(Some(0)), Ok("color".to_string()));
    assert_eq!(style.item(Some(1)), Ok("margin-top".to_string()));
    assert_eq!(style.item(Some(2)), Ok(String::new()));
    assert_eq!(&style[0], "color");
    assert_eq!(&style[1], "margin-top");
    assert_eq!(&style[5], "");
}

#[test]
fn test_item_without_index_is_a_hard_failure() {
    let style = StyleDeclaration::new();
    assert_eq!(style.item(None), Err(StyleError::MissingItemIndex));
}

#[test]
fn test_length_truncation_quirk() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Normal);
    style.set_property("opacity", "0.5", Priority::Normal);

    style.set_length(1);
    assert_eq!(style.length(), 1);
    assert_eq!(style.css_text(), "color: red;");
    // The truncated entry's value is left stale and still readable.
    assert_eq!(style.get_property_value("opacity"), "0.5");

    // Growing the length is a no-op.
    style.set_length(10);
    assert_eq!(style.length(), 1);
}

#[test]
fn test_overwrite_keeps_declaration_position() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "red", Priority::Normal);
    style.set_property("opacity", "0.5", Priority::Normal);
    style.set_property("color", "blue", Priority::Normal);
    assert_eq!(style.css_text(), "color: blue; opacity: 0.5;");
}

#[test]
fn test_custom_properties_case_sensitive_and_verbatim() {
    let mut style = StyleDeclaration::new();
    style.set_property("--Main-Color", "#f00", Priority::Normal);
    assert_eq!(style.get_property_value("--Main-Color"), "#f00");
    assert_eq!(style.get_property_value("--main-color"), "");
    assert_eq!(style.css_text(), "--Main-Color: #f00;");
}

#[test]
fn test_var_reference_stored_opaquely() {
    let mut style = StyleDeclaration::new();
    style.set_property("color", "var(--accent)", Priority::Normal);
    assert_eq!(style.get_property_value("color"), "var(--accent)");
}

#[test]
fn test_change_callback_receives_final_css_text() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let mut style =
        StyleDeclaration::with_change_handler(Box::new(move |text| sink.borrow_mut().push(text.to_string())));

    style.set_property("color", "red", Priority::Normal);
    style.set_property("margin-top", "4px", Priority::Normal);

    let calls = seen.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], "color: red;");
    assert_eq!(calls[1], "color: red; margin-top: 4px;");
}

#[test]
fn test_no_op_set_does_not_notify() {
    let count: Rc<RefCell<usize>> = Rc::default();
    let sink = Rc::clone(&count);
    let mut style =
        StyleDeclaration::with_change_handler(Box::new(move |_| *sink.borrow_mut() += 1));

    style.set_property("opacity", "0", Priority::Normal);
    style.set_property("opacity", "0", Priority::Normal);
    assert_eq!(*count.borrow(), 1);

    // A rejected value is also unobservable.
    style.set_property("opacity", "bogus", Priority::Normal);
    assert_eq!(*count.borrow(), 1);

    // Removing an absent property is unobservable.
    let _ = style.remove_property("color");
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_priority_parse() {
    assert_eq!(Priority::parse(""), Some(Priority::Normal));
    assert_eq!(Priority::parse("important"), Some(Priority::Important));
    assert_eq!(Priority::parse("IMPORTANT"), Some(Priority::Important));
    assert_eq!(Priority::parse("weird"), None);
}

#[test]
fn test_default_descriptor_stores_verbatim() {
    let mut style = StyleDeclaration::new();
    style.set_property("transform", "rotate(45deg) translateX(10px)", Priority::Normal);
    assert_eq!(
        style.get_property_value("transform"),
        "rotate(45deg) translateX(10px)"
    );
}
