//! Integration tests for the border composite: the thirteen interacting
//! entries and their consistency rules.

use quokka_cssom::{Priority, StyleDeclaration};

#[test]
fn test_border_seeds_every_view() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px solid red", Priority::Normal);

    assert_eq!(style.css_text(), "border: 1px solid red;");
    assert_eq!(style.get_property_value("border"), "1px solid red");
    assert_eq!(style.get_property_value("border-top"), "1px solid red");
    assert_eq!(style.get_property_value("border-left"), "1px solid red");
    assert_eq!(style.get_property_value("border-width"), "1px");
    assert_eq!(style.get_property_value("border-style"), "solid");
    assert_eq!(style.get_property_value("border-color"), "red");
    assert_eq!(style.get_property_value("border-top-width"), "1px");
    assert_eq!(style.get_property_value("border-bottom-color"), "red");
    assert_eq!(style.get_property_value("border-image"), "none");
}

#[test]
fn test_border_tokens_any_order() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "red solid 1px", Priority::Normal);
    // Canonical order is width style color.
    assert_eq!(style.get_property_value("border"), "1px solid red");
}

#[test]
fn test_border_none() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "none", Priority::Normal);
    assert_eq!(style.css_text(), "border: none;");
    assert_eq!(style.get_property_value("border-style"), "none");
    assert_eq!(style.get_property_value("border-top-style"), "none");
    assert_eq!(style.get_property_value("border-width"), "");
}

#[test]
fn test_border_rejects_ambiguous_or_duplicate_tokens() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px 2px solid", Priority::Normal);
    assert_eq!(style.css_text(), "");

    style.set_property("border", "totally bogus", Priority::Normal);
    assert_eq!(style.css_text(), "");
}

#[test]
fn test_line_shorthand_rederives_border_when_consistent() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px solid red", Priority::Normal);
    style.set_property("border-width", "3px", Priority::Normal);

    // All three lines plus border-image stay mutually consistent, so the
    // single border entry survives with the new width.
    assert_eq!(style.css_text(), "border: 3px solid red;");
}

#[test]
fn test_line_shorthand_breaks_border_when_inconsistent() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px solid red", Priority::Normal);
    style.set_property("border-width", "1px 2px", Priority::Normal);

    let text = style.css_text();
    assert!(!text.contains("border:"));
    assert!(text.contains("border-width: 1px 2px;"));
    assert!(text.contains("border-style: solid;"));
    assert!(text.contains("border-color: red;"));

    // Positional views remain readable.
    assert_eq!(style.get_property_value("border-top"), "1px solid red");
    assert_eq!(style.get_property_value("border-right"), "2px solid red");
}

#[test]
fn test_longhand_update_folds_into_line_presentation() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px solid red", Priority::Normal);
    style.set_property("border-top-width", "5px", Priority::Normal);

    let text = style.css_text();
    assert!(!text.contains("border:"));
    assert!(text.contains("border-width: 5px 1px 1px;"));
    assert!(text.contains("border-style: solid;"));
    assert!(text.contains("border-color: red;"));
    assert_eq!(style.get_property_value("border-top"), "5px solid red");
}

#[test]
fn test_redundant_longhand_keeps_border_intact() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px solid red", Priority::Normal);
    style.set_property("border-top-width", "1px", Priority::Normal);
    assert_eq!(style.css_text(), "border: 1px solid red;");

    // A longhand equal to its initial value also matches a shorthand that
    // does not mention it.
    style.set_property("border", "1px solid", Priority::Normal);
    style.set_property("border-top-color", "currentcolor", Priority::Normal);
    assert_eq!(style.css_text(), "border: 1px solid;");
}

#[test]
fn test_directional_shorthand_breaks_and_rederives_border() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px solid red", Priority::Normal);
    style.set_property("border-top", "2px dashed green", Priority::Normal);

    let text = style.css_text();
    assert!(!text.contains("border:"));
    assert!(text.contains("border-top: 2px dashed green;"));
    assert!(text.contains("border-right: 1px solid red;"));

    // Setting the odd direction back makes all four match again: border
    // re-derives.
    style.set_property("border-top", "1px solid red", Priority::Normal);
    assert_eq!(style.css_text(), "border: 1px solid red;");
}

#[test]
fn test_four_directional_sets_collapse_into_border() {
    let mut style = StyleDeclaration::new();
    for side in ["border-top", "border-right", "border-bottom", "border-left"] {
        style.set_property(side, "1px solid", Priority::Normal);
    }
    assert_eq!(style.css_text(), "border: 1px solid;");
}

#[test]
fn test_line_collapse_from_longhands() {
    let mut style = StyleDeclaration::new();
    for side in [
        "border-top-style",
        "border-right-style",
        "border-bottom-style",
        "border-left-style",
    ] {
        style.set_property(side, "dotted", Priority::Normal);
    }
    assert_eq!(style.css_text(), "border-style: dotted;");
}

#[test]
fn test_border_width_keywords() {
    let mut style = StyleDeclaration::new();
    style.set_property("border-width", "thin medium thick", Priority::Normal);
    assert_eq!(style.css_text(), "border-width: thin medium thick;");
    assert_eq!(style.get_property_value("border-left-width"), "medium");
}

#[test]
fn test_var_in_directional_shorthand_is_opaque() {
    let mut style = StyleDeclaration::new();
    style.set_property("border-top", "1px var(--foo) green", Priority::Normal);

    assert_eq!(
        style.get_property_value("border-top"),
        "1px var(--foo) green"
    );
    assert_eq!(style.get_property_value("border-top-width"), "");
    assert_eq!(style.get_property_value("border-top-style"), "");
    assert_eq!(style.get_property_value("border-top-color"), "");
    assert_eq!(style.css_text(), "border-top: 1px var(--foo) green;");
}

#[test]
fn test_var_on_border_clears_derived_family() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px solid red", Priority::Normal);
    style.set_property("border", "var(--b)", Priority::Normal);

    assert_eq!(style.get_property_value("border"), "var(--b)");
    assert_eq!(style.get_property_value("border-top"), "");
    assert_eq!(style.get_property_value("border-width"), "");
    assert_eq!(style.get_property_value("border-top-width"), "");
}

#[test]
fn test_border_color_accepts_functional_colors() {
    let mut style = StyleDeclaration::new();
    style.set_property("border-color", "rgb(1, 2, 3) #0f0", Priority::Normal);
    assert_eq!(
        style.css_text(),
        "border-color: rgb(1, 2, 3) rgb(0, 255, 0);"
    );
    assert_eq!(style.get_property_value("border-top-color"), "rgb(1, 2, 3)");
    assert_eq!(
        style.get_property_value("border-right-color"),
        "rgb(0, 255, 0)"
    );
}

#[test]
fn test_directional_update_splices_declared_line() {
    let mut style = StyleDeclaration::new();
    style.set_property("border-width", "1px", Priority::Normal);
    style.set_property("border-top-width", "2px", Priority::Normal);
    assert_eq!(style.css_text(), "border-width: 2px 1px 1px;");
}

#[test]
fn test_border_image_blocks_rederivation() {
    let mut style = StyleDeclaration::new();
    style.set_property("border", "1px solid red", Priority::Normal);
    style.set_property("border-image", "url(frame.png) 30", Priority::Normal);
    style.set_property("border-width", "3px", Priority::Normal);

    // border-image is no longer `none`, so border cannot re-derive.
    let text = style.css_text();
    assert!(!text.contains("border:"));
    assert!(text.contains("border-width: 3px;"));
}
