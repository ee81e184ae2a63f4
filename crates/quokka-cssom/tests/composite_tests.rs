//! Integration tests for the flex, background, font, and outline handlers.

use quokka_cssom::{Priority, StyleDeclaration};

// ----------------------------------------------------------------------
// flex
// ----------------------------------------------------------------------

#[test]
fn test_flex_single_number_sets_grow() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex", "2", Priority::Normal);
    assert_eq!(style.get_property_value("flex-grow"), "2");
    assert_eq!(style.get_property_value("flex-shrink"), "1");
    assert_eq!(style.get_property_value("flex-basis"), "0%");
    assert_eq!(style.css_text(), "flex: 2 1 0%;");
}

#[test]
fn test_flex_none_expands_to_0_0_auto() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex", "none", Priority::Normal);
    assert_eq!(style.get_property_value("flex-grow"), "0");
    assert_eq!(style.get_property_value("flex-shrink"), "0");
    assert_eq!(style.get_property_value("flex-basis"), "auto");
}

#[test]
fn test_flex_auto_expands_to_1_1_auto() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex", "auto", Priority::Normal);
    assert_eq!(style.css_text(), "flex: 1 1 auto;");
}

#[test]
fn test_flex_single_basis() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex", "10px", Priority::Normal);
    assert_eq!(style.get_property_value("flex-grow"), "1");
    assert_eq!(style.get_property_value("flex-basis"), "10px");

    style.set_property("flex", "30%", Priority::Normal);
    assert_eq!(style.get_property_value("flex-basis"), "30%");
}

#[test]
fn test_flex_two_numbers_and_number_basis() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex", "2 3", Priority::Normal);
    assert_eq!(style.css_text(), "flex: 2 3 0%;");

    style.set_property("flex", "2 10px", Priority::Normal);
    assert_eq!(style.css_text(), "flex: 2 1 10px;");

    style.set_property("flex", "2 3 10px", Priority::Normal);
    assert_eq!(style.css_text(), "flex: 2 3 10px;");
}

#[test]
fn test_flex_rejects_garbage() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex", "2 3 4", Priority::Normal);
    assert_eq!(style.css_text(), "");
    style.set_property("flex", "bogus", Priority::Normal);
    assert_eq!(style.css_text(), "");
}

#[test]
fn test_flex_member_recollapse() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex", "2", Priority::Normal);
    style.set_property("flex-grow", "5", Priority::Normal);
    assert_eq!(style.css_text(), "flex: 5 1 0%;");
}

#[test]
fn test_flex_members_collapse_when_all_present() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex-grow", "1", Priority::Normal);
    assert_eq!(style.css_text(), "flex-grow: 1;");
    style.set_property("flex-shrink", "2", Priority::Normal);
    style.set_property("flex-basis", "auto", Priority::Normal);
    assert_eq!(style.css_text(), "flex: 1 2 auto;");
}

#[test]
fn test_flex_keyword_member_blocks_collapse() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex-grow", "initial", Priority::Normal);
    style.set_property("flex-shrink", "2", Priority::Normal);
    style.set_property("flex-basis", "auto", Priority::Normal);

    let text = style.css_text();
    assert!(!text.contains("flex:"));
    assert!(text.contains("flex-grow: initial;"));
}

#[test]
fn test_flex_css_wide_keyword() {
    let mut style = StyleDeclaration::new();
    style.set_property("flex", "inherit", Priority::Normal);
    assert_eq!(style.css_text(), "flex: inherit;");
    assert_eq!(style.get_property_value("flex-grow"), "inherit");
}

// ----------------------------------------------------------------------
// background
// ----------------------------------------------------------------------

#[test]
fn test_background_single_layer() {
    let mut style = StyleDeclaration::new();
    style.set_property(
        "background",
        "url(img.png) no-repeat center red",
        Priority::Normal,
    );

    assert_eq!(
        style.css_text(),
        "background: url(\"img.png\") center no-repeat red;"
    );
    assert_eq!(style.get_property_value("background-image"), "url(\"img.png\")");
    assert_eq!(style.get_property_value("background-position"), "center");
    assert_eq!(style.get_property_value("background-repeat"), "no-repeat");
    assert_eq!(style.get_property_value("background-attachment"), "scroll");
    assert_eq!(style.get_property_value("background-color"), "red");
}

#[test]
fn test_background_color_only() {
    let mut style = StyleDeclaration::new();
    style.set_property("background", "#ff0000", Priority::Normal);
    assert_eq!(style.css_text(), "background: rgb(255, 0, 0);");
    assert_eq!(style.get_property_value("background-color"), "rgb(255, 0, 0)");
    assert_eq!(style.get_property_value("background-image"), "none");
}

#[test]
fn test_background_layers_rezipped() {
    let mut style = StyleDeclaration::new();
    style.set_property("background", "url(a.png), red url(b.png)", Priority::Normal);

    assert_eq!(
        style.get_property_value("background-image"),
        "url(\"a.png\"), url(\"b.png\")"
    );
    assert_eq!(style.get_property_value("background-color"), "red");
    assert_eq!(
        style.css_text(),
        "background: url(\"a.png\"), url(\"b.png\") red;"
    );
}

#[test]
fn test_background_color_only_in_final_layer() {
    let mut style = StyleDeclaration::new();
    style.set_property("background", "red url(a.png), url(b.png)", Priority::Normal);
    assert_eq!(style.css_text(), "");
}

#[test]
fn test_background_size_behind_slash() {
    let mut style = StyleDeclaration::new();
    style.set_property("background", "url(a.png) center / cover", Priority::Normal);
    assert_eq!(style.get_property_value("background-size"), "cover");
    assert_eq!(
        style.css_text(),
        "background: url(\"a.png\") center / cover;"
    );
}

#[test]
fn test_background_member_folds_into_shorthand() {
    let mut style = StyleDeclaration::new();
    style.set_property("background", "red", Priority::Normal);
    style.set_property("background-color", "blue", Priority::Normal);
    assert_eq!(style.css_text(), "background: blue;");

    style.set_property("background-image", "url(x.png)", Priority::Normal);
    assert_eq!(style.css_text(), "background: url(\"x.png\") blue;");
}

#[test]
fn test_background_member_standalone() {
    let mut style = StyleDeclaration::new();
    style.set_property("background-repeat", "repeat-x", Priority::Normal);
    assert_eq!(style.css_text(), "background-repeat: repeat-x;");

    style.set_property("background-position", "left top", Priority::Normal);
    assert_eq!(style.get_property_value("background-position"), "left top");
}

#[test]
fn test_background_gradient_image() {
    let mut style = StyleDeclaration::new();
    style.set_property(
        "background",
        "linear-gradient(to right, red, blue)",
        Priority::Normal,
    );
    assert_eq!(
        style.get_property_value("background-image"),
        "linear-gradient(to right, red, blue)"
    );
}

#[test]
fn test_background_mixed_priority_decomposes() {
    let mut style = StyleDeclaration::new();
    style.set_property("background", "red", Priority::Normal);
    style.set_property("background-color", "blue", Priority::Important);

    let text = style.css_text();
    assert!(!text.contains("background:"));
    assert!(text.contains("background-color: blue !important;"));
}

// ----------------------------------------------------------------------
// font
// ----------------------------------------------------------------------

#[test]
fn test_font_full_form() {
    let mut style = StyleDeclaration::new();
    style.set_property(
        "font",
        "italic bold 12px/1.5 Arial, sans-serif",
        Priority::Normal,
    );

    assert_eq!(style.css_text(), "font: italic bold 12px/1.5 Arial, sans-serif;");
    assert_eq!(style.get_property_value("font-style"), "italic");
    assert_eq!(style.get_property_value("font-weight"), "bold");
    assert_eq!(style.get_property_value("font-size"), "12px");
    assert_eq!(style.get_property_value("line-height"), "1.5");
    assert_eq!(style.get_property_value("font-family"), "Arial, sans-serif");
}

#[test]
fn test_font_minimal_form() {
    let mut style = StyleDeclaration::new();
    style.set_property("font", "16px serif", Priority::Normal);
    assert_eq!(style.css_text(), "font: 16px serif;");
    assert_eq!(style.get_property_value("font-size"), "16px");
    assert_eq!(style.get_property_value("font-family"), "serif");
}

#[test]
fn test_font_requires_size_and_family() {
    let mut style = StyleDeclaration::new();
    style.set_property("font", "12px", Priority::Normal);
    assert_eq!(style.css_text(), "");
    style.set_property("font", "bold Arial", Priority::Normal);
    assert_eq!(style.css_text(), "");
}

#[test]
fn test_font_normal_is_ambiguous_and_rejected() {
    // `normal` belongs to style, variant, and weight at once; strict
    // matching rejects the whole shorthand.
    let mut style = StyleDeclaration::new();
    style.set_property("font", "normal 12px Arial", Priority::Normal);
    assert_eq!(style.css_text(), "");
}

#[test]
fn test_font_member_updates_fold_into_shorthand() {
    let mut style = StyleDeclaration::new();
    style.set_property("font", "italic 12px serif", Priority::Normal);
    style.set_property("font-size", "14px", Priority::Normal);
    assert_eq!(style.css_text(), "font: italic 14px serif;");
    assert_eq!(style.get_property_value("font-size"), "14px");
}

#[test]
fn test_font_family_forms() {
    let mut style = StyleDeclaration::new();
    style.set_property("font-family", "Times New Roman, serif", Priority::Normal);
    assert_eq!(
        style.get_property_value("font-family"),
        "Times New Roman, serif"
    );

    style.set_property("font-family", "'Comic Sans'", Priority::Normal);
    assert_eq!(style.get_property_value("font-family"), "\"Comic Sans\"");

    style.set_property("font-family", "12px", Priority::Normal);
    assert_eq!(style.get_property_value("font-family"), "\"Comic Sans\"");
}

#[test]
fn test_font_weight_values() {
    let mut style = StyleDeclaration::new();
    style.set_property("font-weight", "700", Priority::Normal);
    assert_eq!(style.get_property_value("font-weight"), "700");
    style.set_property("font-weight", "750", Priority::Normal);
    assert_eq!(style.get_property_value("font-weight"), "700");
    style.set_property("font-weight", "bolder", Priority::Normal);
    assert_eq!(style.get_property_value("font-weight"), "bolder");
}

#[test]
fn test_line_height_forms() {
    let mut style = StyleDeclaration::new();
    style.set_property("line-height", "1.5", Priority::Normal);
    assert_eq!(style.get_property_value("line-height"), "1.5");
    style.set_property("line-height", "24px", Priority::Normal);
    assert_eq!(style.get_property_value("line-height"), "24px");
    style.set_property("line-height", "normal", Priority::Normal);
    assert_eq!(style.get_property_value("line-height"), "normal");
}

// ----------------------------------------------------------------------
// outline
// ----------------------------------------------------------------------

#[test]
fn test_outline_structured_parse() {
    let mut style = StyleDeclaration::new();
    style.set_property("outline", "red solid 2px", Priority::Normal);
    // Canonical member order is width style color.
    assert_eq!(style.css_text(), "outline: 2px solid red;");
    assert_eq!(style.get_property_value("outline-width"), "2px");
    assert_eq!(style.get_property_value("outline-style"), "solid");
    assert_eq!(style.get_property_value("outline-color"), "red");
}

#[test]
fn test_outline_member_folds_into_shorthand() {
    let mut style = StyleDeclaration::new();
    style.set_property("outline", "2px solid red", Priority::Normal);
    style.set_property("outline-color", "blue", Priority::Normal);
    assert_eq!(style.css_text(), "outline: 2px solid blue;");
}

#[test]
fn test_outline_rejects_unmatched_token() {
    let mut style = StyleDeclaration::new();
    style.set_property("outline", "2px solid bogus", Priority::Normal);
    assert_eq!(style.css_text(), "");
}

#[test]
fn test_outline_partial_value() {
    let mut style = StyleDeclaration::new();
    style.set_property("outline", "dotted", Priority::Normal);
    assert_eq!(style.css_text(), "outline: dotted;");
    assert_eq!(style.get_property_value("outline-width"), "");
}
