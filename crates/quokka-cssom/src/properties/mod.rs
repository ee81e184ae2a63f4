//! The property descriptor registry: the static dispatch from property name
//! to parse/serialize behavior.
//!
//! [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
//!
//! Each standard property name maps to a [`Descriptor`] — a `{set, get}`
//! pair. `set` performs the property's grammar validation and
//! canonicalization, then mutates the store through its primitives (or a
//! shorthand handler). Properties with no custom entry fall back to the
//! generic descriptor, which stores the trimmed raw text unmodified.
//!
//! Dispatch is a plain `match` over the lowercase name: explicit, static,
//! and exhaustively visible — no reflective property interception.

/// The `background` composite handler (comma-separated layer list).
pub mod background;
/// The `border` composite handler (13 interacting entries).
pub mod border;
/// The `flex` composite handler.
pub mod flex;
/// The `font` structured shorthand handler (plus `line-height`).
pub mod font;

use crate::declaration::{Priority, StyleDeclaration};
use crate::shorthand::{
    ImplicitGroup, StructuredGroup, StructuredMember, set_implicit, set_structured,
    set_structured_member, set_sub_implicit,
};
use crate::values::{
    Parsed, parse_color, parse_integer, parse_keyword, parse_length, parse_measurement,
    parse_number, parse_rect,
};

/// A property's registered behavior: grammar-validating setter and getter.
#[derive(Clone, Copy)]
pub struct Descriptor {
    /// Validate/canonicalize the raw value and mutate the store.
    pub set: fn(&mut StyleDeclaration, &str, &str, Priority),
    /// Read the property's current value from the store.
    pub get: fn(&StyleDeclaration, &str) -> String,
}

/// The generic descriptor: raw text stored verbatim, direct lookup.
const DEFAULT_DESCRIPTOR: Descriptor = Descriptor {
    set: set_verbatim,
    get: default_get,
};

/// Every standard property name the block recognizes, sorted for binary
/// search. `set_property` on a name outside this table is a no-op.
pub const SUPPORTED_PROPERTIES: [&str; 179] = [
    "align-content",
    "align-items",
    "align-self",
    "azimuth",
    "background",
    "background-attachment",
    "background-clip",
    "background-color",
    "background-image",
    "background-origin",
    "background-position",
    "background-repeat",
    "background-size",
    "border",
    "border-bottom",
    "border-bottom-color",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
    "border-bottom-style",
    "border-bottom-width",
    "border-collapse",
    "border-color",
    "border-image",
    "border-left",
    "border-left-color",
    "border-left-style",
    "border-left-width",
    "border-radius",
    "border-right",
    "border-right-color",
    "border-right-style",
    "border-right-width",
    "border-spacing",
    "border-style",
    "border-top",
    "border-top-color",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-top-style",
    "border-top-width",
    "border-width",
    "bottom",
    "box-shadow",
    "box-sizing",
    "caption-side",
    "caret-color",
    "clear",
    "clip",
    "clip-path",
    "color",
    "column-gap",
    "content",
    "counter-increment",
    "counter-reset",
    "cursor",
    "direction",
    "display",
    "empty-cells",
    "filter",
    "flex",
    "flex-basis",
    "flex-direction",
    "flex-flow",
    "flex-grow",
    "flex-shrink",
    "flex-wrap",
    "float",
    "flood-color",
    "font",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "gap",
    "grid",
    "grid-area",
    "grid-auto-columns",
    "grid-auto-flow",
    "grid-auto-rows",
    "grid-column",
    "grid-column-end",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-start",
    "grid-template",
    "grid-template-areas",
    "grid-template-columns",
    "grid-template-rows",
    "height",
    "inset",
    "justify-content",
    "justify-items",
    "justify-self",
    "left",
    "letter-spacing",
    "lighting-color",
    "line-height",
    "list-style",
    "list-style-image",
    "list-style-position",
    "list-style-type",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "object-fit",
    "object-position",
    "opacity",
    "order",
    "orphans",
    "outline",
    "outline-color",
    "outline-offset",
    "outline-style",
    "outline-width",
    "overflow",
    "overflow-wrap",
    "overflow-x",
    "overflow-y",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "page-break-after",
    "page-break-before",
    "page-break-inside",
    "perspective",
    "perspective-origin",
    "pointer-events",
    "position",
    "quotes",
    "resize",
    "right",
    "row-gap",
    "scroll-behavior",
    "stop-color",
    "stop-opacity",
    "table-layout",
    "text-align",
    "text-decoration",
    "text-decoration-color",
    "text-decoration-line",
    "text-decoration-style",
    "text-indent",
    "text-overflow",
    "text-shadow",
    "text-transform",
    "top",
    "transform",
    "transform-origin",
    "transform-style",
    "transition",
    "transition-delay",
    "transition-duration",
    "transition-property",
    "transition-timing-function",
    "unicode-bidi",
    "user-select",
    "vertical-align",
    "visibility",
    "white-space",
    "widows",
    "width",
    "will-change",
    "word-break",
    "word-spacing",
    "word-wrap",
    "writing-mode",
    "z-index",
];

/// Membership test against [`SUPPORTED_PROPERTIES`].
#[must_use]
pub fn is_supported(name: &str) -> bool {
    SUPPORTED_PROPERTIES.binary_search(&name).is_ok()
}

/// Resolve a lowercase standard property name to its descriptor.
#[must_use]
pub fn lookup(name: &str) -> Descriptor {
    let set: fn(&mut StyleDeclaration, &str, &str, Priority) = match name {
        // Implicit corner groups
        "margin" | "padding" => set_implicit_shorthand,
        "margin-top" | "margin-right" | "margin-bottom" | "margin-left" | "padding-top"
        | "padding-right" | "padding-bottom" | "padding-left" => set_implicit_side,

        // The border family
        "border" => border::set_border,
        "border-width" | "border-style" | "border-color" => border::set_line_shorthand,
        "border-top" | "border-right" | "border-bottom" | "border-left" => {
            border::set_position_shorthand
        }
        "border-top-width" | "border-top-style" | "border-top-color" | "border-right-width"
        | "border-right-style" | "border-right-color" | "border-bottom-width"
        | "border-bottom-style" | "border-bottom-color" | "border-left-width"
        | "border-left-style" | "border-left-color" => border::set_longhand,

        // Structured groups
        "outline" => set_outline_shorthand,
        "outline-width" | "outline-style" | "outline-color" => set_outline_member,
        "font" => font::set_font,
        "font-style" | "font-variant" | "font-weight" | "font-size" | "line-height"
        | "font-family" => font::set_member,

        // Composites
        "flex" => flex::set_flex,
        "flex-grow" | "flex-shrink" | "flex-basis" => flex::set_member,
        "background" => background::set_background,
        "background-color" | "background-image" | "background-repeat"
        | "background-attachment" | "background-position" | "background-size" => {
            background::set_member
        }

        // Colors
        "color" | "caret-color" | "text-decoration-color" | "flood-color" | "lighting-color"
        | "stop-color" => set_color_property,

        // Measurements
        "width" | "height" | "top" | "right" | "bottom" | "left" | "vertical-align" => {
            set_auto_measurement_property
        }
        "min-width" | "min-height" | "text-indent" => set_measurement_property,
        "max-width" | "max-height" => set_none_measurement_property,
        "letter-spacing" | "word-spacing" => set_normal_length_property,

        // Numbers and integers
        "opacity" | "stop-opacity" => set_number_property,
        "order" | "widows" | "orphans" => set_integer_property,
        "z-index" => set_integer_or_auto_property,

        // Closed keyword sets
        "box-sizing" | "caption-side" | "clear" | "direction" | "display" | "empty-cells"
        | "float" | "overflow" | "overflow-x" | "overflow-y" | "position" | "table-layout"
        | "text-align" | "text-transform" | "visibility" | "white-space" => set_keyword_property,

        // rect() or auto
        "clip" => set_clip_property,

        _ => return DEFAULT_DESCRIPTOR,
    };
    Descriptor {
        set,
        get: default_get,
    }
}

// ----------------------------------------------------------------------
// Shorthand group tables
// ----------------------------------------------------------------------

/// `margin` — [CSS Box § 6.3](https://www.w3.org/TR/css-box-4/#margin-shorthand)
pub const MARGIN_GROUP: ImplicitGroup = ImplicitGroup {
    shorthand: "margin",
    parts: ["margin-top", "margin-right", "margin-bottom", "margin-left"],
    parse_part: parse_margin_part,
};

/// `padding` — [CSS Box § 7.2](https://www.w3.org/TR/css-box-4/#padding-shorthand)
pub const PADDING_GROUP: ImplicitGroup = ImplicitGroup {
    shorthand: "padding",
    parts: [
        "padding-top",
        "padding-right",
        "padding-bottom",
        "padding-left",
    ],
    parse_part: parse_padding_part,
};

/// `outline` — [CSS UI § 4.1](https://www.w3.org/TR/css-ui-4/#outline-props)
pub const OUTLINE_GROUP: StructuredGroup = StructuredGroup {
    shorthand: "outline",
    members: &[
        StructuredMember {
            name: "outline-width",
            parse: parse_border_width_part,
        },
        StructuredMember {
            name: "outline-style",
            parse: parse_outline_style_part,
        },
        StructuredMember {
            name: "outline-color",
            parse: parse_outline_color_part,
        },
    ],
};

/// Resolve an implicit-group side name to its group and side index.
fn implicit_side(name: &str) -> Option<(&'static ImplicitGroup, usize)> {
    let group = if name.starts_with("margin") {
        &MARGIN_GROUP
    } else {
        &PADDING_GROUP
    };
    group.parts.iter().position(|p| *p == name).map(|i| (group, i))
}

fn set_implicit_shorthand(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let group = if name == "margin" {
        &MARGIN_GROUP
    } else {
        &PADDING_GROUP
    };
    set_implicit(store, group, raw, priority);
}

fn set_implicit_side(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    if let Some((group, side)) = implicit_side(name) {
        set_sub_implicit(store, group, side, raw, priority);
    }
}

fn set_outline_shorthand(store: &mut StyleDeclaration, _name: &str, raw: &str, priority: Priority) {
    set_structured(store, &OUTLINE_GROUP, raw, priority);
}

fn set_outline_member(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    if let Some(member) = OUTLINE_GROUP.members.iter().position(|m| m.name == name) {
        set_structured_member(store, &OUTLINE_GROUP, member, raw, priority);
    }
}

// ----------------------------------------------------------------------
// Token grammars shared by the shorthand groups
// ----------------------------------------------------------------------

/// "`<line-style>` = none | hidden | dotted | dashed | solid | double |
/// groove | ridge | inset | outset"
///
/// [CSS Backgrounds § 3.2](https://www.w3.org/TR/css-backgrounds-3/#border-style)
pub const BORDER_STYLE_KEYWORDS: [&str; 10] = [
    "dashed", "dotted", "double", "groove", "hidden", "inset", "none", "outset", "ridge", "solid",
];

/// "`<line-width>` = `<length>` | thin | medium | thick"
///
/// [CSS Backgrounds § 3.3](https://www.w3.org/TR/css-backgrounds-3/#border-width)
pub fn parse_border_width_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &["medium", "thick", "thin"]) {
        Parsed::Reject => parse_length(raw),
        parsed => parsed,
    }
}

/// See [`BORDER_STYLE_KEYWORDS`].
pub fn parse_border_style_part(raw: &str) -> Parsed {
    parse_keyword(raw, &BORDER_STYLE_KEYWORDS)
}

/// "`<color>`" for a border side.
pub fn parse_border_color_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &[]) {
        Parsed::Reject => parse_color(raw),
        parsed => parsed,
    }
}

/// "`<'outline-style'>` = auto | `<line-style>`"
fn parse_outline_style_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &["auto"]) {
        Parsed::Reject => parse_border_style_part(raw),
        parsed => parsed,
    }
}

/// "`<'outline-color'>` = `<color>` | invert"
fn parse_outline_color_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &["invert"]) {
        Parsed::Reject => parse_color(raw),
        parsed => parsed,
    }
}

/// "`<margin-width>` = `<length>` | `<percentage>` | auto"
fn parse_margin_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &["auto"]) {
        Parsed::Reject => parse_measurement(raw),
        parsed => parsed,
    }
}

/// "`<padding-width>` = `<length>` | `<percentage>`"
fn parse_padding_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &[]) {
        Parsed::Reject => parse_measurement(raw),
        parsed => parsed,
    }
}

// ----------------------------------------------------------------------
// Simple property setters
// ----------------------------------------------------------------------

/// The generic descriptor's setter: trimmed raw text, stored unmodified.
fn set_verbatim(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    store.upsert(name, raw, priority);
}

/// The generic descriptor's getter: direct store lookup.
fn default_get(store: &StyleDeclaration, name: &str) -> String {
    store.value_of(name).unwrap_or_default().to_string()
}

fn apply(store: &mut StyleDeclaration, name: &str, parsed: Parsed, priority: Priority) {
    if let Parsed::Value(value) = parsed {
        store.upsert(name, &value, priority);
    }
}

fn set_color_property(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    apply(store, name, parse_border_color_part(raw), priority);
}

fn set_measurement_property(
    store: &mut StyleDeclaration,
    name: &str,
    raw: &str,
    priority: Priority,
) {
    apply(store, name, parse_padding_part(raw), priority);
}

fn set_auto_measurement_property(
    store: &mut StyleDeclaration,
    name: &str,
    raw: &str,
    priority: Priority,
) {
    let parsed = if name == "vertical-align" {
        match parse_keyword(
            raw,
            &[
                "baseline",
                "bottom",
                "middle",
                "sub",
                "super",
                "text-bottom",
                "text-top",
                "top",
            ],
        ) {
            Parsed::Reject => parse_measurement(raw),
            parsed => parsed,
        }
    } else {
        parse_margin_part(raw)
    };
    apply(store, name, parsed, priority);
}

fn set_none_measurement_property(
    store: &mut StyleDeclaration,
    name: &str,
    raw: &str,
    priority: Priority,
) {
    let parsed = match parse_keyword(raw, &["none"]) {
        Parsed::Reject => parse_measurement(raw),
        parsed => parsed,
    };
    apply(store, name, parsed, priority);
}

fn set_normal_length_property(
    store: &mut StyleDeclaration,
    name: &str,
    raw: &str,
    priority: Priority,
) {
    let parsed = match parse_keyword(raw, &["normal"]) {
        Parsed::Reject => parse_length(raw),
        parsed => parsed,
    };
    apply(store, name, parsed, priority);
}

fn set_number_property(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let parsed = match parse_keyword(raw, &[]) {
        Parsed::Reject => parse_number(raw),
        parsed => parsed,
    };
    apply(store, name, parsed, priority);
}

fn set_integer_property(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let parsed = match parse_keyword(raw, &[]) {
        Parsed::Reject => parse_integer(raw),
        parsed => parsed,
    };
    apply(store, name, parsed, priority);
}

fn set_integer_or_auto_property(
    store: &mut StyleDeclaration,
    name: &str,
    raw: &str,
    priority: Priority,
) {
    let parsed = match parse_keyword(raw, &["auto"]) {
        Parsed::Reject => parse_integer(raw),
        parsed => parsed,
    };
    apply(store, name, parsed, priority);
}

fn set_keyword_property(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    apply(
        store,
        name,
        parse_keyword(raw, keyword_allow_list(name)),
        priority,
    );
}

/// The closed keyword set per keyword-valued property.
fn keyword_allow_list(name: &str) -> &'static [&'static str] {
    match name {
        "box-sizing" => &["border-box", "content-box"],
        "caption-side" => &["bottom", "top"],
        "clear" => &["both", "left", "none", "right"],
        "direction" => &["ltr", "rtl"],
        "display" => &[
            "block",
            "contents",
            "flex",
            "flow-root",
            "grid",
            "inline",
            "inline-block",
            "inline-flex",
            "inline-grid",
            "inline-table",
            "list-item",
            "none",
            "table",
            "table-caption",
            "table-cell",
            "table-column",
            "table-column-group",
            "table-footer-group",
            "table-header-group",
            "table-row",
            "table-row-group",
        ],
        "empty-cells" => &["hide", "show"],
        "float" => &["left", "none", "right"],
        "overflow" | "overflow-x" | "overflow-y" => {
            &["auto", "clip", "hidden", "scroll", "visible"]
        }
        "position" => &["absolute", "fixed", "relative", "static", "sticky"],
        "table-layout" => &["auto", "fixed"],
        "text-align" => &["center", "justify", "left", "right"],
        "text-transform" => &["capitalize", "lowercase", "none", "uppercase"],
        "visibility" => &["collapse", "hidden", "visible"],
        "white-space" => &["break-spaces", "normal", "nowrap", "pre", "pre-line", "pre-wrap"],
        _ => &[],
    }
}

/// "`<'clip'>` = rect() | auto" — legacy clipping.
///
/// [CSS Masking § 10.1](https://www.w3.org/TR/css-masking-1/#clip-property)
fn set_clip_property(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let parsed = match parse_keyword(raw, &["auto"]) {
        Parsed::Reject => parse_rect(raw),
        parsed => parsed,
    };
    apply(store, name, parsed, priority);
}

// ----------------------------------------------------------------------
// Group membership
// ----------------------------------------------------------------------

/// The direct member longhands of a shorthand, empty for non-shorthands.
#[must_use]
pub fn members_of(name: &str) -> &'static [&'static str] {
    match name {
        "margin" => &["margin-top", "margin-right", "margin-bottom", "margin-left"],
        "padding" => &[
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
        ],
        "border" => &[
            "border-width",
            "border-style",
            "border-color",
            "border-top",
            "border-right",
            "border-bottom",
            "border-left",
            "border-image",
        ],
        "border-width" => &[
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
        "border-style" => &[
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
        ],
        "border-color" => &[
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
        "border-top" => &["border-top-width", "border-top-style", "border-top-color"],
        "border-right" => &[
            "border-right-width",
            "border-right-style",
            "border-right-color",
        ],
        "border-bottom" => &[
            "border-bottom-width",
            "border-bottom-style",
            "border-bottom-color",
        ],
        "border-left" => &[
            "border-left-width",
            "border-left-style",
            "border-left-color",
        ],
        "outline" => &["outline-width", "outline-style", "outline-color"],
        "font" => &[
            "font-style",
            "font-variant",
            "font-weight",
            "font-size",
            "line-height",
            "font-family",
        ],
        "flex" => &["flex-grow", "flex-shrink", "flex-basis"],
        "background" => &[
            "background-image",
            "background-position",
            "background-size",
            "background-repeat",
            "background-attachment",
            "background-color",
        ],
        _ => &[],
    }
}

/// The transitive member longhands of a shorthand (for `border`, the line
/// and position shorthands plus all twelve directional longhands).
#[must_use]
pub fn expanded_members(name: &str) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    let mut worklist: Vec<&'static str> = members_of(name).to_vec();
    while let Some(member) = worklist.pop() {
        if out.contains(&member) {
            continue;
        }
        out.push(member);
        worklist.extend_from_slice(members_of(member));
    }
    out
}

/// Every shorthand whose expansion contains `name`, nearest first
/// (`border-top-width` → `border-top`, `border-width`, `border`).
#[must_use]
pub fn enclosing_shorthands(name: &str) -> Vec<&'static str> {
    const SHORTHANDS: [&str; 14] = [
        "border-top",
        "border-right",
        "border-bottom",
        "border-left",
        "border-width",
        "border-style",
        "border-color",
        "margin",
        "padding",
        "outline",
        "font",
        "flex",
        "background",
        "border",
    ];
    SHORTHANDS
        .into_iter()
        .filter(|shorthand| expanded_members(shorthand).contains(&name))
        .collect()
}

/// The CSS initial value of the longhands the composite handlers reason
/// about. Consistency tests treat a longhand equal to its initial value as
/// compatible with a shorthand that does not mention it.
#[must_use]
pub fn initial_value(name: &str) -> &'static str {
    match name {
        "border-top-width" | "border-right-width" | "border-bottom-width"
        | "border-left-width" | "outline-width" => "medium",
        "border-top-style" | "border-right-style" | "border-bottom-style"
        | "border-left-style" | "outline-style" | "background-image" | "border-image" => "none",
        "border-top-color" | "border-right-color" | "border-bottom-color"
        | "border-left-color" => "currentcolor",
        "outline-color" => "invert",
        "background-color" => "transparent",
        "background-repeat" => "repeat",
        "background-attachment" => "scroll",
        "background-position" => "0% 0%",
        "background-size" => "auto",
        "flex-grow" => "0",
        "flex-shrink" => "1",
        "flex-basis" => "auto",
        "font-style" | "font-variant" | "font-weight" | "line-height" => "normal",
        "font-size" => "medium",
        "margin-top" | "margin-right" | "margin-bottom" | "margin-left" | "padding-top"
        | "padding-right" | "padding-bottom" | "padding-left" => "0px",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binary search requires a sorted table; guard against edits breaking it.
    #[test]
    fn supported_table_is_sorted() {
        assert!(SUPPORTED_PROPERTIES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn membership() {
        assert!(is_supported("color"));
        assert!(is_supported("border-top-width"));
        assert!(is_supported("z-index"));
        assert!(!is_supported("not-a-real-property"));
        assert!(!is_supported("Color"));
    }

    #[test]
    fn border_members_expand_transitively() {
        let expanded = expanded_members("border");
        assert!(expanded.contains(&"border-top"));
        assert!(expanded.contains(&"border-width"));
        assert!(expanded.contains(&"border-left-color"));
        assert!(expanded.contains(&"border-image"));
        assert_eq!(expanded.len(), 20);
    }

    #[test]
    fn enclosing_shorthands_of_longhand() {
        let enclosing = enclosing_shorthands("border-top-width");
        assert!(enclosing.contains(&"border-top"));
        assert!(enclosing.contains(&"border-width"));
        assert!(enclosing.contains(&"border"));
        assert_eq!(enclosing.len(), 3);

        assert_eq!(enclosing_shorthands("margin-left"), vec!["margin"]);
        assert!(enclosing_shorthands("color").is_empty());
    }
}
