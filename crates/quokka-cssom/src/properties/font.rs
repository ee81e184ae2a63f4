//! The `font` structured shorthand, plus its member longhands (including
//! `line-height`).
//!
//! [CSS Fonts § 3.7 The font Shorthand](https://www.w3.org/TR/css-fonts-4/#font-prop)
//!
//! "font: [ `<'font-style'>` || `<'font-variant'>` || `<'font-weight'>` ]?
//! `<'font-size'>` [ / `<'line-height'>` ]? `<'font-family'>`"
//!
//! The optional head tokens are matched strictly (a token must belong to
//! exactly one member — `normal`, which three members share, rejects the
//! shorthand); the first size token may carry `/<line-height>`, and
//! everything after it is the font family.

use quokka_syntax::{
    ComponentValue, CssToken, parse_component_values, quote_string, split_commas,
    split_whitespace_runs,
};

use crate::declaration::{Priority, StyleDeclaration};
use crate::shorthand::split_tokens;
use crate::values::{Parsed, as_css_wide_keyword, parse_integer, parse_keyword, parse_measurement, parse_number};

const MEMBERS: [&str; 6] = [
    "font-style",
    "font-variant",
    "font-weight",
    "font-size",
    "line-height",
    "font-family",
];

/// "`<'font-style'>` = normal | italic | oblique"
fn parse_style(raw: &str) -> Parsed {
    parse_keyword(raw, &["italic", "normal", "oblique"])
}

/// "`<'font-variant'>` = normal | small-caps" (CSS 2 subset)
fn parse_variant(raw: &str) -> Parsed {
    parse_keyword(raw, &["normal", "small-caps"])
}

/// "`<'font-weight'>` = normal | bold | bolder | lighter | 100..900"
fn parse_weight(raw: &str) -> Parsed {
    match parse_keyword(raw, &["bold", "bolder", "lighter", "normal"]) {
        Parsed::Reject => match parse_integer(raw) {
            Parsed::Value(v) => {
                if matches!(
                    v.as_str(),
                    "100" | "200" | "300" | "400" | "500" | "600" | "700" | "800" | "900"
                ) {
                    Parsed::Value(v)
                } else {
                    Parsed::Reject
                }
            }
            parsed => parsed,
        },
        parsed => parsed,
    }
}

/// "`<'font-size'>` = `<absolute-size>` | `<relative-size>` | `<length-percentage>`"
fn parse_size(raw: &str) -> Parsed {
    match parse_keyword(
        raw,
        &[
            "large", "larger", "medium", "small", "smaller", "x-large", "x-small", "xx-large",
            "xx-small",
        ],
    ) {
        Parsed::Reject => parse_measurement(raw),
        parsed => parsed,
    }
}

/// "`<'line-height'>` = normal | `<number>` | `<length-percentage>`"
fn parse_line_height(raw: &str) -> Parsed {
    match parse_keyword(raw, &["normal"]) {
        Parsed::Reject => match parse_number(raw) {
            Parsed::Reject => parse_measurement(raw),
            parsed => parsed,
        },
        parsed => parsed,
    }
}

/// "`<'font-family'>`" — a comma list of family names: a quoted string, or
/// a sequence of identifiers joined by spaces, or a generic family keyword.
fn parse_family(raw: &str) -> Parsed {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Parsed::Empty;
    }
    let values = parse_component_values(trimmed);
    let segments = split_commas(&values);
    let mut families = Vec::with_capacity(segments.len());
    for segment in &segments {
        let runs = split_whitespace_runs(segment);
        if runs.is_empty() {
            return Parsed::Reject;
        }
        // A single quoted string stands alone.
        if let [run] = &runs[..] {
            if let [ComponentValue::Token(CssToken::String(body))] = &run[..] {
                families.push(quote_string(body));
                continue;
            }
        }
        // Otherwise every run must be a bare identifier.
        let mut words = Vec::with_capacity(runs.len());
        for run in &runs {
            match &run[..] {
                [ComponentValue::Token(CssToken::Ident(word))] => {
                    words.push(word.clone());
                }
                _ => return Parsed::Reject,
            }
        }
        families.push(words.join(" "));
    }
    Parsed::Value(families.join(", "))
}

/// Split a `<size>[/<line-height>]` token. The slash may be part of the
/// token (`12px/1.5`) since no whitespace separates it.
fn parse_size_line_height(token: &str) -> Option<(String, Option<String>)> {
    if let Some((size_text, lh_text)) = token.split_once('/') {
        let size = parse_size(size_text).into_value()?;
        let line_height = parse_line_height(lh_text).into_value()?;
        Some((size, Some(line_height)))
    } else {
        parse_size(token).into_value().map(|size| (size, None))
    }
}

/// `font` — strict head-token matching, then `<size>[/<line-height>]`, then
/// the family from the remaining text.
pub fn set_font(store: &mut StyleDeclaration, _name: &str, raw: &str, priority: Priority) {
    if let Some(keyword) = as_css_wide_keyword(raw) {
        for member in MEMBERS {
            let _ = store.take_entry(member);
        }
        store.upsert("font", &keyword, priority);
        for member in MEMBERS {
            store.set_derived(member, &keyword, priority);
        }
        return;
    }

    let tokens = split_tokens(raw);
    let mut style: Option<String> = None;
    let mut variant: Option<String> = None;
    let mut weight: Option<String> = None;
    let mut size: Option<String> = None;
    let mut line_height: Option<String> = None;
    let mut family: Option<String> = None;

    for (i, token) in tokens.iter().enumerate() {
        if let Some((s, lh)) = parse_size_line_height(token) {
            size = Some(s);
            line_height = lh;
            let rest = tokens[i + 1..].join(" ");
            match parse_family(&rest) {
                Parsed::Value(f) => family = Some(f),
                Parsed::Empty | Parsed::Reject => return,
            }
            break;
        }

        // Strict head matching: a token accepted by more than one member
        // grammar (notably `normal`) is ambiguous and rejects the value.
        let mut matched: Option<(usize, String)> = None;
        let heads: [(usize, fn(&str) -> Parsed); 3] =
            [(0, parse_style), (1, parse_variant), (2, parse_weight)];
        for (slot, parse) in heads {
            if let Parsed::Value(v) = parse(token) {
                if matched.is_some() {
                    return;
                }
                matched = Some((slot, v));
            }
        }
        let Some((slot, v)) = matched else {
            return;
        };
        let target = match slot {
            0 => &mut style,
            1 => &mut variant,
            _ => &mut weight,
        };
        if target.is_some() {
            return;
        }
        *target = Some(v);
    }

    // Size and family are mandatory.
    let (Some(size), Some(family)) = (size, family) else {
        return;
    };

    for member in MEMBERS {
        let _ = store.take_entry(member);
    }
    let text = join_font(
        style.as_deref(),
        variant.as_deref(),
        weight.as_deref(),
        &size,
        line_height.as_deref(),
        &family,
    );
    store.upsert("font", &text, priority);
    if let Some(style) = &style {
        store.set_derived("font-style", style, priority);
    }
    if let Some(variant) = &variant {
        store.set_derived("font-variant", variant, priority);
    }
    if let Some(weight) = &weight {
        store.set_derived("font-weight", weight, priority);
    }
    store.set_derived("font-size", &size, priority);
    if let Some(line_height) = &line_height {
        store.set_derived("line-height", line_height, priority);
    }
    store.set_derived("font-family", &family, priority);
}

/// Canonical `font` text from member values.
fn join_font(
    style: Option<&str>,
    variant: Option<&str>,
    weight: Option<&str>,
    size: &str,
    line_height: Option<&str>,
    family: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    for head in [style, variant, weight].into_iter().flatten() {
        if head != "normal" {
            parts.push(head.to_string());
        }
    }
    match line_height {
        Some(lh) if lh != "normal" => parts.push(format!("{size}/{lh}")),
        _ => parts.push(size.to_string()),
    }
    parts.push(family.to_string());
    parts.join(" ")
}

/// A font member longhand. Folds into a declared `font` of the same
/// priority while the shorthand stays representable (size and family
/// present); otherwise the group decomposes into member entries.
pub fn set_member(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let value = match as_css_wide_keyword(raw) {
        Some(keyword) => keyword,
        None => {
            let parsed = match name {
                "font-style" => parse_style(raw),
                "font-variant" => parse_variant(raw),
                "font-weight" => parse_weight(raw),
                "font-size" => parse_size(raw),
                "line-height" => parse_line_height(raw),
                _ => parse_family(raw),
            };
            match parsed {
                Parsed::Value(v) => v,
                Parsed::Empty | Parsed::Reject => return,
            }
        }
    };

    if store.is_declared("font") {
        let shorthand_priority = store.priority_of("font").unwrap_or_default();
        let representable = !crate::values::CSS_WIDE_KEYWORDS.contains(&value.as_str());
        if shorthand_priority == priority && representable {
            store.set_derived(name, &value, priority);
            let size = store.value_of("font-size").map(String::from);
            let family = store.value_of("font-family").map(String::from);
            if let (Some(size), Some(family)) = (size, family) {
                let text = join_font(
                    store.value_of("font-style"),
                    store.value_of("font-variant"),
                    store.value_of("font-weight"),
                    &size,
                    store.value_of("line-height"),
                    &family,
                );
                store.upsert("font", &text, priority);
                return;
            }
        }
        // Not representable as a shorthand any more: decompose.
        let _ = store.take_entry("font");
        for member in MEMBERS {
            if member == name {
                continue;
            }
            if let Some(v) = store.value_of(member).map(String::from) {
                if !store.is_declared(member) {
                    store.upsert(member, &v, shorthand_priority);
                }
            }
        }
        store.upsert(name, &value, priority);
    } else {
        store.upsert(name, &value, priority);
    }
}
