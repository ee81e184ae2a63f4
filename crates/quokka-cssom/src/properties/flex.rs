//! The `flex` composite.
//!
//! [CSS Flexbox § 7.1 The flex Shorthand](https://www.w3.org/TR/css-flexbox-1/#flex-property)
//!
//! "flex: none | [ `<'flex-grow'>` `<'flex-shrink'>`? || `<'flex-basis'>` ]"
//!
//! "The keyword none expands to 0 0 auto." A lone number sets the grow
//! factor with `flex-shrink: 1` and `flex-basis: 0%`; `auto` expands to
//! `1 1 auto`. The stored shorthand text is always the resolved
//! grow/shrink/basis triple.

use crate::declaration::{Priority, StyleDeclaration};
use crate::shorthand::split_tokens;
use crate::values::{
    CSS_WIDE_KEYWORDS, Parsed, as_css_wide_keyword, parse_keyword, parse_measurement, parse_number,
};

const MEMBERS: [&str; 3] = ["flex-grow", "flex-shrink", "flex-basis"];

/// "`<'flex-basis'>` = content | `<'width'>`" (auto and measurements here).
fn parse_basis_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &["auto", "content"]) {
        Parsed::Reject => parse_measurement(raw),
        parsed => parsed,
    }
}

/// `flex` — resolve the shorthand forms into the grow/shrink/basis triple.
pub fn set_flex(store: &mut StyleDeclaration, _name: &str, raw: &str, priority: Priority) {
    if let Some(keyword) = as_css_wide_keyword(raw) {
        for member in MEMBERS {
            let _ = store.take_entry(member);
        }
        store.upsert("flex", &keyword, priority);
        for member in MEMBERS {
            store.set_derived(member, &keyword, priority);
        }
        return;
    }

    let tokens = split_tokens(raw);
    let triple: Option<[String; 3]> = match &tokens[..] {
        // "The keyword none expands to 0 0 auto."
        [only] if only.eq_ignore_ascii_case("none") => {
            Some(["0".to_string(), "0".to_string(), "auto".to_string()])
        }
        // "flex: auto is equivalent to flex: 1 1 auto."
        [only] if only.eq_ignore_ascii_case("auto") => {
            Some(["1".to_string(), "1".to_string(), "auto".to_string()])
        }
        _ if tokens.is_empty() || tokens.len() > 3 => None,
        _ => {
            let mut grow: Option<String> = None;
            let mut shrink: Option<String> = None;
            let mut basis: Option<String> = None;
            let mut ok = true;
            for token in &tokens {
                if let Parsed::Value(n) = parse_number(token) {
                    if grow.is_none() {
                        grow = Some(n);
                    } else if shrink.is_none() {
                        shrink = Some(n);
                    } else {
                        ok = false;
                    }
                } else if basis.is_none() {
                    if let Parsed::Value(b) = parse_basis_part(token) {
                        basis = Some(b);
                    } else {
                        ok = false;
                    }
                } else {
                    ok = false;
                }
                if !ok {
                    break;
                }
            }
            if ok && (grow.is_some() || basis.is_some()) {
                Some([
                    grow.unwrap_or_else(|| "1".to_string()),
                    shrink.unwrap_or_else(|| "1".to_string()),
                    basis.unwrap_or_else(|| "0%".to_string()),
                ])
            } else {
                None
            }
        }
    };

    let Some(triple) = triple else {
        return;
    };

    for member in MEMBERS {
        let _ = store.take_entry(member);
    }
    store.upsert("flex", &triple.join(" "), priority);
    for (member, value) in MEMBERS.iter().zip(triple.iter()) {
        store.set_derived(member, value, priority);
    }
}

/// `flex-grow` / `flex-shrink` / `flex-basis` — sets the longhand, then
/// re-collapses into `flex` when all three members hold with one priority.
/// A CSS-wide keyword only re-collapses when every other member equals that
/// same keyword.
pub fn set_member(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let value = match as_css_wide_keyword(raw) {
        Some(keyword) => keyword,
        None => {
            let parsed = if name == "flex-basis" {
                parse_basis_part(raw)
            } else {
                parse_number(raw)
            };
            match parsed {
                Parsed::Value(v) => v,
                Parsed::Empty | Parsed::Reject => return,
            }
        }
    };

    store.upsert(name, &value, priority);

    let values: Vec<Option<String>> = MEMBERS
        .iter()
        .map(|m| store.value_of(m).map(String::from))
        .collect();
    let priorities: Vec<Option<Priority>> =
        MEMBERS.iter().map(|m| store.priority_of(m)).collect();

    let complete = values.iter().all(Option::is_some);
    let uniform_priority = priorities
        .iter()
        .filter_map(|p| *p)
        .collect::<Vec<_>>()
        .windows(2)
        .all(|w| w[0] == w[1]);

    // A CSS-wide keyword anywhere requires every member to equal it.
    let keywords: Vec<&String> = values
        .iter()
        .flatten()
        .filter(|v| CSS_WIDE_KEYWORDS.contains(&v.as_str()))
        .collect();
    let keyword_consistent = keywords.is_empty()
        || (complete && values.iter().flatten().all(|v| v == keywords[0]));

    if complete && uniform_priority && keyword_consistent {
        let text = if keywords.is_empty() {
            values
                .iter()
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            keywords[0].clone()
        };
        let shared = priorities[0].unwrap_or_default();
        for member in MEMBERS {
            let _ = store.take_entry(member);
        }
        store.upsert("flex", &text, shared);
        for (member, value) in MEMBERS.iter().zip(values.iter()) {
            if let Some(value) = value {
                store.set_derived(member, value, shared);
            }
        }
    } else {
        let _ = store.take_entry("flex");
        for (i, member) in MEMBERS.iter().enumerate() {
            if let Some(value) = &values[i] {
                if !store.is_declared(member) {
                    store.upsert(member, value, priorities[i].unwrap_or_default());
                }
            }
        }
    }
}
