//! The `border` composite: thirteen interacting entries kept mutually
//! consistent under arbitrary mutation order.
//!
//! [CSS Backgrounds § 3.4 Border Shorthands](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)
//!
//! "The border shorthand sets the same width, style, and color for all four
//! sides of a box. ... it also resets border-image to its initial value."
//!
//! The family: `border`; the line shorthands `border-width`/`-style`/
//! `-color` (one line across four positions); the position shorthands
//! `border-top`/`-right`/`-bottom`/`-left` (three lines at one position);
//! twelve directional longhands; and `border-image`, which `border` resets.
//!
//! The store holds whatever presentation the mutation history produced —
//! a single `border` entry, line entries, position entries, or bare
//! longhands — while the remaining views of the same state stay readable
//! as derived entries. A longhand equal to its initial value counts as
//! consistent with a shorthand that does not mention it.

use crate::declaration::{Priority, StyleDeclaration};
use crate::shorthand::{
    ImplicitGroup, compact_corners, expand_corners, replace_position_value, set_sub_implicit,
    split_tokens,
};
use crate::values::{Parsed, as_css_wide_keyword};

use super::{
    initial_value, parse_border_color_part, parse_border_style_part, parse_border_width_part,
};

/// The line shorthands, in width/style/color order (also the serialization
/// order of `border` itself).
const LINE_SHORTHANDS: [&str; 3] = ["border-width", "border-style", "border-color"];

/// The position shorthands, in top/right/bottom/left order.
const POSITION_SHORTHANDS: [&str; 4] = ["border-top", "border-right", "border-bottom", "border-left"];

/// The twelve directional longhands, indexed `[position][line]`.
const LONGHANDS: [[&str; 3]; 4] = [
    ["border-top-width", "border-top-style", "border-top-color"],
    ["border-right-width", "border-right-style", "border-right-color"],
    ["border-bottom-width", "border-bottom-style", "border-bottom-color"],
    ["border-left-width", "border-left-style", "border-left-color"],
];

/// Token grammar per line.
const LINE_PARSERS: [fn(&str) -> Parsed; 3] = [
    parse_border_width_part,
    parse_border_style_part,
    parse_border_color_part,
];

/// The strategy-A group for one line across the four positions.
const fn line_group(line: usize) -> ImplicitGroup {
    ImplicitGroup {
        shorthand: LINE_SHORTHANDS[line],
        parts: [
            LONGHANDS[0][line],
            LONGHANDS[1][line],
            LONGHANDS[2][line],
            LONGHANDS[3][line],
        ],
        parse_part: LINE_PARSERS[line],
    }
}

fn line_index(name: &str) -> Option<usize> {
    LINE_SHORTHANDS.iter().position(|n| *n == name)
}

fn position_index(name: &str) -> Option<usize> {
    POSITION_SHORTHANDS.iter().position(|n| *n == name)
}

fn longhand_indices(name: &str) -> Option<(usize, usize)> {
    for (p, lines) in LONGHANDS.iter().enumerate() {
        if let Some(l) = lines.iter().position(|n| *n == name) {
            return Some((p, l));
        }
    }
    None
}

/// `border: <line-width> || <line-style> || <color>` — each token must
/// match exactly one line grammar, no line twice.
fn parse_border_value(raw: &str) -> Option<[Option<String>; 3]> {
    let tokens = split_tokens(raw);
    if tokens.is_empty() {
        return None;
    }
    let mut assigned: [Option<String>; 3] = [None, None, None];
    for token in &tokens {
        let mut matched: Option<(usize, String)> = None;
        for (l, parse) in LINE_PARSERS.iter().enumerate() {
            if let Parsed::Value(v) = parse(token) {
                if matched.is_some() {
                    return None;
                }
                matched = Some((l, v));
            }
        }
        let (l, v) = matched?;
        if assigned[l].is_some() {
            return None;
        }
        assigned[l] = Some(v);
    }
    Some(assigned)
}

/// Space-join the present line values in width/style/color order.
fn join_lines(assigned: &[Option<String>; 3]) -> String {
    assigned
        .iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Current values of one line's four positional longhands.
fn line_values(store: &StyleDeclaration, line: usize) -> [Option<String>; 4] {
    [0, 1, 2, 3].map(|p| store.value_of(LONGHANDS[p][line]).map(String::from))
}

/// Current values of one position's three longhands.
fn position_values(store: &StyleDeclaration, position: usize) -> [Option<String>; 3] {
    [0, 1, 2].map(|l| store.value_of(LONGHANDS[position][l]).map(String::from))
}

/// Remove every entry of the border family, declared or derived.
fn clear_family(store: &mut StyleDeclaration) {
    let _ = store.take_entry("border");
    let _ = store.take_entry("border-image");
    for name in LINE_SHORTHANDS {
        let _ = store.take_entry(name);
    }
    for name in POSITION_SHORTHANDS {
        let _ = store.take_entry(name);
    }
    for lines in LONGHANDS {
        for name in lines {
            let _ = store.take_entry(name);
        }
    }
}

/// Seed every derived view of a uniform border: line shorthands, position
/// shorthands, the twelve longhands, and the `border-image` reset.
fn seed_uniform(
    store: &mut StyleDeclaration,
    assigned: &[Option<String>; 3],
    text: &str,
    priority: Priority,
) {
    for (l, value) in assigned.iter().enumerate() {
        if let Some(value) = value {
            store.set_derived(LINE_SHORTHANDS[l], value, priority);
            for lines in LONGHANDS {
                store.set_derived(lines[l], value, priority);
            }
        }
    }
    for name in POSITION_SHORTHANDS {
        store.set_derived(name, text, priority);
    }
    store.set_derived("border-image", "none", priority);
}

/// Collapse the whole family into a single `border` entry if the current
/// longhand state permits: every line uniform across the four positions (or
/// absent), `border-image` absent or `none`, priorities uniform, and at
/// least one line present.
fn try_collapse(store: &mut StyleDeclaration) -> bool {
    let mut assigned: [Option<String>; 3] = [None, None, None];
    let mut priorities: Vec<Priority> = Vec::new();

    for line in 0..3 {
        let values = line_values(store, line);
        if values.iter().all(Option::is_none) {
            continue;
        }
        if !values.iter().all(Option::is_some) {
            return false;
        }
        let first = values[0].clone().unwrap_or_default();
        if !values.iter().flatten().all(|v| *v == first) {
            return false;
        }
        for p in 0..4 {
            if let Some(priority) = store.priority_of(LONGHANDS[p][line]) {
                priorities.push(priority);
            }
        }
        assigned[line] = Some(first);
    }

    if assigned.iter().all(Option::is_none) {
        return false;
    }
    if let Some(image) = store.value_of("border-image") {
        if image != "none" {
            return false;
        }
    }
    if !priorities.windows(2).all(|w| w[0] == w[1]) {
        return false;
    }

    let priority = priorities.first().copied().unwrap_or_default();
    let text = join_lines(&assigned);
    clear_family(store);
    store.upsert("border", &text, priority);
    seed_uniform(store, &assigned, &text, priority);
    true
}

/// Break a declared `border` into line-shorthand entries (used when a line
/// or longhand mutation makes the single-entry form unrepresentable).
fn breakup_to_lines(store: &mut StyleDeclaration) {
    let priority = store.priority_of("border").unwrap_or_default();
    let _ = store.take_entry("border");
    for line in 0..3 {
        let values = line_values(store, line);
        if values.iter().all(Option::is_some) {
            let sides = [
                values[0].clone().unwrap_or_default(),
                values[1].clone().unwrap_or_default(),
                values[2].clone().unwrap_or_default(),
                values[3].clone().unwrap_or_default(),
            ];
            store.upsert(LINE_SHORTHANDS[line], &compact_corners(&sides), priority);
        } else {
            let _ = store.take_entry(LINE_SHORTHANDS[line]);
        }
    }
}

/// Recompute the non-declared shorthand views (line and position) from the
/// longhand state, so every readable view agrees after a structural change.
/// A declared `border` owns all views; nothing to do then.
fn refresh_derived_views(store: &mut StyleDeclaration) {
    if store.is_declared("border") {
        return;
    }
    for line in 0..3 {
        if store.is_declared(LINE_SHORTHANDS[line]) {
            continue;
        }
        let values = line_values(store, line);
        let priorities: Vec<Priority> = (0..4)
            .filter_map(|p| store.priority_of(LONGHANDS[p][line]))
            .collect();
        let uniform = priorities.windows(2).all(|w| w[0] == w[1]);
        if values.iter().all(Option::is_some) && uniform {
            let sides = [
                values[0].clone().unwrap_or_default(),
                values[1].clone().unwrap_or_default(),
                values[2].clone().unwrap_or_default(),
                values[3].clone().unwrap_or_default(),
            ];
            let priority = priorities.first().copied().unwrap_or_default();
            store.set_derived(LINE_SHORTHANDS[line], &compact_corners(&sides), priority);
        } else {
            let _ = store.take_entry(LINE_SHORTHANDS[line]);
        }
    }
    for position in 0..4 {
        if store.is_declared(POSITION_SHORTHANDS[position]) {
            continue;
        }
        let values = position_values(store, position);
        let priorities: Vec<Priority> = (0..3)
            .filter_map(|l| store.priority_of(LONGHANDS[position][l]))
            .collect();
        let uniform = priorities.windows(2).all(|w| w[0] == w[1]);
        let text = values
            .iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() && uniform {
            let priority = priorities.first().copied().unwrap_or_default();
            store.set_derived(POSITION_SHORTHANDS[position], &text, priority);
        } else {
            let _ = store.take_entry(POSITION_SHORTHANDS[position]);
        }
    }
}

/// `border` — seeds every position×line combination identically and resets
/// `border-image` to `none`.
pub fn set_border(store: &mut StyleDeclaration, _name: &str, raw: &str, priority: Priority) {
    let (assigned, text) = if let Some(keyword) = as_css_wide_keyword(raw) {
        (
            [
                Some(keyword.clone()),
                Some(keyword.clone()),
                Some(keyword.clone()),
            ],
            keyword,
        )
    } else {
        let Some(assigned) = parse_border_value(raw) else {
            return;
        };
        let text = join_lines(&assigned);
        (assigned, text)
    };

    clear_family(store);
    store.upsert("border", &text, priority);
    seed_uniform(store, &assigned, &text, priority);
}

/// `border-width` / `border-style` / `border-color` — updates one line
/// across all four positions, then re-derives or invalidates `border`.
pub fn set_line_shorthand(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let Some(line) = line_index(name) else {
        return;
    };

    let (sides, text) = if let Some(keyword) = as_css_wide_keyword(raw) {
        (
            [
                keyword.clone(),
                keyword.clone(),
                keyword.clone(),
                keyword.clone(),
            ],
            keyword,
        )
    } else {
        let tokens = split_tokens(raw);
        if tokens.is_empty() || tokens.len() > 4 {
            return;
        }
        let mut canonical = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match LINE_PARSERS[line](token) {
                Parsed::Value(v) => canonical.push(v),
                Parsed::Empty | Parsed::Reject => return,
            }
        }
        let Some(sides) = expand_corners(&canonical) else {
            return;
        };
        let text = compact_corners(&sides);
        (sides, text)
    };

    let had_border = store.is_declared("border");

    for p in 0..4 {
        let _ = store.take_entry(LONGHANDS[p][line]);
    }
    store.upsert(name, &text, priority);
    for (p, value) in sides.iter().enumerate() {
        store.set_derived(LONGHANDS[p][line], value, priority);
    }

    if had_border && !try_collapse(store) {
        breakup_to_lines(store);
    }

    if !store.is_declared("border") {
        // Fold the new line into any declared position entries.
        for p in 0..4 {
            if !store.is_declared(POSITION_SHORTHANDS[p]) {
                continue;
            }
            let position_priority = store.priority_of(POSITION_SHORTHANDS[p]).unwrap_or_default();
            if position_priority == priority {
                let text = position_values(store, p)
                    .iter()
                    .flatten()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" ");
                store.upsert(POSITION_SHORTHANDS[p], &text, priority);
            } else {
                // Mixed priority forces decomposition.
                let _ = store.take_entry(POSITION_SHORTHANDS[p]);
                for l in 0..3 {
                    if l == line {
                        continue;
                    }
                    if let Some(v) = store.value_of(LONGHANDS[p][l]).map(String::from) {
                        store.upsert(LONGHANDS[p][l], &v, position_priority);
                    }
                }
            }
        }
    }

    refresh_derived_views(store);
}

/// `border-top` / `border-right` / `border-bottom` / `border-left` — sets
/// one position's lines, re-deriving `border` only when the other three
/// directions still match.
pub fn set_position_shorthand(
    store: &mut StyleDeclaration,
    name: &str,
    raw: &str,
    priority: Priority,
) {
    let Some(position) = position_index(name) else {
        return;
    };

    let (assigned, text) = if let Some(keyword) = as_css_wide_keyword(raw) {
        (
            [
                Some(keyword.clone()),
                Some(keyword.clone()),
                Some(keyword.clone()),
            ],
            keyword,
        )
    } else {
        let tokens = split_tokens(raw);
        if tokens.is_empty() {
            return;
        }
        let mut assigned: [Option<String>; 3] = [None, None, None];
        for token in &tokens {
            let mut matched: Option<(usize, String)> = None;
            for (l, parse) in LINE_PARSERS.iter().enumerate() {
                if let Parsed::Value(v) = parse(token) {
                    if matched.is_some() {
                        return;
                    }
                    matched = Some((l, v));
                }
            }
            let Some((l, v)) = matched else {
                return;
            };
            if assigned[l].is_some() {
                return;
            }
            assigned[l] = Some(v);
        }
        let text = join_lines(&assigned);
        (assigned, text)
    };

    if store.is_declared("border") {
        let border_text = store.value_of("border").unwrap_or_default().to_string();
        let border_priority = store.priority_of("border").unwrap_or_default();
        if text == border_text && priority == border_priority {
            // Consistent with the seeded state: nothing observable changes.
            return;
        }
        // The directions no longer agree: break into four position entries.
        let _ = store.take_entry("border");
        for l in 0..3 {
            let _ = store.take_entry(LINE_SHORTHANDS[l]);
        }
        for q in 0..4 {
            if q != position {
                store.upsert(POSITION_SHORTHANDS[q], &border_text, border_priority);
            }
        }
    }

    for l in 0..3 {
        let _ = store.take_entry(LONGHANDS[position][l]);
        if let Some(value) = &assigned[l] {
            store.set_derived(LONGHANDS[position][l], value, priority);
        }
    }
    store.upsert(name, &text, priority);

    // Fold the new position into any declared line entries.
    for l in 0..3 {
        if !store.is_declared(LINE_SHORTHANDS[l]) {
            continue;
        }
        let line_priority = store.priority_of(LINE_SHORTHANDS[l]).unwrap_or_default();
        if line_priority == priority {
            let value = assigned[l]
                .clone()
                .unwrap_or_else(|| initial_value(LONGHANDS[position][l]).to_string());
            store.set_derived(LONGHANDS[position][l], &value, priority);
            let existing = store.value_of(LINE_SHORTHANDS[l]).unwrap_or_default().to_string();
            if let Some(spliced) = replace_position_value(&existing, position, &value) {
                store.upsert(LINE_SHORTHANDS[l], &spliced, priority);
            }
        } else {
            let _ = store.take_entry(LINE_SHORTHANDS[l]);
            for q in 0..4 {
                if q == position {
                    continue;
                }
                if let Some(v) = store.value_of(LONGHANDS[q][l]).map(String::from) {
                    store.upsert(LONGHANDS[q][l], &v, line_priority);
                }
            }
        }
    }

    let _ = try_collapse(store);
    refresh_derived_views(store);
}

/// A directional longhand (e.g. `border-top-width`) — the finest grain;
/// folds into whichever presentation currently owns its position or line.
pub fn set_longhand(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let Some((position, line)) = longhand_indices(name) else {
        return;
    };

    let value = match as_css_wide_keyword(raw) {
        Some(keyword) => keyword,
        None => match LINE_PARSERS[line](raw) {
            Parsed::Value(v) => v,
            Parsed::Empty | Parsed::Reject => return,
        },
    };

    if store.is_declared("border") {
        let border_priority = store.priority_of("border").unwrap_or_default();
        let border_text = store.value_of("border").unwrap_or_default().to_string();
        let encoding = parse_border_value(&border_text)
            .and_then(|assigned| assigned[line].clone())
            .unwrap_or_else(|| initial_value(name).to_string());
        if value == encoding && priority == border_priority {
            store.set_derived(name, &value, priority);
            return;
        }
        breakup_to_lines(store);
    }

    let positional = POSITION_SHORTHANDS
        .iter()
        .any(|name| store.is_declared(name));

    if positional {
        if store.is_declared(POSITION_SHORTHANDS[position]) {
            let position_priority = store
                .priority_of(POSITION_SHORTHANDS[position])
                .unwrap_or_default();
            if position_priority == priority {
                store.set_derived(name, &value, priority);
                let text = position_values(store, position)
                    .iter()
                    .flatten()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" ");
                store.upsert(POSITION_SHORTHANDS[position], &text, priority);
            } else {
                let _ = store.take_entry(POSITION_SHORTHANDS[position]);
                for l in 0..3 {
                    if l == line {
                        continue;
                    }
                    if let Some(v) = store.value_of(LONGHANDS[position][l]).map(String::from) {
                        store.upsert(LONGHANDS[position][l], &v, position_priority);
                    }
                }
                store.upsert(name, &value, priority);
            }
        } else {
            store.upsert(name, &value, priority);
        }

        if store.is_declared(LINE_SHORTHANDS[line]) {
            let line_priority = store.priority_of(LINE_SHORTHANDS[line]).unwrap_or_default();
            if line_priority == priority {
                store.set_derived(name, &value, priority);
                let existing = store
                    .value_of(LINE_SHORTHANDS[line])
                    .unwrap_or_default()
                    .to_string();
                if let Some(spliced) = replace_position_value(&existing, position, &value) {
                    store.upsert(LINE_SHORTHANDS[line], &spliced, priority);
                }
            } else {
                let _ = store.take_entry(LINE_SHORTHANDS[line]);
                for q in 0..4 {
                    if q == position {
                        continue;
                    }
                    if let Some(v) = store.value_of(LONGHANDS[q][line]).map(String::from) {
                        store.upsert(LONGHANDS[q][line], &v, line_priority);
                    }
                }
                store.upsert(name, &value, priority);
            }
        }
    } else {
        let group = line_group(line);
        set_sub_implicit(store, &group, position, raw, priority);
    }

    refresh_derived_views(store);
}
