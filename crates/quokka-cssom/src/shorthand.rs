//! Shorthand/longhand synchronization strategies.
//!
//! [CSS Cascade § 9.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
//!
//! "Some properties are shorthand properties, meaning that they allow
//! authors to specify the values of several properties with a single
//! property."
//!
//! Two base strategies keep shorthand and longhand entries mutually
//! consistent in the declaration store:
//!
//! - **Implicit (corner) groups** — margin, padding, border-width/-style/
//!   -color: a 1–4-token value expands over the four sides by the corner
//!   rule, and setting one side re-collapses into the shorthand when all
//!   four sides agree on priority.
//! - **Structured groups** — border sides, outline, font: each
//!   whitespace-separated token must match exactly one member longhand's
//!   grammar; an ambiguous or unmatched token rejects the whole value.
//!
//! Both strategies mutate the store only through its primitives, so the
//! store's invariants are enforced in one place.

use quokka_syntax::{parse_component_values, serialize_component_values, split_whitespace_runs};

use crate::declaration::{Priority, StyleDeclaration};
use crate::values::{Parsed, as_css_wide_keyword};

/// An implicit (corner-expanded) shorthand group.
pub struct ImplicitGroup {
    /// The shorthand property name.
    pub shorthand: &'static str,
    /// The four side longhands, in top/right/bottom/left order.
    pub parts: [&'static str; 4],
    /// Grammar for a single side value (canonicalizing).
    pub parse_part: fn(&str) -> Parsed,
}

/// A member of a structured shorthand group.
pub struct StructuredMember {
    /// The member longhand name.
    pub name: &'static str,
    /// Grammar for this member's token (canonicalizing). Also serves as the
    /// validity predicate: `Parsed::Value` means the token belongs here.
    pub parse: fn(&str) -> Parsed,
}

/// A structured shorthand group: order of `members` is serialization order.
pub struct StructuredGroup {
    /// The shorthand property name.
    pub shorthand: &'static str,
    /// The member longhands.
    pub members: &'static [StructuredMember],
}

/// Split a raw value into whitespace-separated tokens, respecting quotes,
/// functions, and blocks (whitespace inside `rgb(...)` does not split).
#[must_use]
pub fn split_tokens(raw: &str) -> Vec<String> {
    let values = parse_component_values(raw);
    split_whitespace_runs(&values)
        .iter()
        .map(|run| serialize_component_values(run))
        .collect()
}

/// [CSS Backgrounds § 4.3](https://www.w3.org/TR/css-backgrounds-3/#the-border-width)
///
/// The 1–4-value corner rule: one value sets all four sides; two set
/// top/bottom and right/left; three set top, right/left, bottom; four set
/// top, right, bottom, left.
#[must_use]
pub fn expand_corners(tokens: &[String]) -> Option<[String; 4]> {
    match tokens {
        [all] => Some([all.clone(), all.clone(), all.clone(), all.clone()]),
        [tb, rl] => Some([tb.clone(), rl.clone(), tb.clone(), rl.clone()]),
        [t, rl, b] => Some([t.clone(), rl.clone(), b.clone(), rl.clone()]),
        [t, r, b, l] => Some([t.clone(), r.clone(), b.clone(), l.clone()]),
        _ => None,
    }
}

/// Serialize four side values in the most compact equivalent 1–4-value
/// form: left merges into right, then bottom into top, then right into top.
#[must_use]
pub fn compact_corners(sides: &[String; 4]) -> String {
    let [top, right, bottom, left] = sides;
    let mut parts: Vec<&str> = vec![top, right, bottom, left];
    if left == right {
        let _ = parts.pop();
        if bottom == top {
            let _ = parts.pop();
            if right == top {
                let _ = parts.pop();
            }
        }
    }
    parts.join(" ")
}

/// Splice one side's new value into an existing 1–4-value serialized
/// string, re-compacting. Returns `None` if the existing text is not a
/// 1–4-token corner string.
#[must_use]
pub fn replace_position_value(existing: &str, side: usize, new_value: &str) -> Option<String> {
    let tokens = split_tokens(existing);
    let mut sides = expand_corners(&tokens)?;
    sides[side] = new_value.to_string();
    Some(compact_corners(&sides))
}

/// Strategy A: set an implicit shorthand (e.g. `margin: 1px 2px`).
///
/// The shorthand entry stores the compact form; the four side longhands are
/// seeded as derived entries, and any explicitly declared side entries are
/// absorbed. A CSS-wide keyword applies to the whole group without corner
/// decomposition.
pub fn set_implicit(
    store: &mut StyleDeclaration,
    group: &ImplicitGroup,
    raw: &str,
    priority: Priority,
) {
    if let Some(keyword) = as_css_wide_keyword(raw) {
        for part in group.parts {
            let _ = store.take_entry(part);
        }
        store.upsert(group.shorthand, &keyword, priority);
        for part in group.parts {
            store.set_derived(part, &keyword, priority);
        }
        return;
    }

    let tokens = split_tokens(raw);
    if tokens.is_empty() || tokens.len() > 4 {
        return;
    }
    let mut canonical = Vec::with_capacity(tokens.len());
    for token in &tokens {
        match (group.parse_part)(token) {
            Parsed::Value(v) => canonical.push(v),
            Parsed::Empty | Parsed::Reject => return,
        }
    }
    let Some(sides) = expand_corners(&canonical) else {
        return;
    };

    for part in group.parts {
        let _ = store.take_entry(part);
    }
    store.upsert(group.shorthand, &compact_corners(&sides), priority);
    for (part, value) in group.parts.iter().zip(sides.iter()) {
        store.set_derived(part, value, priority);
    }
}

/// Strategy A, one side (e.g. `margin-top: 1px`).
///
/// Sets the side as a declared entry, then checks the whole group: when all
/// four sides now hold values with one shared priority, they collapse into
/// the shorthand; otherwise the declared sides stand alone and any stale
/// shorthand entry is dropped (decomposed into its remaining sides).
pub fn set_sub_implicit(
    store: &mut StyleDeclaration,
    group: &ImplicitGroup,
    side: usize,
    raw: &str,
    priority: Priority,
) {
    let value = match as_css_wide_keyword(raw) {
        Some(keyword) => keyword,
        None => match (group.parse_part)(raw) {
            Parsed::Value(v) => v,
            Parsed::Empty | Parsed::Reject => return,
        },
    };

    store.upsert(group.parts[side], &value, priority);
    reconcile_implicit(store, group);
}

/// Re-derive an implicit group's presentation from its current side values:
/// collapse into the shorthand when complete and priority-uniform, else
/// decompose into declared side entries.
pub fn reconcile_implicit(store: &mut StyleDeclaration, group: &ImplicitGroup) {
    let sides: Vec<Option<String>> = group
        .parts
        .iter()
        .map(|part| store.value_of(part).map(ToString::to_string))
        .collect();
    let priorities: Vec<Option<Priority>> = group
        .parts
        .iter()
        .map(|part| store.priority_of(part))
        .collect();

    let complete = sides.iter().all(Option::is_some);
    let uniform_priority = priorities
        .iter()
        .filter_map(|p| *p)
        .collect::<Vec<_>>()
        .windows(2)
        .all(|w| w[0] == w[1]);

    if complete && uniform_priority {
        let values: [String; 4] = [
            sides[0].clone().unwrap_or_default(),
            sides[1].clone().unwrap_or_default(),
            sides[2].clone().unwrap_or_default(),
            sides[3].clone().unwrap_or_default(),
        ];
        let priority = priorities[0].unwrap_or_default();
        for part in group.parts {
            let _ = store.take_entry(part);
        }
        store.upsert(group.shorthand, &compact_corners(&values), priority);
        for (part, value) in group.parts.iter().zip(values.iter()) {
            store.set_derived(part, value, priority);
        }
    } else {
        let _ = store.take_entry(group.shorthand);
        for (i, part) in group.parts.iter().enumerate() {
            if let Some(value) = &sides[i] {
                if !store.is_declared(part) {
                    let priority = priorities[i].unwrap_or_default();
                    store.upsert(part, value, priority);
                }
            }
        }
    }
}

/// Strategy B: parse a structured shorthand value against its members.
///
/// Each whitespace token is tested against every member grammar; the whole
/// value is accepted only if every token matches exactly one member, with no
/// member assigned twice. Returns the canonical value per member slot.
#[must_use]
pub fn parse_structured(group: &StructuredGroup, raw: &str) -> Option<Vec<Option<String>>> {
    let tokens = split_tokens(raw);
    if tokens.is_empty() {
        return None;
    }

    let mut assigned: Vec<Option<String>> = vec![None; group.members.len()];
    for token in &tokens {
        let mut matched: Option<(usize, String)> = None;
        for (i, member) in group.members.iter().enumerate() {
            if let Parsed::Value(v) = (member.parse)(token) {
                if matched.is_some() {
                    // Ambiguous token: belongs to more than one member.
                    return None;
                }
                matched = Some((i, v));
            }
        }
        let (index, value) = matched?;
        if assigned[index].is_some() {
            // Two tokens for the same member.
            return None;
        }
        assigned[index] = Some(value);
    }
    Some(assigned)
}

/// Strategy B: set a structured shorthand (e.g. `border-top: 1px solid red`).
///
/// On accept, member longhands absent from the new token set are removed,
/// the matched ones are seeded, and the shorthand entry stores the
/// space-joined member values in member order. An empty recomputed string
/// removes the shorthand entry.
pub fn set_structured(
    store: &mut StyleDeclaration,
    group: &StructuredGroup,
    raw: &str,
    priority: Priority,
) {
    if let Some(keyword) = as_css_wide_keyword(raw) {
        for member in group.members {
            let _ = store.take_entry(member.name);
        }
        store.upsert(group.shorthand, &keyword, priority);
        for member in group.members {
            store.set_derived(member.name, &keyword, priority);
        }
        return;
    }

    let Some(assigned) = parse_structured(group, raw) else {
        return;
    };

    for (member, value) in group.members.iter().zip(assigned.iter()) {
        let _ = store.take_entry(member.name);
        if let Some(value) = value {
            store.set_derived(member.name, value, priority);
        }
    }

    let text = join_present(&assigned);
    if text.is_empty() {
        let _ = store.take_entry(group.shorthand);
    } else {
        store.upsert(group.shorthand, &text, priority);
    }
}

/// Strategy B, one member (e.g. `outline-color: red`).
///
/// While the shorthand entry is declared with the same priority, the member
/// write folds into the shorthand text; a priority mismatch decomposes the
/// group into declared member entries instead.
pub fn set_structured_member(
    store: &mut StyleDeclaration,
    group: &StructuredGroup,
    member: usize,
    raw: &str,
    priority: Priority,
) {
    let value = match as_css_wide_keyword(raw) {
        Some(keyword) => keyword,
        None => match (group.members[member].parse)(raw) {
            Parsed::Value(v) => v,
            Parsed::Empty | Parsed::Reject => return,
        },
    };

    if store.is_declared(group.shorthand) {
        let shorthand_priority = store.priority_of(group.shorthand).unwrap_or_default();
        if shorthand_priority == priority {
            store.set_derived(group.members[member].name, &value, priority);
            let text = join_members(store, group);
            store.upsert(group.shorthand, &text, priority);
        } else {
            // Mixed priority forces decomposition.
            let _ = store.take_entry(group.shorthand);
            for (i, m) in group.members.iter().enumerate() {
                if i == member {
                    continue;
                }
                if let Some(v) = store.value_of(m.name).map(ToString::to_string) {
                    if !store.is_declared(m.name) {
                        store.upsert(m.name, &v, shorthand_priority);
                    }
                }
            }
            store.upsert(group.members[member].name, &value, priority);
        }
    } else {
        store.upsert(group.members[member].name, &value, priority);
    }
}

/// Space-join the present member values, in member order.
fn join_present(assigned: &[Option<String>]) -> String {
    assigned
        .iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-join a group's current member values from the store.
fn join_members(store: &StyleDeclaration, group: &StructuredGroup) -> String {
    let values: Vec<&str> = group
        .members
        .iter()
        .filter_map(|m| store.value_of(m.name))
        .collect();
    values.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn corner_expansion_rule() {
        assert_eq!(
            expand_corners(&owned(&["1px"])),
            Some(["1px".into(), "1px".into(), "1px".into(), "1px".into()])
        );
        assert_eq!(
            expand_corners(&owned(&["1px", "2px"])),
            Some(["1px".into(), "2px".into(), "1px".into(), "2px".into()])
        );
        assert_eq!(
            expand_corners(&owned(&["1px", "2px", "3px"])),
            Some(["1px".into(), "2px".into(), "3px".into(), "2px".into()])
        );
        assert_eq!(expand_corners(&owned(&[])), None);
        assert_eq!(expand_corners(&owned(&["1", "2", "3", "4", "5"])), None);
    }

    #[test]
    fn corner_compaction_prefers_shortest_form() {
        let same = |s: &str| s.to_string();
        assert_eq!(
            compact_corners(&[same("1px"), same("1px"), same("1px"), same("1px")]),
            "1px"
        );
        assert_eq!(
            compact_corners(&[same("1px"), same("2px"), same("1px"), same("2px")]),
            "1px 2px"
        );
        assert_eq!(
            compact_corners(&[same("1px"), same("2px"), same("3px"), same("2px")]),
            "1px 2px 3px"
        );
        assert_eq!(
            compact_corners(&[same("1px"), same("2px"), same("3px"), same("4px")]),
            "1px 2px 3px 4px"
        );
        // No merge across the left/right pair boundary
        assert_eq!(
            compact_corners(&[same("1px"), same("2px"), same("1px"), same("3px")]),
            "1px 2px 1px 3px"
        );
    }

    #[test]
    fn replace_position_splices_and_recompacts() {
        assert_eq!(
            replace_position_value("1px", 0, "2px"),
            Some("2px 1px 1px".to_string())
        );
        assert_eq!(
            replace_position_value("1px 2px", 3, "2px"),
            Some("1px 2px".to_string())
        );
        assert_eq!(replace_position_value("1px 2px 3px 4px 5px", 0, "x"), None);
    }

    #[test]
    fn split_tokens_respects_functions() {
        assert_eq!(
            split_tokens("1px rgb(1, 2, 3) solid"),
            vec!["1px", "rgb(1, 2, 3)", "solid"]
        );
    }
}
