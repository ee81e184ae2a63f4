//! The `background` composite: a comma-separated layer list.
//!
//! [CSS Backgrounds § 2.7 The background Shorthand](https://www.w3.org/TR/css-backgrounds-3/#the-background)
//!
//! "The background shorthand ... first splits its value at each top-level
//! comma, interpreting each resulting component as a `<bg-layer>`. ...
//! the `<color>` component may only be specified in the final layer."
//!
//! Each layer is parsed independently against the per-longhand sub-grammars;
//! the longhands store comma-joined per-layer lists (padded with initial
//! values), and the shorthand text is the layers re-zipped with
//! initial-valued segments omitted. Size is only emitted behind a `/`, after
//! a position.

use quokka_syntax::{
    ComponentValue, CssToken, parse_component_values, serialize_component_values, split_commas,
    split_whitespace_runs, trim_whitespace,
};

use crate::declaration::{Priority, StyleDeclaration};
use crate::values::{Parsed, as_css_wide_keyword, parse_color, parse_keyword, parse_measurement, parse_url};

use super::initial_value;

/// The member longhands, in zip order. Color is last: it may only come
/// from the final layer.
const MEMBERS: [&str; 6] = [
    "background-image",
    "background-position",
    "background-size",
    "background-repeat",
    "background-attachment",
    "background-color",
];

/// One parsed `<bg-layer>`.
#[derive(Default)]
struct Layer {
    image: Option<String>,
    position: Option<String>,
    size: Option<String>,
    repeat: Option<String>,
    attachment: Option<String>,
    color: Option<String>,
}

/// "`<bg-image>` = none | `<image>`"
fn parse_image_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &["none"]) {
        Parsed::Reject => match parse_url(raw) {
            Parsed::Reject => parse_gradient(raw),
            parsed => parsed,
        },
        parsed => parsed,
    }
}

/// Gradient functions pass through opaquely, like `calc()` does for
/// measurements.
fn parse_gradient(raw: &str) -> Parsed {
    let values = trim_whitespace(parse_component_values(raw));
    match &values[..] {
        [cv @ ComponentValue::Function { name, .. }]
            if name.to_ascii_lowercase().ends_with("-gradient") =>
        {
            Parsed::Value(serialize_component_values(core::slice::from_ref(cv)))
        }
        _ => Parsed::Reject,
    }
}

/// "`<repeat-style>`" (single-keyword form).
fn parse_repeat_part(raw: &str) -> Parsed {
    parse_keyword(
        raw,
        &["no-repeat", "repeat", "repeat-x", "repeat-y", "round", "space"],
    )
}

/// "`<attachment>` = scroll | fixed | local"
fn parse_attachment_part(raw: &str) -> Parsed {
    parse_keyword(raw, &["fixed", "local", "scroll"])
}

/// One component of "`<bg-position>`".
fn parse_position_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &["bottom", "center", "left", "right", "top"]) {
        Parsed::Reject => parse_measurement(raw),
        parsed => parsed,
    }
}

/// One component of "`<bg-size>`".
fn parse_size_part(raw: &str) -> Parsed {
    match parse_keyword(raw, &["auto", "contain", "cover"]) {
        Parsed::Reject => parse_measurement(raw),
        parsed => parsed,
    }
}

/// Parse one `<bg-layer>`. Color is only legal when `is_final` is set.
fn parse_layer(values: &[ComponentValue], is_final: bool) -> Option<Layer> {
    // Split position from size at a top-level `/`.
    let mut before_slash: Vec<ComponentValue> = Vec::new();
    let mut after_slash: Vec<ComponentValue> = Vec::new();
    let mut seen_slash = false;
    for cv in values {
        if matches!(cv, ComponentValue::Token(CssToken::Delim('/'))) {
            if seen_slash {
                return None;
            }
            seen_slash = true;
            continue;
        }
        if seen_slash {
            after_slash.push(cv.clone());
        } else {
            before_slash.push(cv.clone());
        }
    }

    let mut layer = Layer::default();

    if seen_slash {
        let size_tokens: Vec<String> = split_whitespace_runs(&after_slash)
            .iter()
            .map(|run| serialize_component_values(run))
            .collect();
        if size_tokens.is_empty() || size_tokens.len() > 2 {
            return None;
        }
        let mut parts = Vec::new();
        for token in &size_tokens {
            parts.push(parse_size_part(token).into_value()?);
        }
        layer.size = Some(parts.join(" "));
    }

    let tokens: Vec<String> = split_whitespace_runs(&before_slash)
        .iter()
        .map(|run| serialize_component_values(run))
        .collect();
    let mut position_parts: Vec<String> = Vec::new();

    for token in &tokens {
        if layer.image.is_none() {
            if let Parsed::Value(v) = parse_image_part(token) {
                layer.image = Some(v);
                continue;
            }
        }
        if layer.repeat.is_none() {
            if let Parsed::Value(v) = parse_repeat_part(token) {
                layer.repeat = Some(v);
                continue;
            }
        }
        if layer.attachment.is_none() {
            if let Parsed::Value(v) = parse_attachment_part(token) {
                layer.attachment = Some(v);
                continue;
            }
        }
        if position_parts.len() < 2 {
            if let Parsed::Value(v) = parse_position_part(token) {
                position_parts.push(v);
                continue;
            }
        }
        if is_final && layer.color.is_none() {
            if let Parsed::Value(v) = parse_color(token) {
                layer.color = Some(v);
                continue;
            }
        }
        return None;
    }

    if !position_parts.is_empty() {
        layer.position = Some(position_parts.join(" "));
    }
    // A size requires a position anchor when re-zipped; seed the initial.
    if layer.size.is_some() && layer.position.is_none() {
        layer.position = Some(initial_value("background-position").to_string());
    }
    Some(layer)
}

/// Re-zip the per-longhand layer lists into comma-joined layer text,
/// omitting segments equal to their initial value. An all-initial layer
/// falls back to `none`.
fn zip_layers(layers: &[Layer]) -> String {
    let texts: Vec<String> = layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let mut parts: Vec<String> = Vec::new();
            if let Some(image) = &layer.image {
                if image != initial_value("background-image") {
                    parts.push(image.clone());
                }
            }
            let size = layer
                .size
                .as_ref()
                .filter(|s| s.as_str() != initial_value("background-size"));
            if let Some(size) = size {
                let position = layer
                    .position
                    .clone()
                    .unwrap_or_else(|| initial_value("background-position").to_string());
                parts.push(format!("{position} / {size}"));
            } else if let Some(position) = &layer.position {
                if position != initial_value("background-position") {
                    parts.push(position.clone());
                }
            }
            if let Some(repeat) = &layer.repeat {
                if repeat != initial_value("background-repeat") {
                    parts.push(repeat.clone());
                }
            }
            if let Some(attachment) = &layer.attachment {
                if attachment != initial_value("background-attachment") {
                    parts.push(attachment.clone());
                }
            }
            if i == layers.len() - 1 {
                if let Some(color) = &layer.color {
                    parts.push(color.clone());
                }
            }
            if parts.is_empty() {
                "none".to_string()
            } else {
                parts.join(" ")
            }
        })
        .collect();
    texts.join(", ")
}

/// Read the store's member lists back into layers (inverse of the seeding
/// in [`set_background`]), for re-zipping after a member write.
fn layers_from_store(store: &StyleDeclaration) -> Vec<Layer> {
    let list = |name: &str| -> Vec<String> {
        store.value_of(name).map_or_else(Vec::new, |v| {
            split_commas(&parse_component_values(v))
                .iter()
                .map(|seg| serialize_component_values(seg))
                .collect()
        })
    };
    let images = list("background-image");
    let positions = list("background-position");
    let sizes = list("background-size");
    let repeats = list("background-repeat");
    let attachments = list("background-attachment");
    let color = store.value_of("background-color").map(String::from);

    let count = images
        .len()
        .max(positions.len())
        .max(sizes.len())
        .max(repeats.len())
        .max(attachments.len())
        .max(1);

    (0..count)
        .map(|i| Layer {
            image: images.get(i).cloned(),
            position: positions.get(i).cloned(),
            size: sizes.get(i).cloned(),
            repeat: repeats.get(i).cloned(),
            attachment: attachments.get(i).cloned(),
            color: if i == count - 1 { color.clone() } else { None },
        })
        .collect()
}

/// Seed the member longhands from parsed layers: comma-joined per-layer
/// lists padded with initial values; color from the final layer.
fn seed_members(store: &mut StyleDeclaration, layers: &[Layer], priority: Priority) {
    let joined = |f: fn(&Layer) -> Option<&String>, member: &str| -> String {
        layers
            .iter()
            .map(|layer| {
                f(layer)
                    .cloned()
                    .unwrap_or_else(|| initial_value(member).to_string())
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    for member in MEMBERS {
        let _ = store.take_entry(member);
    }
    store.set_derived(
        "background-image",
        &joined(|l| l.image.as_ref(), "background-image"),
        priority,
    );
    store.set_derived(
        "background-position",
        &joined(|l| l.position.as_ref(), "background-position"),
        priority,
    );
    store.set_derived(
        "background-size",
        &joined(|l| l.size.as_ref(), "background-size"),
        priority,
    );
    store.set_derived(
        "background-repeat",
        &joined(|l| l.repeat.as_ref(), "background-repeat"),
        priority,
    );
    store.set_derived(
        "background-attachment",
        &joined(|l| l.attachment.as_ref(), "background-attachment"),
        priority,
    );
    if let Some(color) = layers.last().and_then(|l| l.color.as_ref()) {
        store.set_derived("background-color", color, priority);
    }
}

/// `background` — split on top-level commas, parse each layer, seed the
/// longhands, store the re-zipped canonical text.
pub fn set_background(store: &mut StyleDeclaration, _name: &str, raw: &str, priority: Priority) {
    if let Some(keyword) = as_css_wide_keyword(raw) {
        for member in MEMBERS {
            let _ = store.take_entry(member);
        }
        store.upsert("background", &keyword, priority);
        for member in MEMBERS {
            store.set_derived(member, &keyword, priority);
        }
        return;
    }

    let values = parse_component_values(raw);
    let segments = split_commas(&values);
    let mut layers = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return;
        }
        let Some(layer) = parse_layer(segment, i == segments.len() - 1) else {
            return;
        };
        layers.push(layer);
    }

    seed_members(store, &layers, priority);
    store.upsert("background", &zip_layers(&layers), priority);
}

/// A member longhand (e.g. `background-color`) — a comma list against that
/// member's sub-grammar; folds into a declared `background` of the same
/// priority, decomposes the group otherwise.
pub fn set_member(store: &mut StyleDeclaration, name: &str, raw: &str, priority: Priority) {
    let value = match as_css_wide_keyword(raw) {
        Some(keyword) => keyword,
        None => {
            let Some(v) = parse_member_list(name, raw) else {
                return;
            };
            v
        }
    };

    if store.is_declared("background") {
        let shorthand_priority = store.priority_of("background").unwrap_or_default();
        if shorthand_priority == priority {
            store.set_derived(name, &value, priority);
            let layers = layers_from_store(store);
            store.upsert("background", &zip_layers(&layers), priority);
        } else {
            // Mixed priority forces decomposition.
            let _ = store.take_entry("background");
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
        }
    } else {
        store.upsert(name, &value, priority);
    }
}

/// Parse a member's comma-list value against its sub-grammar.
fn parse_member_list(name: &str, raw: &str) -> Option<String> {
    if name == "background-color" {
        return parse_color(raw).into_value();
    }

    let part: fn(&str) -> Parsed = match name {
        "background-image" => parse_image_part,
        "background-repeat" => parse_repeat_part,
        "background-attachment" => parse_attachment_part,
        "background-size" => parse_size_part,
        _ => parse_position_part,
    };
    // Position and size allow two space-separated components per layer.
    let multi = matches!(name, "background-position" | "background-size");

    let values = parse_component_values(raw);
    let mut out: Vec<String> = Vec::new();
    for segment in split_commas(&values) {
        let tokens: Vec<String> = split_whitespace_runs(&segment)
            .iter()
            .map(|run| serialize_component_values(run))
            .collect();
        let limit = if multi { 2 } else { 1 };
        if tokens.is_empty() || tokens.len() > limit {
            return None;
        }
        let mut parts = Vec::new();
        for token in &tokens {
            parts.push(part(token).into_value()?);
        }
        out.push(parts.join(" "));
    }
    Some(out.join(", "))
}
