//! The inline declaration block: the object behind an element's `style`
//! attribute.
//!
//! [CSSOM § 6.6 CSS Declaration Blocks](https://drafts.csswg.org/cssom/#css-declaration-blocks)
//!
//! "A CSS declaration block is an ordered collection of CSS properties with
//! their associated values, also named CSS declarations."
//!
//! # Storage model
//!
//! The block owns three pieces of state: the insertion-ordered list of
//! declared names, the name → canonical value map, and the name → priority
//! map. `order` drives `item`/`length`/`cssText`; the maps may additionally
//! hold *derived* entries for names not in `order` — longhand values seeded
//! by a stored shorthand. Derived entries are readable through
//! `get_property_value` without appearing in the serialization, which is how
//! a stored `margin: 1px` also answers for `margin-top`.
//!
//! Every mutation path funnels into the primitive methods here; shorthand
//! handlers never touch the underlying maps directly.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::Serialize;
use strum_macros::Display;

use quokka_common::warning::warn_once;
use quokka_syntax::{parse_declaration_block, serialize_component_values};

use crate::error::StyleError;
use crate::properties;
use crate::values::has_var_reference;

/// [CSS Cascade § 6.4.2 Important Declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// The cascade priority of a declared property: normal or `!important`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display)]
pub enum Priority {
    /// A normal declaration (serialized as the empty string).
    #[default]
    #[strum(serialize = "")]
    Normal,
    /// An `!important` declaration.
    #[strum(serialize = "important")]
    Important,
}

impl Priority {
    /// Parse a priority string as `setProperty` receives it: the empty
    /// string, or an ASCII case-insensitive `"important"`. Anything else is
    /// invalid (the CSSOM treats the whole call as a no-op).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Some(Self::Normal)
        } else if trimmed.eq_ignore_ascii_case("important") {
            Some(Self::Important)
        } else {
            None
        }
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

/// The tri-state input to a property set, resolved once at the API boundary.
///
/// Mirrors the host-language contract: an absent value is a no-op, a null or
/// empty value clears the property, anything else is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetInput {
    /// No value was provided — leave the property untouched.
    NoOp,
    /// Null or empty — remove the property.
    Clear,
    /// Set the property to this raw text (validated downstream).
    Value(String),
}

impl SetInput {
    /// Resolve a raw string: empty (after trimming) clears, anything else sets.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Clear
        } else {
            Self::Value(trimmed.to_string())
        }
    }
}

impl From<Option<&str>> for SetInput {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::NoOp, Self::from_raw)
    }
}

/// Change callback: receives the final `cssText` after an externally
/// observable mutation.
pub type ChangeHandler = Box<dyn FnMut(&str)>;

/// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
///
/// An inline CSS declaration block. Created empty by its owner (element or
/// rule); mutated exclusively through [`set_property`](Self::set_property) /
/// [`remove_property`](Self::remove_property) / [`set_css_text`](Self::set_css_text)
/// and the typed accessors, all of which funnel into one primitive.
#[derive(Default)]
pub struct StyleDeclaration {
    /// Declared property names, insertion order. No duplicates.
    order: Vec<String>,
    /// Property name → canonical value text. May hold derived entries for
    /// names not in `order` (see module docs).
    values: HashMap<String, String>,
    /// Property name → priority, same key set as `values`.
    priorities: HashMap<String, Priority>,
    /// True while a compound operation is in flight; suppresses
    /// intermediate change notifications.
    updating: bool,
    /// Change callback owned by the enclosing context.
    on_change: Option<ChangeHandler>,
}

impl fmt::Debug for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleDeclaration")
            .field("css_text", &self.css_text())
            .finish_non_exhaustive()
    }
}

impl StyleDeclaration {
    /// Create an empty declaration block with no change callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty declaration block that reports mutations to the
    /// given callback with the block's new `cssText`.
    #[must_use]
    pub fn with_change_handler(handler: ChangeHandler) -> Self {
        Self {
            on_change: Some(handler),
            ..Self::default()
        }
    }

    /// Replace the change callback.
    pub fn set_change_handler(&mut self, handler: Option<ChangeHandler>) {
        self.on_change = handler;
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    /// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    ///
    /// "Return the value of the property if it is set, or the empty string
    /// otherwise." Custom properties (`--*`) are case-sensitive; standard
    /// names are matched case-insensitively.
    #[must_use]
    pub fn get_property_value(&self, name: &str) -> String {
        let key = normalize_name(name);
        self.values.get(key.as_ref()).cloned().unwrap_or_default()
    }

    /// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertypriority)
    ///
    /// "Return the important flag of the property if it is set, or the
    /// empty string otherwise."
    #[must_use]
    pub fn get_property_priority(&self, name: &str) -> String {
        let key = normalize_name(name);
        self.priorities
            .get(key.as_ref())
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-item)
    ///
    /// The name of the declared property at `index`, or the empty string
    /// out of range.
    ///
    /// # Errors
    ///
    /// [`StyleError::MissingItemIndex`] when called without an index, the
    /// argument-count hard failure of the DOM contract.
    pub fn item(&self, index: Option<usize>) -> Result<String, StyleError> {
        let index = index.ok_or(StyleError::MissingItemIndex)?;
        Ok(self.order.get(index).cloned().unwrap_or_default())
    }

    /// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-length)
    ///
    /// "The number of CSS declarations in the declarations."
    #[must_use]
    pub fn length(&self) -> usize {
        self.order.len()
    }

    /// Shrink `length` by truncating the tail of the declared-name list.
    ///
    /// Legacy CSSOM quirk, intentional: the values and priorities of the
    /// truncated names are left stale and unreachable, matching the
    /// host-object contract this block emulates. Growing the length is a
    /// no-op.
    pub fn set_length(&mut self, new_length: usize) {
        self.run_update(|block| {
            if new_length < block.order.len() {
                block.order.truncate(new_length);
            }
        });
    }

    /// [CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
    ///
    /// Serialize the block: `"<name>: <value>[ !important];"` joined with a
    /// single space, in declaration order.
    #[must_use]
    pub fn css_text(&self) -> String {
        let parts: Vec<String> = self
            .order
            .iter()
            .map(|name| {
                let value = self.values.get(name).map_or("", String::as_str);
                match self.priorities.get(name) {
                    Some(Priority::Important) => format!("{name}: {value} !important;"),
                    _ => format!("{name}: {value};"),
                }
            })
            .collect();
        parts.join(" ")
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    ///
    /// Set a property from raw text. An empty value removes the property; a
    /// value failing the property's grammar is silently ignored; an unknown
    /// standard property name is a no-op.
    pub fn set_property(&mut self, name: &str, value: &str, priority: Priority) {
        self.set_property_input(name, SetInput::from_raw(value), priority);
    }

    /// Set a property from an already-resolved tri-state input. This is the
    /// entry point for binding layers that distinguish absent from empty.
    pub fn set_property_input(&mut self, name: &str, input: SetInput, priority: Priority) {
        self.run_update(|block| block.apply_set(name, input, priority));
    }

    /// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-removeproperty)
    ///
    /// Remove a declared property, returning its prior value (the empty
    /// string if it was not set). Removing an absent property does not
    /// notify.
    pub fn remove_property(&mut self, name: &str) -> String {
        let key = normalize_name(name).into_owned();
        self.run_update(|block| block.take_entry(&key))
    }

    /// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-csstext)
    ///
    /// Replace the whole block from declaration-block text. Parsing is
    /// fail-soft: a malformed declaration is dropped and the rest of the
    /// text is honored; the longest cleanly-parsed prefix wins, never an
    /// error. Fires at most one change notification.
    pub fn set_css_text(&mut self, text: &str) {
        self.run_update(|block| {
            block.order.clear();
            block.values.clear();
            block.priorities.clear();

            for decl in parse_declaration_block(text) {
                let value = serialize_component_values(&decl.value);
                let priority = if decl.important {
                    Priority::Important
                } else {
                    Priority::Normal
                };
                block.apply_set(&decl.name, SetInput::from_raw(&value), priority);
            }
        });
    }

    // ------------------------------------------------------------------
    // Internal: the setter chain
    // ------------------------------------------------------------------

    /// The resolved set operation, run inside an update scope.
    fn apply_set(&mut self, name: &str, input: SetInput, priority: Priority) {
        let value = match input {
            SetInput::NoOp => return,
            SetInput::Clear => {
                let _ = self.take_entry(normalize_name(name).as_ref());
                return;
            }
            SetInput::Value(value) => value,
        };

        // Custom properties bypass validation entirely: case-sensitive name,
        // verbatim value.
        if name.starts_with("--") {
            self.upsert(name, &value, priority);
            return;
        }

        let name = name.to_ascii_lowercase();
        if !properties::is_supported(&name) {
            warn_once("CSSOM", &format!("unknown property '{name}' ignored"));
            return;
        }

        // [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
        // An unresolved var() reference makes the value opaque: it is stored
        // only on the exact property it was set on, and nothing can be
        // derived from it.
        if has_var_reference(&value) {
            self.set_opaque(&name, &value, priority);
            return;
        }

        (properties::lookup(&name).set)(self, &name, &value, priority);
    }

    /// Store an opaque `var()`-bearing value on exactly this property and
    /// sever every derivation path through it: member longhands are cleared
    /// (they would otherwise be derived from it) and enclosing shorthands
    /// are dropped (they can no longer be derived into).
    fn set_opaque(&mut self, name: &str, raw: &str, priority: Priority) {
        for member in properties::expanded_members(name) {
            let _ = self.take_entry(member);
        }
        for ancestor in properties::enclosing_shorthands(name) {
            let _ = self.take_entry(ancestor);
        }
        self.upsert(name, raw, priority);
    }

    // ------------------------------------------------------------------
    // Internal: primitives (the only code that touches the maps)
    // ------------------------------------------------------------------

    /// The primitive mutation: upsert a declared entry, keeping its position
    /// in `order` when already declared, appending when new. An empty value
    /// degrades to removal.
    pub(crate) fn upsert(&mut self, name: &str, value: &str, priority: Priority) {
        if value.is_empty() {
            let _ = self.take_entry(name);
            return;
        }
        if !self.order.iter().any(|n| n == name) {
            self.order.push(name.to_string());
        }
        let _ = self.values.insert(name.to_string(), value.to_string());
        let _ = self.priorities.insert(name.to_string(), priority);
    }

    /// Write a derived entry: value and priority without a declaration. The
    /// name stays out of `order` (unless already declared), so the entry is
    /// readable but not serialized on its own.
    pub(crate) fn set_derived(&mut self, name: &str, value: &str, priority: Priority) {
        if value.is_empty() {
            return;
        }
        let _ = self.values.insert(name.to_string(), value.to_string());
        let _ = self.priorities.insert(name.to_string(), priority);
    }

    /// Remove an entry everywhere — declaration, value, and priority —
    /// returning the prior value (empty string if absent).
    pub(crate) fn take_entry(&mut self, name: &str) -> String {
        self.order.retain(|n| n != name);
        let _ = self.priorities.remove(name);
        self.values.remove(name).unwrap_or_default()
    }

    /// Current value of a name, declared or derived.
    pub(crate) fn value_of(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Current priority of a name, declared or derived.
    pub(crate) fn priority_of(&self, name: &str) -> Option<Priority> {
        self.priorities.get(name).copied()
    }

    /// True if the name is declared (participates in `cssText`).
    pub(crate) fn is_declared(&self, name: &str) -> bool {
        self.order.iter().any(|n| n == name)
    }

    /// Run a mutation inside the update scope: intermediate notifications
    /// are suppressed and exactly one fires at the end, carrying the final
    /// `cssText` — unless that text equals the text captured before the
    /// operation began (no-op detection).
    pub(crate) fn run_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.updating {
            return f(self);
        }
        self.updating = true;
        let before = self.css_text();
        let result = f(self);
        self.updating = false;
        let after = self.css_text();
        if after != before {
            if let Some(handler) = self.on_change.as_mut() {
                handler(&after);
            }
        }
        result
    }
}

/// Indexed access mirrors `item(i)`: the declared name at `i`, or the empty
/// string out of range.
impl Index<usize> for StyleDeclaration {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        self.order.get(index).map_or("", String::as_str)
    }
}

/// Normalize a property name for lookup: custom properties are
/// case-sensitive, standard names lowercase. Borrows when no change is
/// needed.
fn normalize_name(name: &str) -> std::borrow::Cow<'_, str> {
    if name.starts_with("--") || name.chars().all(|c| !c.is_ascii_uppercase()) {
        std::borrow::Cow::Borrowed(name)
    } else {
        std::borrow::Cow::Owned(name.to_ascii_lowercase())
    }
}

/// Generate a typed getter/setter pair per property, the attribute surface
/// a DOM layer binds to. Thin wrappers over the string API.
macro_rules! style_accessors {
    ($(($getter:ident, $setter:ident, $prop:literal)),* $(,)?) => {
        impl StyleDeclaration {
            $(
                #[doc = concat!("Read the `", $prop, "` property (empty string when unset).")]
                #[must_use]
                pub fn $getter(&self) -> String {
                    self.get_property_value($prop)
                }

                #[doc = concat!("Set the `", $prop, "` property with normal priority.")]
                pub fn $setter(&mut self, value: &str) {
                    self.set_property($prop, value, Priority::Normal);
                }
            )*
        }
    };
}

style_accessors![
    (background, set_background, "background"),
    (background_attachment, set_background_attachment, "background-attachment"),
    (background_color, set_background_color, "background-color"),
    (background_image, set_background_image, "background-image"),
    (background_position, set_background_position, "background-position"),
    (background_repeat, set_background_repeat, "background-repeat"),
    (background_size, set_background_size, "background-size"),
    (border, set_border, "border"),
    (border_bottom, set_border_bottom, "border-bottom"),
    (border_bottom_color, set_border_bottom_color, "border-bottom-color"),
    (border_bottom_style, set_border_bottom_style, "border-bottom-style"),
    (border_bottom_width, set_border_bottom_width, "border-bottom-width"),
    (border_color, set_border_color, "border-color"),
    (border_left, set_border_left, "border-left"),
    (border_left_color, set_border_left_color, "border-left-color"),
    (border_left_style, set_border_left_style, "border-left-style"),
    (border_left_width, set_border_left_width, "border-left-width"),
    (border_right, set_border_right, "border-right"),
    (border_right_color, set_border_right_color, "border-right-color"),
    (border_right_style, set_border_right_style, "border-right-style"),
    (border_right_width, set_border_right_width, "border-right-width"),
    (border_style, set_border_style, "border-style"),
    (border_top, set_border_top, "border-top"),
    (border_top_color, set_border_top_color, "border-top-color"),
    (border_top_style, set_border_top_style, "border-top-style"),
    (border_top_width, set_border_top_width, "border-top-width"),
    (border_width, set_border_width, "border-width"),
    (bottom, set_bottom, "bottom"),
    (clear, set_clear, "clear"),
    (clip, set_clip, "clip"),
    (color, set_color, "color"),
    (css_float, set_css_float, "float"),
    (display, set_display, "display"),
    (flex, set_flex, "flex"),
    (flex_basis, set_flex_basis, "flex-basis"),
    (flex_grow, set_flex_grow, "flex-grow"),
    (flex_shrink, set_flex_shrink, "flex-shrink"),
    (font, set_font, "font"),
    (font_family, set_font_family, "font-family"),
    (font_size, set_font_size, "font-size"),
    (font_style, set_font_style, "font-style"),
    (font_variant, set_font_variant, "font-variant"),
    (font_weight, set_font_weight, "font-weight"),
    (height, set_height, "height"),
    (left, set_left, "left"),
    (line_height, set_line_height, "line-height"),
    (margin, set_margin, "margin"),
    (margin_bottom, set_margin_bottom, "margin-bottom"),
    (margin_left, set_margin_left, "margin-left"),
    (margin_right, set_margin_right, "margin-right"),
    (margin_top, set_margin_top, "margin-top"),
    (opacity, set_opacity, "opacity"),
    (outline, set_outline, "outline"),
    (outline_color, set_outline_color, "outline-color"),
    (outline_style, set_outline_style, "outline-style"),
    (outline_width, set_outline_width, "outline-width"),
    (padding, set_padding, "padding"),
    (padding_bottom, set_padding_bottom, "padding-bottom"),
    (padding_left, set_padding_left, "padding-left"),
    (padding_right, set_padding_right, "padding-right"),
    (padding_top, set_padding_top, "padding-top"),
    (position, set_position, "position"),
    (right, set_right, "right"),
    (top, set_top, "top"),
    (visibility, set_visibility, "visibility"),
    (width, set_width, "width"),
];
