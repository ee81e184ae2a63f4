//! CSS value grammar: classification and typed canonicalizing parsers.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Every raw value string offered to a property goes through one of the
//! typed parsers here. A parser either produces the canonical textual form
//! of the value (the single normalized form the store keeps and prints), or
//! signals rejection. Rejection is a value, not an error — CSS parsing is
//! forgiving and a rejected value simply leaves the property unchanged.

/// Color parsing per [CSS Color Level 4](https://www.w3.org/TR/css-color-4/).
pub mod color;
/// Named-color and system-color keyword tables.
pub mod named_colors;

use serde::Serialize;
use strum_macros::Display;

use quokka_syntax::{
    ComponentValue, CssToken, parse_component_values, quote_string, serialize_component_values,
    trim_whitespace,
};

/// [§ 2 CSS-wide keywords](https://www.w3.org/TR/css-values-4/#common-keywords)
///
/// "All of these keywords are normatively defined in the Cascade module."
/// Accepted for every property, in every keyword parser.
pub const CSS_WIDE_KEYWORDS: [&str; 5] = ["inherit", "initial", "revert", "revert-layer", "unset"];

/// [§ 6.1 Relative Lengths / § 6.2 Absolute Lengths](https://www.w3.org/TR/css-values-4/#lengths)
///
/// The length units the value grammar recognizes.
pub const LENGTH_UNITS: [&str; 12] = [
    "ch", "cm", "em", "ex", "in", "mm", "pc", "pt", "px", "rem", "vh", "vw",
];

/// [§ 6.6 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
const ANGLE_UNITS: [&str; 3] = ["deg", "grad", "rad"];

/// The outcome of a typed parse: either the canonical text, an explicit
/// empty (null input passes through unchanged), or rejection.
///
/// Rejection propagates as a value through the setter chain — never as an
/// error (CSS is forgiving; see the error module).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// The value was accepted; this is its canonical textual form.
    Value(String),
    /// Null or empty input — passes through, the setter clears the property.
    Empty,
    /// The value failed this parser's grammar; the property is unchanged.
    Reject,
}

impl Parsed {
    /// Returns true if this parse was rejected.
    #[must_use]
    pub const fn is_reject(&self) -> bool {
        matches!(self, Self::Reject)
    }

    /// Return the canonical text, if the value was accepted.
    #[must_use]
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Value(v) => Some(v),
            Self::Empty | Self::Reject => None,
        }
    }
}

impl From<Option<String>> for Parsed {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Reject, Self::Value)
    }
}

/// The value kinds the grammar distinguishes.
///
/// [§ 2 Value Definition Syntax](https://www.w3.org/TR/css-values-4/#value-defs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum ValueKind {
    /// Null or empty input.
    #[strum(serialize = "null-or-empty")]
    NullOrEmpty,
    /// "`<integer>`"
    #[strum(serialize = "integer")]
    Integer,
    /// "`<number>`"
    #[strum(serialize = "number")]
    Number,
    /// "`<length>`" — a number with a length unit, or bare `0`.
    #[strum(serialize = "length")]
    Length,
    /// "`<percentage>`"
    #[strum(serialize = "percent")]
    Percent,
    /// "`<url>`"
    #[strum(serialize = "url")]
    Url,
    /// "`calc()`" — kept opaque, passed through.
    #[strum(serialize = "calc")]
    Calc,
    /// "`<string>`"
    #[strum(serialize = "string")]
    String,
    /// "`<angle>`"
    #[strum(serialize = "angle")]
    Angle,
    /// "`<color>`"
    #[strum(serialize = "color")]
    Color,
    /// An identifier that is not a recognized color.
    #[strum(serialize = "keyword")]
    Keyword,
    /// A value containing an unresolved `var()` reference — opaque.
    ///
    /// [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
    #[strum(serialize = "var")]
    VarReference,
    /// Anything the grammar does not recognize as a single value.
    #[strum(serialize = "unknown")]
    Unknown,
}

/// Classify a raw value string into one value kind.
///
/// The order of checks mirrors the grammar's priority: numeric forms first,
/// then functional/url/string forms, then colors, then bare keywords.
#[must_use]
pub fn classify(raw: &str) -> ValueKind {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ValueKind::NullOrEmpty;
    }

    let values = trim_whitespace(parse_component_values(trimmed));

    // [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
    // "If a property value contains one or more var() functions ... the
    // entire property's grammar must be assumed to be valid at parse time."
    // A var() reference anywhere makes the whole value opaque.
    if contains_var(&values) {
        return ValueKind::VarReference;
    }

    let [value] = &values[..] else {
        return ValueKind::Unknown;
    };

    match value {
        ComponentValue::Token(CssToken::Number { int_value, .. }) => {
            if int_value.is_some() {
                ValueKind::Integer
            } else {
                ValueKind::Number
            }
        }
        ComponentValue::Token(CssToken::Dimension { unit, .. }) => {
            let unit = unit.to_ascii_lowercase();
            if LENGTH_UNITS.contains(&unit.as_str()) {
                ValueKind::Length
            } else if ANGLE_UNITS.contains(&unit.as_str()) {
                ValueKind::Angle
            } else {
                ValueKind::Unknown
            }
        }
        ComponentValue::Token(CssToken::Percentage { .. }) => ValueKind::Percent,
        ComponentValue::Token(CssToken::Url(_)) => ValueKind::Url,
        ComponentValue::Token(CssToken::String(_)) => ValueKind::String,
        ComponentValue::Token(CssToken::Hash { value, .. }) => {
            if is_hex_color(value) {
                ValueKind::Color
            } else {
                ValueKind::Unknown
            }
        }
        ComponentValue::Token(CssToken::Ident(name)) => {
            let lower = name.to_ascii_lowercase();
            if named_colors::is_color_keyword(&lower) {
                ValueKind::Color
            } else {
                ValueKind::Keyword
            }
        }
        ComponentValue::Function { name, .. } => match name.to_ascii_lowercase().as_str() {
            "url" => ValueKind::Url,
            "calc" => ValueKind::Calc,
            "rgb" | "rgba" | "hsl" | "hsla" => ValueKind::Color,
            _ => ValueKind::Unknown,
        },
        ComponentValue::Token(_) | ComponentValue::Block { .. } => ValueKind::Unknown,
    }
}

/// [CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// Check if component values contain any `var()` function references,
/// including nested occurrences (e.g. `calc(var(--x) + 1px)`).
#[must_use]
pub fn contains_var(values: &[ComponentValue]) -> bool {
    for cv in values {
        match cv {
            ComponentValue::Function { name, value } => {
                if name.eq_ignore_ascii_case("var") {
                    return true;
                }
                if contains_var(value) {
                    return true;
                }
            }
            ComponentValue::Block { value, .. } => {
                if contains_var(value) {
                    return true;
                }
            }
            ComponentValue::Token(_) => {}
        }
    }
    false
}

/// Check a raw string for `var()` references without classifying it.
#[must_use]
pub fn has_var_reference(raw: &str) -> bool {
    contains_var(&parse_component_values(raw))
}

/// "`<integer>`" — [§ 4.1](https://www.w3.org/TR/css-values-4/#integers)
///
/// Canonical form is the plain decimal integer.
#[must_use]
pub fn parse_integer(raw: &str) -> Parsed {
    match single_component(raw) {
        SingleComponent::Empty => Parsed::Empty,
        SingleComponent::One(ComponentValue::Token(CssToken::Number {
            int_value: Some(i),
            ..
        })) => Parsed::Value(i.to_string()),
        _ => Parsed::Reject,
    }
}

/// "`<number>`" — [§ 4.2](https://www.w3.org/TR/css-values-4/#numbers)
///
/// Canonical form is the shortest decimal that round-trips (`.5` → `0.5`,
/// `1e2` → `100`).
#[must_use]
pub fn parse_number(raw: &str) -> Parsed {
    match single_component(raw) {
        SingleComponent::Empty => Parsed::Empty,
        SingleComponent::One(ComponentValue::Token(CssToken::Number { value, .. })) => {
            Parsed::Value(format_number(value))
        }
        _ => Parsed::Reject,
    }
}

/// "`<length>`" — [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
///
/// A number with a recognized length unit, or bare `0` (canonicalized to
/// `0px`). Units are lowercased.
#[must_use]
pub fn parse_length(raw: &str) -> Parsed {
    match single_component(raw) {
        SingleComponent::Empty => Parsed::Empty,
        SingleComponent::One(ComponentValue::Token(CssToken::Number { value, .. }))
            if value == 0.0 =>
        {
            // "However, for zero lengths the unit identifier is optional"
            Parsed::Value("0px".to_string())
        }
        SingleComponent::One(ComponentValue::Token(CssToken::Dimension {
            value, unit, ..
        })) => {
            let unit = unit.to_ascii_lowercase();
            if LENGTH_UNITS.contains(&unit.as_str()) {
                Parsed::Value(format!("{}{unit}", format_number(value)))
            } else {
                Parsed::Reject
            }
        }
        _ => Parsed::Reject,
    }
}

/// "`<percentage>`" — [§ 4.3](https://www.w3.org/TR/css-values-4/#percentages)
///
/// Bare `0` canonicalizes to `0%`.
#[must_use]
pub fn parse_percent(raw: &str) -> Parsed {
    match single_component(raw) {
        SingleComponent::Empty => Parsed::Empty,
        SingleComponent::One(ComponentValue::Token(CssToken::Number { value, .. }))
            if value == 0.0 =>
        {
            Parsed::Value("0%".to_string())
        }
        SingleComponent::One(ComponentValue::Token(CssToken::Percentage { value, .. })) => {
            Parsed::Value(format!("{}%", format_number(value)))
        }
        _ => Parsed::Reject,
    }
}

/// "`<length-percentage>`" plus opaque `calc()` passthrough.
///
/// [§ 8 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#calc-func)
/// "It can be used wherever `<length>`, `<percentage>`, ... values are allowed."
/// The expression is not evaluated here; its serialized form passes through.
#[must_use]
pub fn parse_measurement(raw: &str) -> Parsed {
    if let SingleComponent::One(cv) = single_component(raw) {
        if let ComponentValue::Function { name, .. } = &cv {
            return if name.eq_ignore_ascii_case("calc") {
                Parsed::Value(serialize_component_values(core::slice::from_ref(&cv)))
            } else {
                Parsed::Reject
            };
        }
    }
    match parse_length(raw) {
        Parsed::Reject => parse_percent(raw),
        parsed => parsed,
    }
}

/// "`<angle>`" — [§ 6.6 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
///
/// `grad` and `rad` convert to `deg`; the result is normalized into
/// `[0, 360)`.
#[must_use]
pub fn parse_angle(raw: &str) -> Parsed {
    match single_component(raw) {
        SingleComponent::Empty => Parsed::Empty,
        SingleComponent::One(ComponentValue::Token(CssToken::Dimension {
            value, unit, ..
        })) => {
            let degrees = match unit.to_ascii_lowercase().as_str() {
                "deg" => value,
                // "Gradians, also known as 'gons' or 'grades'. There are 400
                // gradians in a full circle."
                "grad" => value * 0.9,
                // "Radians. There are 2π radians in a full circle."
                "rad" => value * 180.0 / core::f64::consts::PI,
                _ => return Parsed::Reject,
            };
            let normalized = ((degrees % 360.0) + 360.0) % 360.0;
            Parsed::Value(format!("{}deg", format_number(normalized)))
        }
        _ => Parsed::Reject,
    }
}

/// "`<url>`" — [§ 8.5](https://www.w3.org/TR/css-values-4/#urls)
///
/// Unwraps `url(...)`, validates quoting (the tokenizer already rejects
/// unquoted bodies containing whitespace, quotes, or parentheses as
/// `<bad-url-token>`), and re-emits the double-quoted form.
#[must_use]
pub fn parse_url(raw: &str) -> Parsed {
    match single_component(raw) {
        SingleComponent::Empty => Parsed::Empty,
        SingleComponent::One(ComponentValue::Token(CssToken::Url(body))) => {
            Parsed::Value(format!("url({})", quote_string(&body)))
        }
        SingleComponent::One(ComponentValue::Function { name, value }) => {
            if !name.eq_ignore_ascii_case("url") {
                return Parsed::Reject;
            }
            let inner = trim_whitespace(value);
            match &inner[..] {
                [ComponentValue::Token(CssToken::String(body))] => {
                    Parsed::Value(format!("url({})", quote_string(body)))
                }
                _ => Parsed::Reject,
            }
        }
        _ => Parsed::Reject,
    }
}

/// "`<string>`" — [§ 8.4](https://www.w3.org/TR/css-values-4/#strings)
///
/// Re-emits the double-quoted form with `"` and `\` escaped.
#[must_use]
pub fn parse_string(raw: &str) -> Parsed {
    match single_component(raw) {
        SingleComponent::Empty => Parsed::Empty,
        SingleComponent::One(ComponentValue::Token(CssToken::String(body))) => {
            Parsed::Value(quote_string(&body))
        }
        _ => Parsed::Reject,
    }
}

/// Keyword match against an allow-list, ASCII case-insensitive.
///
/// [§ 2 CSS-wide keywords](https://www.w3.org/TR/css-values-4/#common-keywords)
/// are always accepted in addition to the allow-list. Canonical form is
/// lowercase.
#[must_use]
pub fn parse_keyword(raw: &str, allowed: &[&str]) -> Parsed {
    match single_component(raw) {
        SingleComponent::Empty => Parsed::Empty,
        SingleComponent::One(ComponentValue::Token(CssToken::Ident(name))) => {
            let lower = name.to_ascii_lowercase();
            if allowed.contains(&lower.as_str()) || CSS_WIDE_KEYWORDS.contains(&lower.as_str()) {
                Parsed::Value(lower)
            } else {
                Parsed::Reject
            }
        }
        _ => Parsed::Reject,
    }
}

/// "`<color>`" — see [`color::parse_color`].
#[must_use]
pub fn parse_color(raw: &str) -> Parsed {
    color::parse_color(raw)
}

/// "rect(`<top>`, `<right>`, `<bottom>`, `<left>`)" — the legacy clipping
/// shape, four comma-separated `auto | <length>` components.
///
/// [CSS Masking § 10.1](https://www.w3.org/TR/css-masking-1/#clip-property)
#[must_use]
pub fn parse_rect(raw: &str) -> Parsed {
    let SingleComponent::One(ComponentValue::Function { name, value }) = single_component(raw)
    else {
        return Parsed::Reject;
    };
    if !name.eq_ignore_ascii_case("rect") {
        return Parsed::Reject;
    }
    let segments = quokka_syntax::split_commas(&value);
    if segments.len() != 4 {
        return Parsed::Reject;
    }
    let mut sides = Vec::with_capacity(4);
    for segment in &segments {
        let text = serialize_component_values(segment);
        let side = match parse_keyword(&text, &["auto"]) {
            Parsed::Reject => parse_length(&text),
            parsed => parsed,
        };
        match side {
            Parsed::Value(v) => sides.push(v),
            Parsed::Empty | Parsed::Reject => return Parsed::Reject,
        }
    }
    Parsed::Value(format!("rect({})", sides.join(", ")))
}

/// Return the lowercase CSS-wide keyword if the raw value is exactly one.
#[must_use]
pub fn as_css_wide_keyword(raw: &str) -> Option<String> {
    match single_component(raw) {
        SingleComponent::One(ComponentValue::Token(CssToken::Ident(name))) => {
            let lower = name.to_ascii_lowercase();
            CSS_WIDE_KEYWORDS.contains(&lower.as_str()).then_some(lower)
        }
        _ => None,
    }
}

/// Format a numeric value: the shortest decimal form that round-trips.
/// Whole numbers drop the fraction (`2.0` → `"2"`).
#[must_use]
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// A raw string reduced to a single component value, or not.
enum SingleComponent {
    /// The input was empty (after trimming).
    Empty,
    /// Exactly one component value.
    One(ComponentValue),
    /// Zero-after-parse or more than one component value.
    Other,
}

/// Parse a raw string down to exactly one component value.
fn single_component(raw: &str) -> SingleComponent {
    if raw.trim().is_empty() {
        return SingleComponent::Empty;
    }
    let mut values = trim_whitespace(parse_component_values(raw));
    if values.len() == 1 {
        SingleComponent::One(values.remove(0))
    } else {
        SingleComponent::Other
    }
}

/// "The syntax of a `<hex-color>` is a `<hash-token>` token whose value
/// consists of 3, 4, 6, or 8 hexadecimal digits."
///
/// [CSS Color 4 § 4.2](https://www.w3.org/TR/css-color-4/#hex-notation)
fn is_hex_color(value: &str) -> bool {
    matches!(value.len(), 3 | 4 | 6 | 8) && value.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_kinds() {
        assert_eq!(classify(""), ValueKind::NullOrEmpty);
        assert_eq!(classify("  "), ValueKind::NullOrEmpty);
        assert_eq!(classify("12"), ValueKind::Integer);
        assert_eq!(classify("1.5"), ValueKind::Number);
        assert_eq!(classify("10px"), ValueKind::Length);
        assert_eq!(classify("50%"), ValueKind::Percent);
        assert_eq!(classify("url(a.png)"), ValueKind::Url);
        assert_eq!(classify("calc(100% - 10px)"), ValueKind::Calc);
        assert_eq!(classify("\"hi\""), ValueKind::String);
        assert_eq!(classify("45deg"), ValueKind::Angle);
        assert_eq!(classify("#fff"), ValueKind::Color);
        assert_eq!(classify("rgb(1, 2, 3)"), ValueKind::Color);
        assert_eq!(classify("rebeccapurple"), ValueKind::Color);
        assert_eq!(classify("buttonface"), ValueKind::Color);
        assert_eq!(classify("auto"), ValueKind::Keyword);
        assert_eq!(classify("var(--x)"), ValueKind::VarReference);
        assert_eq!(classify("calc(var(--x) + 1px)"), ValueKind::VarReference);
        assert_eq!(classify("1px solid"), ValueKind::Unknown);
        assert_eq!(classify("#ggg"), ValueKind::Unknown);
    }

    #[test]
    fn integer_canonicalization() {
        assert_eq!(parse_integer("12"), Parsed::Value("12".to_string()));
        assert_eq!(parse_integer("+12"), Parsed::Value("12".to_string()));
        assert_eq!(parse_integer("-3"), Parsed::Value("-3".to_string()));
        assert_eq!(parse_integer("1.5"), Parsed::Reject);
        assert_eq!(parse_integer(""), Parsed::Empty);
    }

    #[test]
    fn number_canonicalization() {
        assert_eq!(parse_number(".5"), Parsed::Value("0.5".to_string()));
        assert_eq!(parse_number("1e2"), Parsed::Value("100".to_string()));
        assert_eq!(parse_number("2"), Parsed::Value("2".to_string()));
        assert_eq!(parse_number("abc"), Parsed::Reject);
    }

    #[test]
    fn length_units_and_bare_zero() {
        assert_eq!(parse_length("10px"), Parsed::Value("10px".to_string()));
        assert_eq!(parse_length("1.5EM"), Parsed::Value("1.5em".to_string()));
        assert_eq!(parse_length("0"), Parsed::Value("0px".to_string()));
        assert_eq!(parse_length("10"), Parsed::Reject);
        assert_eq!(parse_length("10foo"), Parsed::Reject);
    }

    #[test]
    fn percent_and_bare_zero() {
        assert_eq!(parse_percent("50%"), Parsed::Value("50%".to_string()));
        assert_eq!(parse_percent("0"), Parsed::Value("0%".to_string()));
        assert_eq!(parse_percent("50px"), Parsed::Reject);
    }

    #[test]
    fn measurement_accepts_calc_opaque() {
        assert_eq!(
            parse_measurement("calc(100% - 10px)"),
            Parsed::Value("calc(100% - 10px)".to_string())
        );
        assert_eq!(parse_measurement("10px"), Parsed::Value("10px".to_string()));
        assert_eq!(parse_measurement("50%"), Parsed::Value("50%".to_string()));
        assert_eq!(parse_measurement("auto"), Parsed::Reject);
    }

    #[test]
    fn angle_conversion_and_normalization() {
        assert_eq!(parse_angle("90deg"), Parsed::Value("90deg".to_string()));
        assert_eq!(parse_angle("100grad"), Parsed::Value("90deg".to_string()));
        assert_eq!(parse_angle("-90deg"), Parsed::Value("270deg".to_string()));
        assert_eq!(parse_angle("450deg"), Parsed::Value("90deg".to_string()));
        assert_eq!(parse_angle("90px"), Parsed::Reject);
    }

    #[test]
    fn url_requoting() {
        assert_eq!(
            parse_url("url(a.png)"),
            Parsed::Value("url(\"a.png\")".to_string())
        );
        assert_eq!(
            parse_url("url('a.png')"),
            Parsed::Value("url(\"a.png\")".to_string())
        );
        assert_eq!(
            parse_url("url(\"a b.png\")"),
            Parsed::Value("url(\"a b.png\")".to_string())
        );
        // Unquoted whitespace is a bad url
        assert_eq!(parse_url("url(a b.png)"), Parsed::Reject);
        assert_eq!(parse_url("red"), Parsed::Reject);
    }

    #[test]
    fn keyword_allow_list_and_css_wide() {
        let allowed = ["left", "right"];
        assert_eq!(
            parse_keyword("LEFT", &allowed),
            Parsed::Value("left".to_string())
        );
        assert_eq!(
            parse_keyword("inherit", &allowed),
            Parsed::Value("inherit".to_string())
        );
        assert_eq!(
            parse_keyword("revert-layer", &allowed),
            Parsed::Value("revert-layer".to_string())
        );
        assert_eq!(parse_keyword("center", &allowed), Parsed::Reject);
    }
}
