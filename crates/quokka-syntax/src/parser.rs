//! Declaration parsing per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization
//! stage." This module parses the contents of a declaration block — the value
//! of a `style` attribute — into declarations, and serializes component values
//! back to text.
//!
//! Error recovery follows [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations):
//! a malformed run is discarded component value by component value up to the
//! next semicolon. Because a `{}` block is a single component value, a nested
//! rule (`&.x { ... }`) is swallowed whole by that recovery — and the
//! recovery then keeps discarding until the next semicolon, which drops the
//! declaration immediately following the nested rule. An at-rule, by
//! contrast, is consumed as a unit (prelude plus block), so declarations
//! after an `@media`/`@layer` block are kept. Both behaviors are part of the
//! external contract of the declaration store.

use crate::token::CssToken;
use crate::tokenizer::CssTokenizer;

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, exactly as written (case is the store's concern).
    pub name: String,
    /// The property value as component values, `!important` removed.
    pub value: Vec<ComponentValue>,
    /// Whether the declaration has `!important`.
    pub important: bool,
}

/// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
///
/// A component value in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CssToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments.
        value: Vec<ComponentValue>,
    },
    /// A simple block.
    Block {
        /// The opening token character.
        token: char,
        /// The block contents.
        value: Vec<ComponentValue>,
    },
}

impl ComponentValue {
    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Token(CssToken::Whitespace))
    }
}

/// CSS declaration parser over a token stream.
pub struct CssParser {
    tokens: Vec<CssToken>,
    position: usize,
}

impl CssParser {
    /// Create a new parser from a list of tokens.
    #[must_use]
    pub const fn new(tokens: Vec<CssToken>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// [§ 5.3.8 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    ///
    /// Parse declarations from a style attribute or similar.
    pub fn parse_declaration_list(&mut self) -> Vec<Declaration> {
        self.consume_list_of_declarations()
    }

    /// Parse the remaining tokens as a flat component-value list.
    pub fn parse_component_value_list(&mut self) -> Vec<ComponentValue> {
        let mut values = Vec::new();
        while !matches!(self.peek(), None | Some(CssToken::Eof)) {
            if let Some(v) = self.consume_component_value() {
                values.push(v);
            }
        }
        values
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    fn consume_list_of_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            match self.peek() {
                // "<whitespace-token>" or "<semicolon-token>"
                // "Do nothing."
                Some(CssToken::Whitespace | CssToken::Semicolon) => {
                    let _ = self.consume();
                }

                // "<EOF-token>" or "<}-token>"
                // "Return the list of declarations."
                None | Some(CssToken::Eof | CssToken::RightBrace) => {
                    return declarations;
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule."
                // At-rules carry no declarations for a style attribute; the
                // whole rule (prelude and block) is stepped over, and parsing
                // resumes with whatever follows it.
                Some(CssToken::AtKeyword(_)) => {
                    self.consume_at_rule();
                }

                // "<ident-token>"
                // "Consume a declaration. If anything was returned, append it to
                // the list of declarations."
                Some(CssToken::Ident(_)) => {
                    if let Some(decl) = self.consume_declaration() {
                        declarations.push(decl);
                    }
                }

                // "anything else"
                // "This is a parse error. Reconsume the current input token. As
                // long as the next input token is anything other than a
                // <semicolon-token> or <EOF-token>, consume a component value and
                // throw away the returned value."
                //
                // A nested rule's `{}` block is one component value, so the
                // recovery consumes it whole and keeps discarding through the
                // next semicolon — dropping the declaration right after it.
                Some(_) => {
                    let _ = self.consume();
                    while !matches!(
                        self.peek(),
                        None | Some(CssToken::Semicolon | CssToken::RightBrace | CssToken::Eof)
                    ) {
                        let _ = self.consume_component_value();
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// The rule itself is discarded; this only advances past it.
    fn consume_at_rule(&mut self) {
        // "Consume the next input token." (the at-keyword)
        let _ = self.consume();

        loop {
            match self.peek() {
                // "<semicolon-token>"
                // "Return the at-rule."
                Some(CssToken::Semicolon) => {
                    let _ = self.consume();
                    return;
                }

                // "<EOF-token>"
                // "This is a parse error. Return the at-rule."
                None | Some(CssToken::Eof) => {
                    return;
                }

                // "<{-token>"
                // "Consume a simple block and assign it to the at-rule's block.
                // Return the at-rule."
                Some(CssToken::LeftBrace) => {
                    let _ = self.consume_simple_block();
                    return;
                }

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the at-rule's prelude."
                Some(_) => {
                    let _ = self.consume_component_value();
                }
            }
        }
    }

    /// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    fn consume_simple_block(&mut self) -> Vec<ComponentValue> {
        let ending_token = match self.consume() {
            Some(CssToken::LeftBrace) => CssToken::RightBrace,
            Some(CssToken::LeftBracket) => CssToken::RightBracket,
            Some(CssToken::LeftParen) => CssToken::RightParen,
            _ => return Vec::new(),
        };

        let mut value = Vec::new();

        loop {
            match self.peek() {
                Some(token) if *token == ending_token => {
                    let _ = self.consume();
                    return value;
                }
                None | Some(CssToken::Eof) => {
                    return value;
                }
                Some(_) => {
                    if let Some(v) = self.consume_component_value() {
                        value.push(v);
                    }
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn consume_declaration(&mut self) -> Option<Declaration> {
        // "Consume the next input token."
        let name = match self.consume() {
            Some(CssToken::Ident(name)) => name.clone(),
            _ => return None,
        };

        // "While the next input token is a <whitespace-token>, consume the next input token."
        while self.peek() == Some(&CssToken::Whitespace) {
            let _ = self.consume();
        }

        // "If the next input token is anything other than a <colon-token>, this
        // is a parse error. Return nothing."
        if self.peek() != Some(&CssToken::Colon) {
            return None;
        }
        let _ = self.consume(); // :

        // "While the next input token is a <whitespace-token>, consume the next input token."
        while self.peek() == Some(&CssToken::Whitespace) {
            let _ = self.consume();
        }

        // "As long as the next input token is anything other than an
        // <EOF-token>, consume a component value and append it to the
        // declaration's value."
        let mut value = Vec::new();
        while !matches!(
            self.peek(),
            None | Some(CssToken::Eof | CssToken::Semicolon | CssToken::RightBrace)
        ) {
            if let Some(v) = self.consume_component_value() {
                value.push(v);
            }
        }

        // Check for !important
        let important = check_important(&value);

        // Remove trailing whitespace and !important from value
        let value = trim_important(value);

        Some(Declaration {
            name,
            value,
            important,
        })
    }

    /// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component_value(&mut self) -> Option<ComponentValue> {
        match self.peek() {
            // "<{-token>", "<[-token>", "<(-token>"
            Some(CssToken::LeftBrace | CssToken::LeftBracket | CssToken::LeftParen) => {
                let token = match self.peek() {
                    Some(CssToken::LeftBrace) => '{',
                    Some(CssToken::LeftBracket) => '[',
                    Some(CssToken::LeftParen) => '(',
                    _ => return None,
                };
                let value = self.consume_simple_block();
                Some(ComponentValue::Block { token, value })
            }

            // "<function-token>"
            Some(CssToken::Function(_)) => {
                let name = match self.consume() {
                    Some(CssToken::Function(name)) => name.clone(),
                    _ => return None,
                };
                let mut value = Vec::new();
                loop {
                    match self.peek() {
                        Some(CssToken::RightParen) => {
                            let _ = self.consume();
                            break;
                        }
                        None | Some(CssToken::Eof) => break,
                        Some(_) => {
                            if let Some(v) = self.consume_component_value() {
                                value.push(v);
                            }
                        }
                    }
                }
                Some(ComponentValue::Function { name, value })
            }

            // "anything else"
            Some(_) => {
                let token = self.consume()?.clone();
                Some(ComponentValue::Token(token))
            }

            None => None,
        }
    }

    fn consume(&mut self) -> Option<&CssToken> {
        if self.position < self.tokens.len() {
            let token = &self.tokens[self.position];
            self.position += 1;
            Some(token)
        } else {
            None
        }
    }

    fn peek(&self) -> Option<&CssToken> {
        self.tokens.get(self.position)
    }
}

/// Parse the text of a declaration block (a `style` attribute value) into
/// declarations, with the error recovery described in the module docs.
#[must_use]
pub fn parse_declaration_block(input: &str) -> Vec<Declaration> {
    let tokens = CssTokenizer::tokenize(input);
    let mut parser = CssParser::new(tokens);
    parser.parse_declaration_list()
}

/// Parse free-form text into a flat component-value list.
#[must_use]
pub fn parse_component_values(input: &str) -> Vec<ComponentValue> {
    let tokens = CssTokenizer::tokenize(input);
    let mut parser = CssParser::new(tokens);
    parser.parse_component_value_list()
}

/// [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
///
/// Serialize component values back to text. Whitespace runs collapse to a
/// single space; strings and urls are re-emitted double-quoted with `"` and
/// `\` escaped, which keeps the output round-trippable through the tokenizer.
#[must_use]
pub fn serialize_component_values(values: &[ComponentValue]) -> String {
    let mut out = String::new();
    for value in values {
        serialize_one(value, &mut out);
    }
    out
}

fn serialize_one(value: &ComponentValue, out: &mut String) {
    match value {
        ComponentValue::Token(token) => serialize_token(token, out),
        ComponentValue::Function { name, value } => {
            out.push_str(name);
            out.push('(');
            for v in value {
                serialize_one(v, out);
            }
            out.push(')');
        }
        ComponentValue::Block { token, value } => {
            let (open, close) = match token {
                '[' => ('[', ']'),
                '(' => ('(', ')'),
                _ => ('{', '}'),
            };
            out.push(open);
            for v in value {
                serialize_one(v, out);
            }
            out.push(close);
        }
    }
}

fn serialize_token(token: &CssToken, out: &mut String) {
    match token {
        CssToken::Ident(v) => out.push_str(v),
        CssToken::Function(v) => {
            out.push_str(v);
            out.push('(');
        }
        CssToken::AtKeyword(v) => {
            out.push('@');
            out.push_str(v);
        }
        CssToken::Hash { value, .. } => {
            out.push('#');
            out.push_str(value);
        }
        CssToken::String(v) => out.push_str(&quote_string(v)),
        CssToken::Url(v) => {
            out.push_str("url(");
            out.push_str(&quote_string(v));
            out.push(')');
        }
        CssToken::Delim(c) => out.push(*c),
        CssToken::Number {
            value, int_value, ..
        } => out.push_str(&format_numeric(*value, *int_value)),
        CssToken::Percentage {
            value, int_value, ..
        } => {
            out.push_str(&format_numeric(*value, *int_value));
            out.push('%');
        }
        CssToken::Dimension {
            value,
            int_value,
            unit,
            ..
        } => {
            out.push_str(&format_numeric(*value, *int_value));
            out.push_str(unit);
        }
        CssToken::Whitespace => out.push(' '),
        CssToken::Colon => out.push(':'),
        CssToken::Semicolon => out.push(';'),
        CssToken::Comma => out.push(','),
        CssToken::LeftBracket => out.push('['),
        CssToken::RightBracket => out.push(']'),
        CssToken::LeftParen => out.push('('),
        CssToken::RightParen => out.push(')'),
        CssToken::LeftBrace => out.push('{'),
        CssToken::RightBrace => out.push('}'),
        // Parse errors and EOF have no serialization.
        CssToken::BadString | CssToken::BadUrl | CssToken::Eof => {}
    }
}

/// Double-quote a string value, escaping `"` and `\`.
///
/// [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
#[must_use]
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Format a numeric token value: integers keep their integer form, other
/// numbers use the shortest round-trip decimal form.
fn format_numeric(value: f64, int_value: Option<i64>) -> String {
    match int_value {
        Some(i) => i.to_string(),
        None => value.to_string(),
    }
}

/// Split a component-value list into runs separated by top-level whitespace.
/// Whitespace inside functions and blocks does not split.
#[must_use]
pub fn split_whitespace_runs(values: &[ComponentValue]) -> Vec<Vec<ComponentValue>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for value in values {
        if value.is_whitespace() {
            if !current.is_empty() {
                runs.push(core::mem::take(&mut current));
            }
        } else {
            current.push(value.clone());
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Split a component-value list on top-level commas, trimming whitespace at
/// the edges of each segment. Commas inside functions and blocks do not split.
#[must_use]
pub fn split_commas(values: &[ComponentValue]) -> Vec<Vec<ComponentValue>> {
    let mut segments = Vec::new();
    let mut current: Vec<ComponentValue> = Vec::new();

    for value in values {
        if matches!(value, ComponentValue::Token(CssToken::Comma)) {
            segments.push(trim_whitespace(core::mem::take(&mut current)));
        } else {
            current.push(value.clone());
        }
    }
    segments.push(trim_whitespace(current));
    segments
}

/// Remove leading and trailing whitespace tokens from a component-value list.
#[must_use]
pub fn trim_whitespace(mut values: Vec<ComponentValue>) -> Vec<ComponentValue> {
    while values.first().is_some_and(ComponentValue::is_whitespace) {
        let _ = values.remove(0);
    }
    while values.last().is_some_and(ComponentValue::is_whitespace) {
        let _ = values.pop();
    }
    values
}

/// Check if the value ends with !important.
///
/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation, i.e.
/// if the last two (non-whitespace, non-comment) tokens in its value are
/// a <delim-token> with the value "!" followed by an <ident-token> with
/// a value that is an ASCII case-insensitive match for "important"."
///
/// STEP 1: Skip trailing whitespace in the value.
/// STEP 2: Check for <ident-token> "important".
/// STEP 3: Skip any whitespace between "!" and "important".
/// STEP 4: Check for <delim-token> "!".
fn check_important(value: &[ComponentValue]) -> bool {
    let mut iter = value.iter().rev().peekable();

    // STEP 1: Skip trailing whitespace
    while let Some(ComponentValue::Token(CssToken::Whitespace)) = iter.peek() {
        let _ = iter.next();
    }

    // STEP 2: Check for ident "important"
    match iter.next() {
        Some(ComponentValue::Token(CssToken::Ident(s))) if s.eq_ignore_ascii_case("important") => {}
        _ => return false,
    }

    // STEP 3: Skip whitespace between ! and important
    while let Some(ComponentValue::Token(CssToken::Whitespace)) = iter.peek() {
        let _ = iter.next();
    }

    // STEP 4: Check for !
    matches!(
        iter.next(),
        Some(ComponentValue::Token(CssToken::Delim('!')))
    )
}

/// Remove trailing whitespace and !important from a declaration value.
///
/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// After detecting the !important annotation, this removes it from the value
/// so the remaining tokens represent the actual property value.
fn trim_important(mut value: Vec<ComponentValue>) -> Vec<ComponentValue> {
    // Remove trailing whitespace
    while matches!(
        value.last(),
        Some(ComponentValue::Token(CssToken::Whitespace))
    ) {
        let _ = value.pop();
    }

    // Check and remove "important"
    if matches!(
        value.last(),
        Some(ComponentValue::Token(CssToken::Ident(s))) if s.eq_ignore_ascii_case("important")
    ) {
        let _ = value.pop();

        // Remove whitespace between ! and important
        while matches!(
            value.last(),
            Some(ComponentValue::Token(CssToken::Whitespace))
        ) {
            let _ = value.pop();
        }

        // Remove !
        if matches!(
            value.last(),
            Some(ComponentValue::Token(CssToken::Delim('!')))
        ) {
            let _ = value.pop();
        }
    }

    // Remove trailing whitespace again
    while matches!(
        value.last(),
        Some(ComponentValue::Token(CssToken::Whitespace))
    ) {
        let _ = value.pop();
    }

    value
}
