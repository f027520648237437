//! CSS-like selector parsing for widget queries.
//!
//! Supports:
//! - `"#wifi"` - by test ID
//! - `"[data-testid='wifi']"` - by test ID
//! - `"[aria-label='Wi-Fi']"` - by accessible name
//! - `"[role='switch']"` - by accessible role

use swivel_core::{AccessibleRole, Widget};
use thiserror::Error;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by test ID (e.g., `#wifi` or `[data-testid='wifi']`)
    TestId(String),
    /// Match by accessible name (e.g., `[aria-label='Wi-Fi']`)
    Name(String),
    /// Match by accessible role (e.g., `[role='switch']`)
    Role(AccessibleRole),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches a widget.
    #[must_use]
    pub fn matches(&self, widget: &dyn Widget) -> bool {
        match self {
            Self::TestId(id) => widget.test_id() == Some(id.as_str()),
            Self::Name(name) => widget.accessible_name() == Some(name.as_str()),
            Self::Role(role) => widget.accessible_role() == *role,
        }
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();

        match self.peek_char() {
            None => Err(SelectorError::Empty),
            Some('#') => {
                self.advance();
                Ok(Selector::TestId(self.read_identifier()?))
            }
            Some('[') => self.parse_attribute(),
            Some(c) => Err(SelectorError::UnexpectedChar(c)),
        }
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '['

        let name = self.read_until_any(&['=', ']']);
        if name.is_empty() || self.peek_char() != Some('=') {
            return Err(SelectorError::InvalidAttribute);
        }
        self.advance(); // '='

        let quote = self.peek_char().filter(|c| *c == '\'' || *c == '"');
        if quote.is_some() {
            self.advance();
        }

        let value = self.read_until_any(&['\'', '"', ']']);

        if let Some(q) = quote {
            if self.peek_char() != Some(q) {
                return Err(SelectorError::UnclosedAttribute);
            }
            self.advance();
        }

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        match name.as_str() {
            "data-testid" => Ok(Selector::TestId(value)),
            "aria-label" => Ok(Selector::Name(value)),
            "role" => parse_role(&value).map(Selector::Role),
            _ => Err(SelectorError::UnknownAttribute(name)),
        }
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

fn parse_role(value: &str) -> Result<AccessibleRole, SelectorError> {
    match value.to_ascii_lowercase().as_str() {
        "generic" => Ok(AccessibleRole::Generic),
        "button" => Ok(AccessibleRole::Button),
        "checkbox" => Ok(AccessibleRole::Checkbox),
        "switch" => Ok(AccessibleRole::Switch),
        _ => Err(SelectorError::UnknownRole(value.to_string())),
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
    /// Attribute the harness cannot match on
    #[error("unknown attribute: '{0}'")]
    UnknownAttribute(String),
    /// Role name with no accessible role
    #[error("unknown role: '{0}'")]
    UnknownRole(String),
}
