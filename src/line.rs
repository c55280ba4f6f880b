//! Physical lines of a PO catalog.
//!
//! A line is an optional `keyword[index]`, an optional `"value"` and an
//! optional `#comment`, in that order, separated by whitespace. Comments
//! whose first character is [`OBSOLETE_MARKER`] hold an obsolete line, which
//! is lexed again (without the marker) when the line is parsed.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::{error::LineSyntaxError, escape};

/// First comment character marking an obsolete source line (`#~ msgid "..."`).
pub const OBSOLETE_MARKER: char = '~';

/// A keyword such as `msgid` or an indexed one such as `msgstr[1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Keyword {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl Keyword {
    pub fn simple(name: impl Into<String>) -> Self {
        Keyword {
            name: name.into(),
            index: None,
        }
    }

    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Keyword {
            name: name.into(),
            index: Some(index),
        }
    }

    fn is_name_char(c: char) -> bool {
        !c.is_whitespace() && c != '[' && c != '"' && c != '#'
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A quoted string payload, kept both as written and unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineValue {
    raw: String,
    value: String,
}

impl LineValue {
    /// Builds a value from the raw text found between the quotes.
    pub fn from_raw(raw: impl Into<String>) -> Result<Self, LineSyntaxError> {
        let raw = raw.into();
        let value = escape::unescape(&raw).map_err(|reason| LineSyntaxError::new(reason, &raw))?;
        Ok(LineValue { raw, value })
    }

    /// Builds a value from its unescaped text.
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        LineValue {
            raw: escape::escape(&value),
            value,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One physical line of a catalog. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    keyword: Option<Keyword>,
    value: Option<LineValue>,
    comment: Option<String>,
    raw: String,
    #[serde(skip)]
    obsolete: Option<Box<Line>>,
}

impl Line {
    /// Parses one physical line.
    pub fn parse(text: &str) -> Result<Self, LineSyntaxError> {
        let mut cursor = Cursor::new(text);

        cursor.skip_whitespace();
        let keyword = match cursor.peek() {
            Some(c) if Keyword::is_name_char(c) => Some(cursor.keyword()?),
            _ => None,
        };

        cursor.skip_whitespace();
        let value = match cursor.peek() {
            Some('"') => Some(cursor.quoted()?),
            _ => None,
        };

        cursor.skip_whitespace();
        let comment = match cursor.peek() {
            Some('#') => Some(cursor.rest_after_hash()),
            Some(_) => return Err(cursor.error("unexpected trailing text")),
            None => None,
        };

        Self::assemble(keyword, value, comment, text.to_string())
    }

    /// Builds the canonical line for the given parts.
    ///
    /// Parts are joined by single spaces; parsing the result yields the same
    /// parts again.
    pub fn compose(
        keyword: Option<Keyword>,
        value: Option<LineValue>,
        comment: Option<String>,
    ) -> Result<Self, LineSyntaxError> {
        let raw = render(keyword.as_ref(), value.as_ref(), comment.as_deref());
        if let Some(keyword) = &keyword {
            if keyword.name.is_empty() || !keyword.name.chars().all(Keyword::is_name_char) {
                return Err(LineSyntaxError::new("invalid keyword name", raw));
            }
        }
        Self::assemble(keyword, value, comment, raw)
    }

    fn assemble(
        keyword: Option<Keyword>,
        value: Option<LineValue>,
        comment: Option<String>,
        raw: String,
    ) -> Result<Self, LineSyntaxError> {
        let obsolete = match comment.as_deref() {
            Some(text) if keyword.is_none() && value.is_none() => {
                match text.strip_prefix(OBSOLETE_MARKER) {
                    // `#~|` previous-msgid lines stay comments.
                    Some(inner) if inner.trim_start().starts_with('|') => {
                        Some(Box::new(Line::previous_comment(inner)))
                    }
                    Some(inner) => Some(Box::new(Line::parse(inner)?)),
                    None => None,
                }
            }
            _ => None,
        };

        Ok(Line {
            keyword,
            value,
            comment,
            raw,
            obsolete,
        })
    }

    fn previous_comment(inner: &str) -> Self {
        Line {
            keyword: None,
            value: None,
            comment: Some(inner.trim_start().to_string()),
            raw: inner.to_string(),
            obsolete: None,
        }
    }

    pub fn keyword(&self) -> Option<&Keyword> {
        self.keyword.as_ref()
    }

    pub fn value(&self) -> Option<&LineValue> {
        self.value.as_ref()
    }

    /// Comment text after the `#`, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The line exactly as it appeared in the source.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_comment_or_whitespace(&self) -> bool {
        self.keyword.is_none() && self.value.is_none()
    }

    pub fn is_whitespace(&self) -> bool {
        self.is_comment_or_whitespace() && self.comment.is_none()
    }

    pub fn is_comment(&self) -> bool {
        self.is_comment_or_whitespace() && self.comment.is_some()
    }

    pub fn is_marked_obsolete(&self) -> bool {
        self.obsolete.is_some()
    }

    /// The line used for classification: the line behind the obsolete
    /// marker for obsolete lines, the line itself otherwise.
    pub fn logical(&self) -> &Line {
        self.obsolete.as_deref().unwrap_or(self)
    }

    pub fn has_keyword(&self, name: &str) -> bool {
        self.keyword
            .as_ref()
            .is_some_and(|k| k.index.is_none() && k.name == name)
    }

    /// Canonical text rebuilt from the parsed parts.
    pub fn recompose(&self) -> String {
        render(
            self.keyword.as_ref(),
            self.value.as_ref(),
            self.comment.as_deref(),
        )
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn render(keyword: Option<&Keyword>, value: Option<&LineValue>, comment: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(keyword) = keyword {
        parts.push(keyword.to_string());
    }
    if let Some(value) = value {
        parts.push(format!("\"{}\"", value.raw));
    }
    if let Some(comment) = comment {
        parts.push(format!("#{comment}"));
    }
    parts.join(" ")
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.text[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn error(&self, reason: &str) -> LineSyntaxError {
        LineSyntaxError::new(reason, self.text)
    }

    fn keyword(&mut self) -> Result<Keyword, LineSyntaxError> {
        let name = self.take_while(Keyword::is_name_char).to_string();

        self.skip_whitespace();
        if self.peek() != Some('[') {
            return Ok(Keyword::simple(name));
        }
        self.bump();

        let digits = self.take_while(|c| c.is_ascii_digit());
        if self.bump() != Some(']') || digits.is_empty() {
            return Err(self.error("malformed keyword index"));
        }
        let index = digits
            .parse()
            .map_err(|_| self.error("keyword index out of range"))?;

        Ok(Keyword::indexed(name, index))
    }

    fn quoted(&mut self) -> Result<LineValue, LineSyntaxError> {
        self.bump();
        let start = self.pos;
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(self.error("unterminated string"));
                    }
                }
                Some(_) => {}
                None => return Err(self.error("unterminated string")),
            }
        }
        let raw = &self.text[start..self.pos - 1];
        LineValue::from_raw(raw).map_err(|e| LineSyntaxError::new(e.reason, self.text))
    }

    fn rest_after_hash(&mut self) -> String {
        self.bump();
        let comment = self.rest().to_string();
        self.pos = self.text.len();
        comment
    }
}
