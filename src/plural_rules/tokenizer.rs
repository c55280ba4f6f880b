//! Lexers for plural rule expressions and their sample clauses.

use std::fmt::{Display, Formatter};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OperandName,
    And,
    Or,
    Equals,
    NotEquals,
    Modulus,
    Comma,
    /// `..` in rules, `~` in samples.
    Range,
    Number,

    // Sample clauses only.
    IntegerSample,
    DecimalSample,
    Ellipsis,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokenKind::OperandName => "operand",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Equals => "`=`",
            TokenKind::NotEquals => "`!=`",
            TokenKind::Modulus => "`%`",
            TokenKind::Comma => "`,`",
            TokenKind::Range => "range",
            TokenKind::Number => "number",
            TokenKind::IntegerSample => "`@integer`",
            TokenKind::DecimalSample => "`@decimal`",
            TokenKind::Ellipsis => "ellipsis",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Scanner { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.source[start..self.pos]
    }

    /// Digits with an optional `.digits` fraction. `1..2` lexes as `1`.
    fn number(&mut self) -> &'a str {
        let start = self.pos;
        self.take_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.take_while(|c| c.is_ascii_digit());
        }
        &self.source[start..self.pos]
    }
}

/// Splits a rule into its relation tokens and the sample clause starting at `@`.
pub fn tokenize_rule(rule: &str) -> Result<(Vec<Token>, &str), Error> {
    let mut scanner = Scanner::new(rule);
    let mut tokens = Vec::new();
    let syntax = |reason: String| Error::plural_rule_syntax(rule, reason);

    while let Some(c) = scanner.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                scanner.bump();
                continue;
            }
            '@' => break,
            '0'..='9' => Token::new(TokenKind::Number, scanner.number()),
            '%' => {
                scanner.bump();
                Token::new(TokenKind::Modulus, "%")
            }
            ',' => {
                scanner.bump();
                Token::new(TokenKind::Comma, ",")
            }
            '=' => {
                scanner.bump();
                Token::new(TokenKind::Equals, "=")
            }
            '!' if scanner.eat("!=") => Token::new(TokenKind::NotEquals, "!="),
            '.' if scanner.eat("..") => Token::new(TokenKind::Range, ".."),
            c if c.is_alphabetic() => {
                let word = scanner.take_while(char::is_alphabetic);
                match word {
                    "and" => Token::new(TokenKind::And, word),
                    "or" => Token::new(TokenKind::Or, word),
                    "n" | "i" | "v" | "w" | "f" | "t" | "c" | "e" => {
                        Token::new(TokenKind::OperandName, word)
                    }
                    _ => return Err(syntax(format!("unknown identifier `{word}`"))),
                }
            }
            other => return Err(syntax(format!("unexpected character `{other}`"))),
        };
        tokens.push(token);
    }

    Ok((tokens, scanner.rest()))
}

/// Lexes an `@integer ... @decimal ...` sample clause.
///
/// Numbers written in compact exponent notation (`1c6`, `1.1e3`) are dropped
/// entirely since the `c` and `e` operands are not supported.
pub fn tokenize_samples(sample: &str) -> Result<Vec<Token>, Error> {
    let mut scanner = Scanner::new(sample);
    let mut tokens: Vec<Token> = Vec::new();
    let mut skip_exponent = false;
    let syntax = |reason: String| Error::plural_rule_syntax(sample, reason);

    while let Some(c) = scanner.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                scanner.bump();
                continue;
            }
            '0'..='9' => {
                let number = scanner.number();
                if skip_exponent {
                    skip_exponent = false;
                    continue;
                }
                Token::new(TokenKind::Number, number)
            }
            'c' | 'e' => {
                scanner.bump();
                let follows_number = tokens.last().is_some_and(|t| t.kind == TokenKind::Number);
                if !follows_number || !scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(syntax(format!("misplaced exponent marker `{c}`")));
                }
                tokens.pop();
                skip_exponent = true;
                continue;
            }
            '~' => {
                scanner.bump();
                Token::new(TokenKind::Range, "~")
            }
            ',' => {
                scanner.bump();
                Token::new(TokenKind::Comma, ",")
            }
            '…' => {
                scanner.bump();
                Token::new(TokenKind::Ellipsis, "…")
            }
            '.' if scanner.eat("...") => Token::new(TokenKind::Ellipsis, "..."),
            '@' => {
                if scanner.eat("@integer") {
                    Token::new(TokenKind::IntegerSample, "@integer")
                } else if scanner.eat("@decimal") {
                    Token::new(TokenKind::DecimalSample, "@decimal")
                } else {
                    return Err(syntax("unknown sample marker".to_string()));
                }
            }
            other => return Err(syntax(format!("unexpected character `{other}`"))),
        };
        tokens.push(token);
    }

    Ok(tokens)
}
