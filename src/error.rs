//! All error types for the pocatalog crate.
//!
//! Catalog parsing is all-or-nothing: the first error aborts the whole
//! parse, and each variant carries enough position to point at the input.

use thiserror::Error;

use crate::plural_rules::PluralNumber;

#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: {source}")]
    LineSyntax {
        line: usize,
        #[source]
        source: LineSyntaxError,
    },

    #[error("entry starting at line {line}: {issue}")]
    EntryStructure { line: usize, issue: EntryIssue },

    #[error("line {line}: {issue}")]
    DocumentStructure { line: usize, issue: DocumentIssue },

    #[error("invalid plural rule `{rule}`: {reason}")]
    PluralRuleSyntax { rule: String, reason: String },

    #[error(
        "plural rule `{rule}` failed sample validation; invalid samples: {}",
        join_samples(.invalid_samples)
    )]
    PluralRuleValidation {
        rule: String,
        invalid_samples: Vec<PluralNumber>,
    },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unrecognized language tag `{0}`")]
    UnrecognizedTag(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new plural rule syntax error.
    pub fn plural_rule_syntax(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::PluralRuleSyntax {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}

fn join_samples(samples: &[PluralNumber]) -> String {
    samples
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A physical line that matches none of the permitted line shapes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} in `{text}`")]
pub struct LineSyntaxError {
    pub reason: String,
    pub text: String,
}

impl LineSyntaxError {
    pub(crate) fn new(reason: impl Into<String>, text: impl Into<String>) -> Self {
        LineSyntaxError {
            reason: reason.into(),
            text: text.into(),
        }
    }
}

/// Why a run of lines could not be assembled into an entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryIssue {
    #[error("keyword `{0}` has already appeared in a prior line")]
    RepeatedKeyword(String),

    #[error("duplicate plural index {0}")]
    DuplicatePluralIndex(usize),

    #[error("expected {expected} plural values based on the highest index, found {found}")]
    PluralIndexGap { expected: usize, found: usize },

    #[error("plural id provided, but no plural values found")]
    PluralIdWithoutValues,

    #[error("plural values provided, but no plural id found")]
    PluralValuesWithoutId,

    #[error("string-only line without a prior keyworded line: `{0}`")]
    OrphanValue(String),

    #[error("entry mixes obsolete and non-obsolete lines")]
    MixedObsolete,

    #[error("unsupported keywords: {}", .0.join(", "))]
    UnsupportedKeywords(Vec<String>),
}

/// Structural problems spanning more than one entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentIssue {
    #[error("the first entry of a catalog must be a header with a blank msgid")]
    MissingHeader,

    #[error("the header must not have a msgctxt")]
    ContextualHeader,

    #[error("the header must have a blank msgid, found `{0}`")]
    HeaderIdNotBlank(String),

    #[error("the header must not be obsolete")]
    ObsoleteHeader,

    #[error("two consecutive msgctxt lines without a msgid between them")]
    ConsecutiveContexts,

    #[error("msgctxt without a following msgid")]
    DanglingContext,

    #[error("duplicate entry {0}")]
    DuplicateEntry(String),
}
