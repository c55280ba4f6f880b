#![forbid(unsafe_code)]
//! Gettext PO catalog parser with a CLDR plural-rule compiler and evaluator.
//!
//! Parses `.po` catalogs into an immutable [`Document`] of [`Entry`] values,
//! keeping every source line so a catalog can be written back unchanged.
//! The header's `X-PluralRules-*` fields compile into a [`PluralRuleSet`]
//! that picks the plural category for a number.
//!
//! # Quick Start
//!
//! ```rust
//! use pocatalog::{Document, PluralCategory};
//!
//! let document = Document::parse(r#"
//! msgid ""
//! msgstr ""
//! "Language: uk\n"
//! "X-PluralRules-One: v = 0 and i % 10 = 1 and i % 100 != 11 @integer 1, 21, 31\n"
//!
//! #, c-format
//! msgid "%d file"
//! msgid_plural "%d files"
//! msgstr[0] "%d файл"
//! msgstr[1] "%d файли"
//! msgstr[2] "%d файлів"
//! "#)?;
//!
//! let entry = &document.messages()[0];
//! assert_eq!(entry.plural_id(), Some("%d files"));
//! assert!(entry.header().flags.contains(&"c-format".to_string()));
//! assert_eq!(document.header().plural_category(21u32), PluralCategory::One);
//! # Ok::<(), pocatalog::Error>(())
//! ```
//!
//! # Features
//!
//! - Strict line lexer with a C-style escape codec
//! - Entry assembly with multi-line strings, contexts, plurals and obsolete (`#~`) entries
//! - Comment blocks attached to the right entry, duplicate entries rejected
//! - CLDR plural rules compiled to an expression tree and checked against their own samples
//! - Gettext locale names such as `sr_RS@latin` normalized to BCP 47

pub mod document;
pub mod entry;
pub mod error;
pub mod escape;
pub mod header;
pub mod line;
pub mod locale;
pub mod options;
pub mod plural_rules;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    document::Document,
    entry::{Entry, EntryHeader, EntryKey},
    error::{DocumentIssue, EntryIssue, Error, LineSyntaxError},
    header::Header,
    line::{Keyword, Line, LineValue},
    options::ParseOptions,
    plural_rules::{PluralNumber, PluralRule, PluralRuleSet},
    traits::Parser,
    types::PluralCategory,
};
