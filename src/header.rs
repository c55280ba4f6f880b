//! The catalog header: metadata fields, language and plural rules.

use lazy_static::lazy_static;
use regex::Regex;
use unic_langid::LanguageIdentifier;

use crate::{
    entry::Entry,
    error::Error,
    locale::normalize_language_tag,
    options::ParseOptions,
    plural_rules::{PluralNumber, PluralRuleSet},
    types::PluralCategory,
};

lazy_static! {
    static ref LANGUAGE_REGEX: Regex = Regex::new(r"(?im)^Language:[ \t]*(.*)$").unwrap();
    static ref PLURAL_RULE_REGEX: Regex =
        Regex::new(r"(?im)^X-PluralRules-([a-z]+):[ \t]*(.*)$").unwrap();
}

/// Metadata derived from the header entry's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    language: LanguageIdentifier,
    raw_language: Option<String>,
    fields: Vec<(String, String)>,
    plural_rules: PluralRuleSet,
}

impl Header {
    /// Derives the header from the catalog's first entry.
    ///
    /// The entry's value is a block of `Key: value` lines. `Language:` is
    /// required unless `options` carries a language hint.
    pub fn from_entry(entry: &Entry, options: &ParseOptions) -> Result<Self, Error> {
        let text = entry.value();

        let raw_language = LANGUAGE_REGEX
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|raw| !raw.is_empty());

        let language = match (&raw_language, &options.language_hint) {
            (Some(raw), _) => normalize_language_tag(raw)?,
            (None, Some(hint)) => normalize_language_tag(hint)?,
            (None, None) => {
                return Err(Error::InvalidHeader(
                    "header has no `Language:` field".to_string(),
                ));
            }
        };

        let mut rules = Vec::new();
        for caps in PLURAL_RULE_REGEX.captures_iter(text) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let rule = caps.get(2).map_or("", |m| m.as_str().trim_end());
            match name.parse::<PluralCategory>() {
                Ok(category) => rules.push((category, rule)),
                Err(_) => tracing::warn!(category = name, "ignoring unknown plural rule category"),
            }
        }
        let plural_rules = PluralRuleSet::compile(rules, options.validate_plural_samples)?;

        tracing::debug!(
            language = %language,
            plural_rules = plural_rules.len(),
            "derived catalog header"
        );

        Ok(Header {
            language,
            raw_language,
            fields: parse_fields(text),
            plural_rules,
        })
    }

    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    /// The `Language:` value as written, or `None` when the hint was used.
    pub fn raw_language(&self) -> Option<&str> {
        self.raw_language.as_deref()
    }

    /// Every `Key: value` line of the header, in order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First field with the given key, compared case-insensitively.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn plural_rules(&self) -> &PluralRuleSet {
        &self.plural_rules
    }

    /// Shorthand for `self.plural_rules().evaluate(number)`.
    pub fn plural_category(&self, number: impl Into<PluralNumber>) -> PluralCategory {
        self.plural_rules.evaluate(number)
    }
}

fn parse_fields(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;

    fn header_entry(value: &str) -> Entry {
        let lines = vec![
            Line::parse(r#"msgid """#).unwrap(),
            Line::parse(r#"msgstr """#).unwrap(),
        ]
        .into_iter()
        .chain(value.lines().map(|l| {
            Line::parse(&format!("\"{}\\n\"", crate::escape::escape(l))).unwrap()
        }))
        .collect();
        Entry::from_lines(lines).unwrap()
    }

    fn header(value: &str) -> Result<Header, Error> {
        Header::from_entry(&header_entry(value), &ParseOptions::new())
    }

    #[test]
    fn test_language_and_fields() {
        let header = header("Project-Id-Version: demo 1.0\nLanguage: pt_BR\nContent-Type: text/plain; charset=UTF-8").unwrap();
        assert_eq!(header.language().to_string(), "pt-BR");
        assert_eq!(header.raw_language(), Some("pt_BR"));
        assert_eq!(header.fields().len(), 3);
        assert_eq!(header.fields()[0].0, "Project-Id-Version");
        assert_eq!(header.field("content-type"), Some("text/plain; charset=UTF-8"));
        assert!(header.plural_rules().is_empty());
    }

    #[test]
    fn test_missing_language() {
        assert!(matches!(
            header("Project-Id-Version: demo"),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_language_hint_fills_missing_language() {
        let options = ParseOptions::new().with_language_hint(Some("fr_CA".to_string()));
        let header = Header::from_entry(&header_entry("Project-Id-Version: demo"), &options).unwrap();
        assert_eq!(header.language().to_string(), "fr-CA");
        assert_eq!(header.raw_language(), None);
    }

    #[test]
    fn test_plural_rule_keys_are_case_insensitive() {
        let header = header("Language: en\nx-pluralrules-ONE: i = 1 and v = 0 @integer 1\nX-PluralRules-Other: @integer 0, 2~16").unwrap();
        assert_eq!(header.plural_rules().len(), 1);
        assert_eq!(header.plural_category(1u32), PluralCategory::One);
        assert_eq!(header.plural_category(2u32), PluralCategory::Other);
    }

    #[test]
    fn test_unknown_plural_category_is_ignored() {
        let header = header("Language: en\nX-PluralRules-Several: n = 7").unwrap();
        assert!(header.plural_rules().is_empty());
    }

    #[test]
    fn test_later_rule_replaces_earlier() {
        let header = header("Language: en\nX-PluralRules-One: n = 2\nX-PluralRules-One: n = 1").unwrap();
        assert_eq!(header.plural_category(1u32), PluralCategory::One);
        assert_eq!(header.plural_category(2u32), PluralCategory::Other);
    }

    #[test]
    fn test_invalid_rule_fails_header() {
        assert!(matches!(
            header("Language: en\nX-PluralRules-One: n = 1 @integer 1, 2"),
            Err(Error::PluralRuleValidation { .. })
        ));
        assert!(matches!(
            header("Language: en\nX-PluralRules-One: n ="),
            Err(Error::PluralRuleSyntax { .. })
        ));
    }
}
