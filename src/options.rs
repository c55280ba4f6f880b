//! Options controlling how a catalog is parsed into a [`crate::Document`].

/// Parse behavior options for [`crate::Document::parse_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Language used when the header carries no `Language:` field.
    pub language_hint: Option<String>,
    /// Whether `X-PluralRules-*` rules must satisfy their own samples.
    pub validate_plural_samples: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            language_hint: None,
            validate_plural_samples: true,
        }
    }
}

impl ParseOptions {
    /// Creates default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a language hint.
    pub fn with_language_hint(mut self, language_hint: Option<String>) -> Self {
        self.language_hint = language_hint;
        self
    }

    /// Enables/disables the plural rule sample check.
    pub fn with_plural_sample_validation(mut self, validate: bool) -> Self {
        self.validate_plural_samples = validate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::new();
        assert_eq!(options.language_hint, None);
        assert!(options.validate_plural_samples);
    }

    #[test]
    fn test_builder() {
        let options = ParseOptions::new()
            .with_language_hint(Some("fr".to_string()))
            .with_plural_sample_validation(false);
        assert_eq!(options.language_hint.as_deref(), Some("fr"));
        assert!(!options.validate_plural_samples);
    }
}
