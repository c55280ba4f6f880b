//! CLDR plural rules: compilation, sample validation and category selection.
//!
//! A rule such as `i % 10 = 2..4 and v = 0 @integer 2~4, 22~24, …` is split
//! into its relations and its sample clause. The relations compile into an
//! immutable [`Condition`] tree; the samples are expanded and every one of them
//! must satisfy the compiled condition.
//!
//! ```rust
//! use pocatalog::plural_rules::{PluralNumber, PluralRule};
//!
//! let rule = PluralRule::compile("n = 1 @integer 1 @decimal 1.0, 1.00")?.unwrap();
//! assert!(rule.evaluate(&PluralNumber::from(1u32)));
//! assert!(!rule.evaluate(&"1.5".parse::<PluralNumber>()?));
//! # Ok::<(), pocatalog::Error>(())
//! ```

pub mod compiler;
pub mod number;
pub mod operands;
pub mod samples;
pub mod tokenizer;

use std::fmt::{Display, Formatter};

pub use compiler::Condition;
pub use number::PluralNumber;
pub use operands::{Operand, Operands};

use crate::{error::Error, types::PluralCategory};

/// A compiled plural rule. Immutable and freely shareable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    source: String,
    condition: Condition,
}

impl PluralRule {
    /// Compiles a rule and checks it against its own samples.
    ///
    /// An empty string means "no rule" and yields `Ok(None)`. A rule with no
    /// relations before its samples holds for every number.
    pub fn compile(rule: &str) -> Result<Option<Self>, Error> {
        Self::compile_with(rule, true)
    }

    /// Compiles a rule, optionally skipping the sample conformance check.
    pub fn compile_with(rule: &str, validate_samples: bool) -> Result<Option<Self>, Error> {
        if rule.is_empty() {
            return Ok(None);
        }

        let (tokens, sample) = tokenizer::tokenize_rule(rule)?;
        let condition = compiler::compile(rule, &tokens)?;

        if validate_samples {
            samples::validate(&condition, sample, rule)?;
        }

        tracing::trace!(rule, tokens = tokens.len(), "compiled plural rule");

        Ok(Some(PluralRule {
            source: rule.to_string(),
            condition,
        }))
    }

    pub fn evaluate(&self, number: &PluralNumber) -> bool {
        self.condition.evaluate(&Operands::from(number))
    }

    /// The rule text this rule was compiled from, samples included.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

impl Display for PluralRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Up to five compiled rules, tried in the order zero, one, two, few, many.
///
/// `other` never has a rule: it is what remains when nothing else matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluralRuleSet {
    zero: Option<PluralRule>,
    one: Option<PluralRule>,
    two: Option<PluralRule>,
    few: Option<PluralRule>,
    many: Option<PluralRule>,
}

impl PluralRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles one rule text per category.
    ///
    /// Rules for `other` are compiled and validated but not kept. A later
    /// rule for the same category replaces an earlier one.
    pub fn compile<'a>(
        rules: impl IntoIterator<Item = (PluralCategory, &'a str)>,
        validate_samples: bool,
    ) -> Result<Self, Error> {
        let mut set = PluralRuleSet::new();
        for (category, text) in rules {
            let rule = PluralRule::compile_with(text, validate_samples)?;
            set = set.with_rule(category, rule);
        }
        Ok(set)
    }

    /// Returns a copy of this set with the rule for `category` replaced.
    pub fn with_rule(mut self, category: PluralCategory, rule: Option<PluralRule>) -> Self {
        match category {
            PluralCategory::Zero => self.zero = rule,
            PluralCategory::One => self.one = rule,
            PluralCategory::Two => self.two = rule,
            PluralCategory::Few => self.few = rule,
            PluralCategory::Many => self.many = rule,
            PluralCategory::Other => {}
        }
        self
    }

    pub fn rule(&self, category: PluralCategory) -> Option<&PluralRule> {
        match category {
            PluralCategory::Zero => self.zero.as_ref(),
            PluralCategory::One => self.one.as_ref(),
            PluralCategory::Two => self.two.as_ref(),
            PluralCategory::Few => self.few.as_ref(),
            PluralCategory::Many => self.many.as_ref(),
            PluralCategory::Other => None,
        }
    }

    /// Number of categories with a rule.
    pub fn len(&self) -> usize {
        self.rules().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rules(&self) -> impl Iterator<Item = (PluralCategory, &PluralRule)> {
        [
            (PluralCategory::Zero, &self.zero),
            (PluralCategory::One, &self.one),
            (PluralCategory::Two, &self.two),
            (PluralCategory::Few, &self.few),
            (PluralCategory::Many, &self.many),
        ]
        .into_iter()
        .filter_map(|(category, rule)| rule.as_ref().map(|rule| (category, rule)))
    }

    /// Picks the category for a number.
    pub fn evaluate(&self, number: impl Into<PluralNumber>) -> PluralCategory {
        let number = number.into();
        let operands = Operands::from(&number);
        self.rules()
            .find(|(_, rule)| rule.condition.evaluate(&operands))
            .map_or(PluralCategory::Other, |(category, _)| category)
    }
}
