//! Expansion of CLDR sample clauses and the conformance check against them.

use super::{
    compiler::Condition,
    number::PluralNumber,
    operands::Operands,
    tokenizer::{TokenKind, tokenize_samples},
};
use crate::error::Error;

/// Upper bound on the samples a single `low~high` range may expand to.
pub const MAX_RANGE_SAMPLES: u128 = 10_000;

/// Expands a sample clause into the concrete numbers it lists.
///
/// `low~high` yields `low` followed by every step up to `high` inclusive,
/// stepping by one unit of `high`'s last visible fraction digit: `4~6`
/// yields 4, 5, 6 and `0.1~0.3` yields 0.1, 0.2, 0.3.
pub fn expand_samples(sample: &str) -> Result<Vec<PluralNumber>, Error> {
    let syntax = |reason: &str| Error::plural_rule_syntax(sample, reason);

    let mut results = Vec::new();
    let mut low: Option<PluralNumber> = None;
    let mut in_range = false;

    for token in tokenize_samples(sample)? {
        match token.kind {
            TokenKind::Number => {
                let number = token
                    .text
                    .parse::<PluralNumber>()
                    .map_err(|_| syntax("invalid sample number"))?;

                if in_range {
                    let start = low.take().ok_or_else(|| syntax("range without a lower bound"))?;
                    expand_range(&start, &number, &mut results).map_err(|reason| syntax(&reason))?;
                    in_range = false;
                } else {
                    results.push(number);
                    low = Some(number);
                }
            }
            TokenKind::Range => {
                if in_range || low.is_none() {
                    return Err(syntax("range without a lower bound"));
                }
                in_range = true;
            }
            TokenKind::IntegerSample
            | TokenKind::DecimalSample
            | TokenKind::Comma
            | TokenKind::Ellipsis => {}
            other => {
                debug_assert!(false, "sample lexer produced {other}");
                return Err(syntax("unexpected token"));
            }
        }
    }

    if in_range {
        return Err(syntax("range without an upper bound"));
    }

    Ok(results)
}

fn expand_range(
    low: &PluralNumber,
    high: &PluralNumber,
    results: &mut Vec<PluralNumber>,
) -> Result<(), String> {
    let overflow = || format!("sample range {low}~{high} out of bounds");

    let scale = low.fraction_digits().max(high.fraction_digits());
    let step = 10u128
        .checked_pow(scale - high.fraction_digits())
        .ok_or_else(overflow)?;
    let start = low.scaled(scale).ok_or_else(overflow)?;
    let end = high.scaled(scale).ok_or_else(overflow)?;

    if end > start && (end - start) / step > MAX_RANGE_SAMPLES {
        return Err(format!(
            "sample range {low}~{high} expands to more than {MAX_RANGE_SAMPLES} samples"
        ));
    }

    let mut units = start + step;
    while units <= end {
        results.push(PluralNumber::from_scaled(units, scale).ok_or_else(overflow)?);
        units += step;
    }

    Ok(())
}

/// Checks that `condition` holds for every sample in the clause.
///
/// All failing samples are reported together.
pub fn validate(condition: &Condition, sample: &str, rule: &str) -> Result<(), Error> {
    let invalid_samples: Vec<PluralNumber> = expand_samples(sample)?
        .into_iter()
        .filter(|number| !condition.evaluate(&Operands::from(number)))
        .collect();

    if invalid_samples.is_empty() {
        Ok(())
    } else {
        Err(Error::PluralRuleValidation {
            rule: rule.to_string(),
            invalid_samples,
        })
    }
}
