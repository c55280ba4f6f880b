//! Recursive-descent compiler from rule tokens to a condition tree.
//!
//! ```text
//! rule      := and_chain ( "or" and_chain )*
//! and_chain := relation ( "and" relation )*
//! relation  := accessor ( "=" | "!=" ) range ( "," range )*
//! range     := number [ ".." number ]
//! accessor  := operand [ "%" number ]
//! ```

use super::{
    number::PluralNumber,
    operands::{Operand, Operands},
    tokenizer::{Token, TokenKind},
};
use crate::error::Error;

/// An evaluable plural condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// A rule without relations, as used by sample-only declarations.
    Always,
    Or(Vec<Condition>),
    And(Vec<Condition>),
    Relation(Relation),
}

impl Condition {
    pub fn evaluate(&self, operands: &Operands) -> bool {
        match self {
            Condition::Always => true,
            Condition::Or(conditions) => conditions.iter().any(|c| c.evaluate(operands)),
            Condition::And(conditions) => conditions.iter().all(|c| c.evaluate(operands)),
            Condition::Relation(relation) => relation.evaluate(operands),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    pub operand: Operand,
    pub modulus: Option<u64>,
}

impl Accessor {
    fn extract(&self, operands: &Operands) -> PluralNumber {
        let value = operands.get(self.operand);
        match self.modulus {
            Some(modulus) => value.rem_integer(modulus),
            None => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
}

/// Inclusive range; `low == high` for a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub low: PluralNumber,
    pub high: PluralNumber,
}

impl Bounds {
    fn contains(&self, value: &PluralNumber) -> bool {
        self.low <= *value && *value <= self.high
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub accessor: Accessor,
    pub operator: Operator,
    pub bounds: Vec<Bounds>,
}

impl Relation {
    /// The operator applies to each range before the ranges are OR-ed, so
    /// `n != 1, 2` holds whenever `n` differs from either value.
    fn evaluate(&self, operands: &Operands) -> bool {
        let value = self.accessor.extract(operands);
        self.bounds.iter().any(|bounds| {
            let hit = bounds.contains(&value);
            match self.operator {
                Operator::Equals => hit,
                Operator::NotEquals => !hit,
            }
        })
    }
}

/// Compiles relation tokens into a condition tree.
pub fn compile(rule: &str, tokens: &[Token]) -> Result<Condition, Error> {
    if tokens.is_empty() {
        return Ok(Condition::Always);
    }

    let mut parser = RuleParser {
        rule,
        tokens,
        cursor: 0,
    };
    let condition = parser.rule()?;

    if let Some(token) = parser.peek() {
        return Err(parser.error(format!("unexpected leftover token `{}`", token.text)));
    }

    Ok(condition)
}

struct RuleParser<'a> {
    rule: &'a str,
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> RuleParser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn error(&self, reason: String) -> Error {
        Error::plural_rule_syntax(self.rule, reason)
    }

    fn accept(&mut self, kind: TokenKind) -> Option<&'a Token> {
        let token = self.peek().filter(|t| t.kind == kind)?;
        self.cursor += 1;
        Some(token)
    }

    fn expect(&mut self, kinds: &[TokenKind]) -> Result<&'a Token, Error> {
        match self.peek() {
            Some(token) if kinds.contains(&token.kind) => {
                self.cursor += 1;
                Ok(token)
            }
            found => {
                let expected = kinds
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ");
                let found = found.map_or("end of rule".to_string(), |t| format!("`{}`", t.text));
                Err(self.error(format!("expected {expected}, found {found}")))
            }
        }
    }

    fn rule(&mut self) -> Result<Condition, Error> {
        let mut chains = vec![self.and_chain()?];
        while self.accept(TokenKind::Or).is_some() {
            chains.push(self.and_chain()?);
        }
        Ok(flatten(chains, Condition::Or))
    }

    fn and_chain(&mut self) -> Result<Condition, Error> {
        let mut relations = vec![self.relation()?];
        while self.accept(TokenKind::And).is_some() {
            relations.push(self.relation()?);
        }
        Ok(flatten(relations, Condition::And))
    }

    fn relation(&mut self) -> Result<Condition, Error> {
        let accessor = self.accessor()?;
        let operator = match self.expect(&[TokenKind::Equals, TokenKind::NotEquals])?.kind {
            TokenKind::Equals => Operator::Equals,
            _ => Operator::NotEquals,
        };

        let mut bounds = vec![self.bounds()?];
        while self.accept(TokenKind::Comma).is_some() {
            bounds.push(self.bounds()?);
        }

        Ok(Condition::Relation(Relation {
            accessor,
            operator,
            bounds,
        }))
    }

    fn bounds(&mut self) -> Result<Bounds, Error> {
        let low = self.number()?;
        let high = match self.accept(TokenKind::Range) {
            Some(_) => self.number()?,
            None => low,
        };
        Ok(Bounds { low, high })
    }

    fn accessor(&mut self) -> Result<Accessor, Error> {
        let name = self.expect(&[TokenKind::OperandName])?;
        let operand = name.text.parse::<Operand>().map_err(|e| self.error(e))?;

        let modulus = match self.accept(TokenKind::Modulus) {
            Some(_) => {
                let number = self.number()?;
                if number.fraction_digits() > 0 || number.is_zero() {
                    return Err(self.error(format!("modulus `{number}` is not a positive integer")));
                }
                Some(number.integer_part())
            }
            None => None,
        };

        Ok(Accessor { operand, modulus })
    }

    fn number(&mut self) -> Result<PluralNumber, Error> {
        let token = self.expect(&[TokenKind::Number])?;
        token
            .text
            .parse()
            .map_err(|_| self.error(format!("invalid number `{}`", token.text)))
    }
}

fn flatten(mut conditions: Vec<Condition>, combine: fn(Vec<Condition>) -> Condition) -> Condition {
    if conditions.len() == 1 {
        conditions.remove(0)
    } else {
        combine(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plural_rules::tokenizer::tokenize_rule;

    fn compiled(rule: &str) -> Condition {
        let (tokens, _) = tokenize_rule(rule).unwrap();
        compile(rule, &tokens).unwrap()
    }

    fn holds(condition: &Condition, number: &str) -> bool {
        condition.evaluate(&Operands::from(&number.parse::<PluralNumber>().unwrap()))
    }

    #[test]
    fn test_builds_expression_tree() {
        let condition = compiled("n = 1 or i % 10 = 2..4 and v = 0");
        let Condition::Or(chains) = &condition else {
            panic!("expected an or node, got {condition:?}");
        };
        assert_eq!(chains.len(), 2);
        assert!(matches!(&chains[0], Condition::Relation(_)));
        let Condition::And(relations) = &chains[1] else {
            panic!("expected an and node");
        };
        let Condition::Relation(relation) = &relations[0] else {
            panic!("expected a relation");
        };
        assert_eq!(relation.accessor.operand, Operand::I);
        assert_eq!(relation.accessor.modulus, Some(10));
        assert_eq!(relation.bounds.len(), 1);
    }

    #[test]
    fn test_empty_tokens_always_hold() {
        let condition = compile("", &[]).unwrap();
        assert_eq!(condition, Condition::Always);
        assert!(holds(&condition, "12345.678"));
    }

    #[test]
    fn test_equality_and_ranges() {
        let condition = compiled("n % 10 = 2..4 and n % 100 != 12..14");
        assert!(holds(&condition, "22"));
        assert!(holds(&condition, "3"));
        assert!(!holds(&condition, "14"));
        assert!(!holds(&condition, "5"));
    }

    #[test]
    fn test_ranges_are_continuous_on_n() {
        let condition = compiled("n = 2..4");
        assert!(holds(&condition, "2.5"));
        assert!(holds(&condition, "4.0"));
        assert!(!holds(&condition, "4.1"));
    }

    #[test]
    fn test_not_equals_list_ors_each_negation() {
        let condition = compiled("n != 1,2");
        assert!(holds(&condition, "1"));
        assert!(holds(&condition, "2"));
        assert!(holds(&condition, "3"));
    }

    #[test]
    fn test_fraction_operands() {
        let condition = compiled("v = 0 and i = 1");
        assert!(holds(&condition, "1"));
        assert!(!holds(&condition, "1.0"));

        let condition = compiled("w = 1 and t = 5");
        assert!(holds(&condition, "0.50"));
        assert!(!holds(&condition, "0.05"));
    }

    #[test]
    fn test_syntax_errors() {
        for rule in ["n", "n =", "n = 1 and", "= 1", "n % = 1", "n = 1 2", "n % 0 = 1", "n % 1.5 = 1"] {
            let (tokens, _) = tokenize_rule(rule).unwrap();
            let result = compile(rule, &tokens);
            assert!(
                matches!(result, Err(Error::PluralRuleSyntax { .. })),
                "{rule}: {result:?}"
            );
        }
    }
}
