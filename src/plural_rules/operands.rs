//! CLDR plural operands derived from a number as written.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use super::number::PluralNumber;

/// The named quantities a plural rule may test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Absolute value.
    N,
    /// Integer digits.
    I,
    /// Count of visible fraction digits, with trailing zeros.
    V,
    /// Count of visible fraction digits, without trailing zeros.
    W,
    /// Visible fraction digits, with trailing zeros.
    F,
    /// Visible fraction digits, without trailing zeros.
    T,
    /// Compact decimal exponent. Unsupported, always zero.
    C,
    /// Deprecated synonym of `c`. Unsupported, always zero.
    E,
}

impl FromStr for Operand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Operand::N),
            "i" => Ok(Operand::I),
            "v" => Ok(Operand::V),
            "w" => Ok(Operand::W),
            "f" => Ok(Operand::F),
            "t" => Ok(Operand::T),
            "c" => Ok(Operand::C),
            "e" => Ok(Operand::E),
            _ => Err(format!("unknown operand `{s}`")),
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operand::N => "n",
            Operand::I => "i",
            Operand::V => "v",
            Operand::W => "w",
            Operand::F => "f",
            Operand::T => "t",
            Operand::C => "c",
            Operand::E => "e",
        };
        write!(f, "{name}")
    }
}

/// Operand values for one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
    pub n: PluralNumber,
    pub i: u64,
    pub v: u64,
    pub w: u64,
    pub f: u64,
    pub t: u64,
    pub c: u64,
    pub e: u64,
}

impl Operands {
    pub fn get(&self, operand: Operand) -> PluralNumber {
        match operand {
            Operand::N => self.n,
            Operand::I => self.i.into(),
            Operand::V => self.v.into(),
            Operand::W => self.w.into(),
            Operand::F => self.f.into(),
            Operand::T => self.t.into(),
            Operand::C => self.c.into(),
            Operand::E => self.e.into(),
        }
    }
}

impl From<&PluralNumber> for Operands {
    fn from(number: &PluralNumber) -> Self {
        let v = number.fraction_digits();
        let f = number.fraction_part();

        let mut t = f;
        let mut w = v;
        while w > 0 && t % 10 == 0 {
            t /= 10;
            w -= 1;
        }

        Operands {
            n: number.abs(),
            i: number.integer_part(),
            v: u64::from(v),
            w: u64::from(w),
            f,
            t,
            c: 0,
            e: 0,
        }
    }
}
