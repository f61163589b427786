//! Exact rational arithmetic for economic quantities.
//!
//! Every quantity the simulation accounts for -- time deltas, velocities,
//! inventory, costs, completion fractions -- is a [`Rational`]. The inventory
//! accumulates over many small mining steps, so the arithmetic must be exact:
//! a float accumulator would drift, and the "amount actually removed" contract
//! of [`crate::resource::Resource::mine`] relies on equality checks that only
//! hold for exact fractions.
//!
//! Values are always stored in lowest terms with a positive denominator and
//! zero canonicalized to `0/1`, so structural equality is value equality.
//! Intermediate arithmetic runs in `i128` before reduction; cross-products of
//! in-range values cannot wrap.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A zero denominator was supplied to [`Rational::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rational denominator must be nonzero")]
pub struct InvalidRational;

/// An exact fraction. Immutable -- every operation returns a new normalized
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Construct `numerator / denominator`, reduced to lowest terms with the
    /// sign pushed to the numerator. A zero denominator is a precondition
    /// violation and fails with [`InvalidRational`].
    pub const fn new(numerator: i64, denominator: i64) -> Result<Self, InvalidRational> {
        if denominator == 0 {
            return Err(InvalidRational);
        }
        if numerator == 0 {
            return Ok(Self::ZERO);
        }
        let negative = (numerator < 0) != (denominator < 0);
        let n = numerator.unsigned_abs() as u128;
        let d = denominator.unsigned_abs() as u128;
        let g = gcd(n, d);
        let n = (n / g) as i64;
        let d = (d / g) as i64;
        Ok(Self {
            numerator: if negative { -n } else { n },
            denominator: d,
        })
    }

    pub const fn from_int(value: i64) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    pub const fn numerator(self) -> i64 {
        self.numerator
    }

    /// Always positive.
    pub const fn denominator(self) -> i64 {
        self.denominator
    }

    /// Floating approximation for display and comparison with external
    /// floats only. Never feed the result back into simulation arithmetic.
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Exact conversion from a finite float. Every finite `f64` is a dyadic
    /// rational (`mantissa * 2^exponent`), so this is lossless; `None` for
    /// non-finite input or values whose exact form does not fit `i64`.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let mut scaled = value;
        let mut denominator: i64 = 1;
        while scaled != scaled.trunc() {
            if denominator > i64::MAX / 2 {
                return None;
            }
            scaled *= 2.0;
            denominator *= 2;
        }
        if scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
            return None;
        }
        Some(Self::reduced(scaled as i128, denominator as i128))
    }

    /// Division that surfaces a zero divisor as `None` instead of a panic.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.numerator == 0 {
            return None;
        }
        Some(Self::reduced(
            self.numerator as i128 * rhs.denominator as i128,
            self.denominator as i128 * rhs.numerator as i128,
        ))
    }

    pub fn is_zero(self) -> bool {
        self.numerator == 0
    }

    /// Reduce an `i128` fraction back into `i64` storage. The denominator is
    /// nonzero by construction (products of positive denominators). Values
    /// that still exceed `i64` after reduction are a fatal arithmetic error.
    fn reduced(numerator: i128, denominator: i128) -> Self {
        if numerator == 0 {
            return Self::ZERO;
        }
        let negative = (numerator < 0) != (denominator < 0);
        let n = numerator.unsigned_abs();
        let d = denominator.unsigned_abs();
        let g = gcd(n, d);
        let n = n / g;
        let d = d / g;
        if n > i64::MAX as u128 || d > i64::MAX as u128 {
            panic!("rational arithmetic overflow: {n}/{d} does not fit i64");
        }
        Self {
            numerator: if negative { -(n as i64) } else { n as i64 },
            denominator: d as i64,
        }
    }
}

/// Greatest common divisor. At least one operand must be nonzero, which
/// holds by construction for normalized fractions.
const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Compile-time checked rational literal for configuration defaults. A zero
/// denominator fails const evaluation instead of reaching runtime.
pub(crate) const fn rat(numerator: i64, denominator: i64) -> Rational {
    match Rational::new(numerator, denominator) {
        Ok(value) => value,
        Err(InvalidRational) => panic!("literal denominator must be nonzero"),
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Rational {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::reduced(
            self.numerator as i128 * rhs.denominator as i128
                + rhs.numerator as i128 * self.denominator as i128,
            self.denominator as i128 * rhs.denominator as i128,
        )
    }
}

impl Sub for Rational {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::reduced(
            self.numerator as i128 * rhs.denominator as i128
                - rhs.numerator as i128 * self.denominator as i128,
            self.denominator as i128 * rhs.denominator as i128,
        )
    }
}

impl Mul for Rational {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::reduced(
            self.numerator as i128 * rhs.numerator as i128,
            self.denominator as i128 * rhs.denominator as i128,
        )
    }
}

impl Neg for Rational {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl AddAssign for Rational {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Rational {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    /// Cross-multiplication: `a/b < c/d` iff `a*d < c*b`. Denominators are
    /// always positive, so no sign flip is needed.
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Rational {
    /// Exactly two decimal digits, rounded half away from zero, zero-padded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scaled = self.numerator as i128 * 100;
        let den = self.denominator as i128;
        let half = den / 2;
        let hundredths = if scaled >= 0 {
            (scaled + half) / den
        } else {
            (scaled - half) / den
        };
        let sign = if hundredths < 0 { "-" } else { "" };
        let magnitude = hundredths.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}
