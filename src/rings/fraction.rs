use crate::error::{MatrixError, Result};
use crate::rings::scalar::Scalar;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

/// Exact rational number, kept in lowest terms with a positive denominator.
#[derive(Debug, Clone)]
pub struct Fraction {
    num: BigInt,
    den: BigInt,
}

impl Fraction {
    pub fn new(num: BigInt, den: BigInt) -> Result<Self> {
        if den.is_zero() {
            return Err(MatrixError::ZeroDenominator);
        }
        Ok(Self::reduced(num, den))
    }

    // Callers guarantee `den != 0`
    fn reduced(num: BigInt, den: BigInt) -> Self {
        let g = num.gcd(&den);
        let (num, den) = if g.is_zero() || g.is_one() {
            (num, den)
        } else {
            (num / &g, den / &g)
        };

        if den.is_negative() {
            return Self {
                num: -num,
                den: -den,
            };
        }
        Self { num, den }
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    pub fn denom(&self) -> &BigInt {
        &self.den
    }
}

impl Scalar for Fraction {
    type Context = ();

    fn divide(self, rhs: &Fraction, _ctx: &()) -> Fraction {
        self / rhs.clone()
    }
}

impl ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        if self.den == rhs.den {
            return Fraction::reduced(self.num + rhs.num, self.den);
        }

        Fraction::reduced(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self + (-rhs)
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl ops::Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        assert!(!rhs.num.is_zero(), "Division by zero");
        Fraction::reduced(self.num * rhs.den, self.den * rhs.num)
    }
}

impl ops::Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::reduced(self.num * rhs.num, self.den * rhs.den)
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction {
            num: BigInt::one(),
            den: BigInt::one(),
        }
    }
}

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction {
            num: BigInt::zero(),
            den: BigInt::one(),
        }
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Fraction {
        Fraction {
            num: BigInt::from(value),
            den: BigInt::one(),
        }
    }
}

impl FromStr for Fraction {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Fraction> {
        let parse = |part: &str| {
            BigInt::parse_bytes(part.trim().as_bytes(), 10).ok_or_else(|| {
                MatrixError::InvalidFraction {
                    input: s.to_owned(),
                }
            })
        };

        match s.split_once('/') {
            Some((num, den)) => Fraction::new(parse(num)?, parse(den)?),
            None => Fraction::new(parse(s)?, BigInt::one()),
        }
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

// Both sides are always in lowest terms
impl PartialEq for Fraction {
    fn eq(&self, rhs: &Fraction) -> bool {
        self.num == rhs.num && self.den == rhs.den
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, rhs: &Fraction) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Ord for Fraction {
    fn cmp(&self, rhs: &Fraction) -> Ordering {
        (&self.num * &rhs.den).cmp(&(&rhs.num * &self.den))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
