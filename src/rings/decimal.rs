use crate::error::ParseDecimalError;
use crate::rings::scalar::Scalar;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Towards zero.
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
}

/// Precision and rounding rules applied while reducing a `Decimal` matrix.
///
/// The defaults follow the IEEE 754 decimal128 format for division (34
/// significant digits, half-even), and round every forward elimination
/// product to 33 fractional digits, half-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalContext {
    pub precision: u64,
    pub rounding: RoundingMode,
    pub elimination_scale: i64,
    pub elimination_rounding: RoundingMode,
    /// Also round the products of the backward (upward) elimination phase.
    pub round_back_substitution: bool,
}

impl DecimalContext {
    pub fn new(precision: u64) -> Self {
        DecimalContext {
            precision: precision.max(1),
            ..Self::decimal128()
        }
    }

    pub fn decimal128() -> Self {
        DecimalContext {
            precision: 34,
            rounding: RoundingMode::HalfEven,
            elimination_scale: 33,
            elimination_rounding: RoundingMode::HalfUp,
            round_back_substitution: false,
        }
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_elimination_scale(mut self, scale: i64, rounding: RoundingMode) -> Self {
        self.elimination_scale = scale;
        self.elimination_rounding = rounding;
        self
    }

    pub fn with_round_back_substitution(mut self, enabled: bool) -> Self {
        self.round_back_substitution = enabled;
        self
    }

    fn round_product(&self, product: Decimal) -> Decimal {
        if product.scale > self.elimination_scale {
            product.with_scale(self.elimination_scale, self.elimination_rounding)
        } else {
            product
        }
    }
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self::decimal128()
    }
}

fn pow10(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

fn digit_count(value: &BigInt) -> u64 {
    if value.is_zero() {
        return 1;
    }
    value.magnitude().to_str_radix(10).len() as u64
}

// Exact quotient `n / d` rounded to an integer.
fn divide_rounded(n: &BigInt, d: &BigInt, mode: RoundingMode) -> BigInt {
    let (q, r) = n.div_rem(d);
    if r.is_zero() {
        return q;
    }

    let positive = (n.sign() == Sign::Minus) == (d.sign() == Sign::Minus);
    let half = (r.abs() * 2u32).cmp(&d.abs());
    let away = match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => positive,
        RoundingMode::Floor => !positive,
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::HalfEven => {
            half == Ordering::Greater || (half == Ordering::Equal && q.is_odd())
        }
    };

    match (away, positive) {
        (false, _) => q,
        (true, true) => q + 1,
        (true, false) => q - 1,
    }
}

/// Arbitrary-precision decimal: `unscaled * 10^-scale`.
#[derive(Debug, Clone)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i64,
}

impl Decimal {
    pub fn new(unscaled: BigInt, scale: i64) -> Self {
        Decimal { unscaled, scale }
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    pub fn abs(&self) -> Decimal {
        Decimal {
            unscaled: self.unscaled.abs(),
            scale: self.scale,
        }
    }

    /// Rounds (or zero-pads) to exactly `scale` fractional digits.
    pub fn with_scale(&self, scale: i64, mode: RoundingMode) -> Decimal {
        match scale.cmp(&self.scale) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => Decimal {
                unscaled: &self.unscaled * pow10((scale - self.scale) as u64),
                scale,
            },
            Ordering::Less => Decimal {
                unscaled: divide_rounded(
                    &self.unscaled,
                    &pow10((self.scale - scale) as u64),
                    mode,
                ),
                scale,
            },
        }
    }

    pub fn strip_trailing_zeros(self) -> Decimal {
        if self.unscaled.is_zero() {
            return Decimal::zero();
        }

        let ten = BigInt::from(10u8);
        let mut unscaled = self.unscaled;
        let mut scale = self.scale;
        loop {
            let (q, r) = unscaled.div_rem(&ten);
            if !r.is_zero() {
                break;
            }
            unscaled = q;
            scale -= 1;
        }
        Decimal { unscaled, scale }
    }

    /// Quotient rounded to `ctx.precision` significant digits.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    pub fn div_with_context(&self, rhs: &Decimal, ctx: &DecimalContext) -> Decimal {
        assert!(!rhs.is_zero(), "Division by zero");
        if self.is_zero() {
            return Decimal::zero();
        }

        let precision = ctx.precision.max(1);
        // Enough extra digits that the truncated quotient has more than `precision` digits
        let shift = (precision + digit_count(&rhs.unscaled) + 1)
            .saturating_sub(digit_count(&self.unscaled));
        let numerator = &self.unscaled * pow10(shift);
        let truncated = &numerator / &rhs.unscaled;
        let drop = digit_count(&truncated).saturating_sub(precision);

        Decimal {
            unscaled: divide_rounded(&numerator, &(&rhs.unscaled * pow10(drop)), ctx.rounding),
            scale: self.scale - rhs.scale + shift as i64 - drop as i64,
        }
    }

    fn aligned(&self, rhs: &Decimal) -> (BigInt, BigInt, i64) {
        let scale = self.scale.max(rhs.scale);
        (
            &self.unscaled * pow10((scale - self.scale) as u64),
            &rhs.unscaled * pow10((scale - rhs.scale) as u64),
            scale,
        )
    }
}

impl Scalar for Decimal {
    type Context = DecimalContext;

    fn divide(self, rhs: &Decimal, ctx: &DecimalContext) -> Decimal {
        self.div_with_context(rhs, ctx).strip_trailing_zeros()
    }

    fn eliminate(self, pivot_entry: &Decimal, factor: &Decimal, ctx: &DecimalContext) -> Decimal {
        let product = ctx.round_product(pivot_entry.clone() * factor.clone());
        (self - product).strip_trailing_zeros()
    }

    fn back_eliminate(
        self,
        pivot_entry: &Decimal,
        factor: &Decimal,
        ctx: &DecimalContext,
    ) -> Decimal {
        let product = pivot_entry.clone() * factor.clone();
        let product = if ctx.round_back_substitution {
            ctx.round_product(product)
        } else {
            product
        };
        (self - product).strip_trailing_zeros()
    }
}

impl ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        if self.scale == rhs.scale {
            return Decimal::new(self.unscaled + rhs.unscaled, self.scale);
        }
        let (a, b, scale) = self.aligned(&rhs);
        Decimal::new(a + b, scale)
    }
}

impl ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        self + (-rhs)
    }
}

impl ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal::new(self.unscaled * rhs.unscaled, self.scale + rhs.scale)
    }
}

impl ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.unscaled, self.scale)
    }
}

impl Zero for Decimal {
    fn zero() -> Decimal {
        Decimal::new(BigInt::zero(), 0)
    }

    fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }
}

impl One for Decimal {
    fn one() -> Decimal {
        Decimal::new(BigInt::one(), 0)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, rhs: &Decimal) -> bool {
        self.cmp(rhs) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, rhs: &Decimal) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Ord for Decimal {
    fn cmp(&self, rhs: &Decimal) -> Ordering {
        if self.scale == rhs.scale {
            return self.unscaled.cmp(&rhs.unscaled);
        }
        let (a, b, _) = self.aligned(rhs);
        a.cmp(&b)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Decimal {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl TryFrom<f64> for Decimal {
    type Error = ParseDecimalError;

    // Goes through the shortest round-trip representation, so 0.1 becomes 0.1
    fn try_from(value: f64) -> Result<Decimal, ParseDecimalError> {
        if !value.is_finite() {
            return Err(ParseDecimalError::NonFinite);
        }
        format!("{value}").parse()
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Decimal, ParseDecimalError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseDecimalError::Empty);
        }
        let invalid = || ParseDecimalError::Invalid {
            input: s.to_owned(),
        };

        let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (&s[..i], s[i + 1..].parse::<i64>().map_err(|_| invalid())?),
            None => (s, 0),
        };
        let (negative, mantissa) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = int_part
            .chars()
            .chain(frac_part.chars())
            .all(|c| c.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits {
            return Err(invalid());
        }

        // Scales outside the i32 range are rejected
        let scale = i64::try_from(frac_part.len())
            .ok()
            .and_then(|digits| digits.checked_sub(exponent))
            .filter(|&scale| i32::try_from(scale).is_ok())
            .ok_or_else(invalid)?;

        let digits = format!("{int_part}{frac_part}");
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        Ok(Decimal {
            unscaled: if negative { -magnitude } else { magnitude },
            scale,
        })
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.unscaled.magnitude().to_str_radix(10);

        if self.scale <= 0 {
            if self.unscaled.is_zero() {
                return write!(f, "0");
            }
            return write!(f, "{sign}{digits}{}", "0".repeat((-self.scale) as usize));
        }

        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            "0".repeat(scale + 1 - digits.len()) + &digits
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_decimal_parse_and_display() {
        assert_eq!(dec("-12.5e2").to_string(), "-1250");
        assert_eq!(dec("0.050").to_string(), "0.050");
        assert_eq!(dec("1e-3").to_string(), "0.001");
        assert_eq!(dec(".5").to_string(), "0.5");
        assert_eq!(dec("+7").to_string(), "7");
        assert_eq!(dec("-0.25").to_string(), "-0.25");

        assert_eq!("".parse::<Decimal>(), Err(ParseDecimalError::Empty));
        for bad in [
            "abc",
            "1.2.3",
            "-",
            "1e",
            "1,5",
            "--1",
            "1e-9223372036854775808",
            "1e-9000000000000000000",
            "1e-2147483648",
            "1e2147483649",
        ] {
            assert_eq!(
                bad.parse::<Decimal>(),
                Err(ParseDecimalError::Invalid {
                    input: bad.to_owned()
                })
            );
        }

        assert_eq!(dec("1e-2147483647").scale(), 2147483647);
        assert_eq!(dec("1e2147483648").scale(), -2147483648);

        assert_eq!(Decimal::try_from(0.1).unwrap().to_string(), "0.1");
        assert_eq!(Decimal::try_from(-2.5).unwrap(), dec("-2.5"));
        assert_eq!(
            Decimal::try_from(f64::NAN),
            Err(ParseDecimalError::NonFinite)
        );
        assert_eq!(Decimal::from(-42), dec("-42.000"));
    }

    #[test]
    fn test_decimal_arithmetic() {
        assert_eq!(dec("2.50"), dec("2.5"));
        assert_ne!(dec("2.51"), dec("2.5"));
        assert!(dec("-1.5") < dec("0.25"));
        assert!(dec("10") > dec("9.999"));

        assert_eq!(dec("1.25") + dec("0.005"), dec("1.255"));
        assert_eq!(dec("1") - dec("0.001"), dec("0.999"));
        assert_eq!((dec("1.5") * dec("-0.2")).to_string(), "-0.30");
        assert_eq!(dec("-3.5").abs(), dec("3.5"));
        assert!(dec("-0.0001").is_negative());
        assert!(dec("0.000").is_zero());
    }

    #[test]
    fn test_decimal_strip_trailing_zeros() {
        let x = dec("1.2300").strip_trailing_zeros();
        assert_eq!(x.to_string(), "1.23");
        assert_eq!(x.scale(), 2);

        let x = dec("100").strip_trailing_zeros();
        assert_eq!(x.to_string(), "100");
        assert_eq!(x.scale(), -2);
        assert_eq!(x.unscaled(), &BigInt::from(1));

        assert_eq!(dec("0.000").strip_trailing_zeros().scale(), 0);
    }

    #[test]
    fn test_decimal_with_scale() {
        let cases = [
            ("1.2345", RoundingMode::HalfUp, "1.23"),
            ("1.235", RoundingMode::HalfUp, "1.24"),
            ("-1.235", RoundingMode::HalfUp, "-1.24"),
            ("1.225", RoundingMode::HalfEven, "1.22"),
            ("1.235", RoundingMode::HalfEven, "1.24"),
            ("1.225", RoundingMode::HalfDown, "1.22"),
            ("1.221", RoundingMode::Up, "1.23"),
            ("-1.229", RoundingMode::Down, "-1.22"),
            ("-1.221", RoundingMode::Floor, "-1.23"),
            ("-1.229", RoundingMode::Ceiling, "-1.22"),
            ("1.221", RoundingMode::Ceiling, "1.23"),
        ];
        for (input, mode, expected) in cases {
            assert_eq!(dec(input).with_scale(2, mode).to_string(), expected);
        }
        assert_eq!(dec("1.5").with_scale(3, RoundingMode::Down).to_string(), "1.500");
    }

    #[test]
    fn test_decimal_division() {
        let ctx = DecimalContext::default();

        let third = Decimal::one().div_with_context(&dec("3"), &ctx);
        assert_eq!(third.to_string(), format!("0.{}", "3".repeat(34)));

        let two_thirds = dec("2").div_with_context(&dec("3"), &ctx);
        assert_eq!(two_thirds.to_string(), format!("0.{}7", "6".repeat(33)));

        let minus_third = dec("-1").div_with_context(&dec("3"), &ctx);
        assert_eq!(minus_third, -third);

        assert_eq!(dec("10").divide(&dec("4"), &ctx).to_string(), "2.5");
        assert_eq!(dec("0.3").divide(&dec("0.1"), &ctx).to_string(), "3");
        assert_eq!(dec("0").divide(&dec("7"), &ctx), Decimal::zero());

        let short = DecimalContext::new(5);
        assert_eq!(dec("1").divide(&dec("7"), &short).to_string(), "0.14286");
        let short = short.with_rounding(RoundingMode::Down);
        assert_eq!(dec("2").divide(&dec("3"), &short).to_string(), "0.66666");
    }

    #[test]
    fn test_decimal_elimination_steps() {
        let ctx = DecimalContext::default();
        let third = Decimal::one().divide(&dec("3"), &ctx);

        // 6 * 0.333...3 (34 digits) rounds back to exactly 2 at scale 33
        assert!(dec("2").eliminate(&third, &dec("6"), &ctx).is_zero());

        // The backward phase keeps the full product unless asked to round
        let residue = dec("2").back_eliminate(&third, &dec("6"), &ctx);
        assert_eq!(residue.to_string(), format!("0.{}2", "0".repeat(33)));

        let rounding = ctx.clone().with_round_back_substitution(true);
        assert!(dec("2").back_eliminate(&third, &dec("6"), &rounding).is_zero());

        assert_eq!(
            dec("5").eliminate(&dec("1.5"), &dec("2"), &ctx).to_string(),
            "2"
        );
    }
}
