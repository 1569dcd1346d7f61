use crate::rings::scalar::Scalar;

// Plain IEEE arithmetic: no rounding control, no normalization between steps.
macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                type Context = ();

                #[inline(always)]
                fn divide(self, rhs: &$t, _ctx: &()) -> $t {
                    self / rhs
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn test_float_steps() {
        assert_eq!(6.0f64.divide(&4.0, &()), 1.5);
        assert_eq!(6.0f32.divide(&4.0, &()), 1.5);
        assert_eq!(5.0f64.eliminate(&2.0, &2.5, &()), 0.0);
        assert_eq!(5.0f64.back_eliminate(&1.0, &2.0, &()), 3.0);

        // No normalization: the usual binary rounding error survives.
        let x = 0.3f64.divide(&0.1, &());
        assert_ne!(x, 3.0);
        assert!((x - 3.0).abs() < 1e-12);

        assert!(0.0f64.is_zero());
        assert!(!1e-300f64.is_zero());
    }
}
