use crate::matrix::matrix::Matrix;
use crate::rings::decimal::{Decimal, DecimalContext};
use crate::rings::fraction::Fraction;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Installs a trace-level subscriber writing to the test output. Only the first call has an effect.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

pub fn float_matrix(rows: &[&[i64]]) -> Matrix<f64> {
    Matrix::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|&x| x as f64).collect())
            .collect(),
    )
    .unwrap()
}

pub fn fraction_matrix(rows: &[&[i64]]) -> Matrix<Fraction> {
    Matrix::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|&x| Fraction::from(x)).collect())
            .collect(),
    )
    .unwrap()
}

pub fn decimal_matrix(rows: &[&[&str]]) -> Matrix<Decimal> {
    let rows: Vec<Vec<&str>> = rows.iter().map(|r| r.to_vec()).collect();
    Matrix::<Decimal>::parse(&rows, DecimalContext::default()).unwrap()
}

pub fn decimals(values: &[&str]) -> Vec<Decimal> {
    values.iter().map(|s| s.parse().unwrap()).collect()
}
