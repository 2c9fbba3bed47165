/// Floating point type used throughout the engine
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Closure error of a balance as a fraction of its inflow.
///
/// The denominator is floored at 1.0 so near-empty balances do not blow up.
/// NaN inputs yield NaN, which compares false against any tolerance.
pub fn relative_error(convergence: Real, total_in: Real) -> Real {
    convergence.abs() / total_in.max(1.0)
}

/// `relative_error` scaled to percent.
pub fn error_percent(convergence: Real, total_in: Real) -> Real {
    relative_error(convergence, total_in) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn relative_error_floors_denominator() {
        assert_eq!(relative_error(0.5, 0.0), 0.5);
        assert_eq!(relative_error(-0.5, 0.2), 0.5);
        assert!(nearly_equal(
            relative_error(3.0, 100.0),
            0.03,
            Tolerances::default()
        ));
    }

    #[test]
    fn relative_error_propagates_nan() {
        assert!(relative_error(Real::NAN, 10.0).is_nan());
        assert!(!(relative_error(Real::NAN, 10.0) < 0.01));
    }

    #[test]
    fn error_percent_scales() {
        assert!(nearly_equal(
            error_percent(2.0, 200.0),
            1.0,
            Tolerances::default()
        ));
    }
}
