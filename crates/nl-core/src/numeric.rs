use crate::NlError;

/// Floating point type used throughout the node model.
pub type Real = f64;

/// Default tolerance for flow comparisons, in pcu/h. Suppresses floating noise
/// when deciding whether a flow is present at all.
pub const EPSILON: Real = 1e-6;

/// `v > eps`.
#[inline]
pub fn approx_positive(v: Real, eps: Real) -> bool {
    v > eps
}

/// `a` exceeds `b` by more than `eps`.
#[inline]
pub fn approx_greater(a: Real, b: Real, eps: Real) -> bool {
    a - b > eps
}

/// `a` and `b` lie within `eps` of each other.
#[inline]
pub fn approx_equal(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() <= eps
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, NlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NlError::NonFinite { what, value: v })
    }
}

/// Finite and not below zero. Flows and capacities must satisfy this.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, NlError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        Err(NlError::Negative { what, value: v })
    } else {
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_comparisons() {
        assert!(!approx_positive(1e-7, EPSILON));
        assert!(!approx_positive(EPSILON, EPSILON));
        assert!(approx_positive(2e-6, EPSILON));

        assert!(approx_greater(1.0, 0.5, EPSILON));
        assert!(!approx_greater(1.0 + 1e-7, 1.0, EPSILON));

        assert!(approx_equal(1.0, 1.0 + 5e-7, EPSILON));
        assert!(!approx_equal(1.0, 1.0 + 5e-6, EPSILON));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(ensure_non_negative(0.0, "flow"), Ok(0.0));
        assert!(matches!(
            ensure_non_negative(-1.0, "flow"),
            Err(NlError::Negative { what: "flow", .. })
        ));
        assert!(ensure_non_negative(Real::INFINITY, "flow").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn greater_implies_not_equal(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            if approx_greater(a, b, EPSILON) {
                prop_assert!(!approx_equal(a, b, EPSILON));
            }
        }
    }
}
