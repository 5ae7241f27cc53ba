//! Parameter checks shared by the distributors.
//!
//! Every helper returns the checked value on success so calls can be
//! chained with `?` at the top of a distribution function.

use crate::error::InvalidParameter;

type Result<T> = std::result::Result<T, InvalidParameter>;

fn reject<T>(name: &'static str, value: f64, constraint: &'static str) -> Result<T> {
    tracing::debug!(parameter = name, value, constraint, "rejected parameter");
    Err(InvalidParameter::new(name, value, constraint))
}

/// Rejects NaN and infinities.
pub fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        reject(name, value, "must be finite")
    }
}

/// Requires a finite value strictly greater than zero.
pub fn positive(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        reject(name, value, "must be greater than zero")
    }
}

/// Requires at least one phytomer.
pub fn positive_count(name: &'static str, count: usize) -> Result<usize> {
    if count > 0 {
        Ok(count)
    } else {
        reject(name, 0.0, "must be greater than zero")
    }
}

/// Requires a finite value strictly below the axis height `bound`.
pub fn below_height(name: &'static str, value: f64, bound: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value < bound {
        Ok(value)
    } else {
        reject(name, value, "must be less than the total height")
    }
}

/// Requires a finite value greater than or equal to zero.
pub fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        reject(name, value, "must not be negative")
    }
}

/// Requires a value in the open interval `(0, 1)`.
pub fn open_unit(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        reject(name, value, "must lie strictly between 0 and 1")
    }
}

/// Requires a value in the half-open interval `(0, 1]`.
pub fn unit_rank(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        reject(name, value, "must lie in (0, 1]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_rejects_nan_and_infinities() {
        assert!(finite("x", 1.5).is_ok());
        assert!(finite("x", f64::NAN).is_err());
        assert!(finite("x", f64::INFINITY).is_err());
        assert!(finite("x", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert_eq!(positive("h", 2.0), Ok(2.0));

        let err = positive("h", 0.0).unwrap_err();
        assert_eq!(err.name, "h");
        assert_eq!(err.value, 0.0);

        assert!(positive("h", -1.0).is_err());
    }

    #[test]
    fn positive_count_rejects_zero() {
        assert_eq!(positive_count("n", 3), Ok(3));
        assert!(positive_count("n", 0).is_err());
    }

    #[test]
    fn below_height_is_strict() {
        assert_eq!(below_height("u0", 9.99, 10.0), Ok(9.99));
        assert!(below_height("u0", 10.0, 10.0).is_err());
        assert!(below_height("u0", 11.0, 10.0).is_err());
        // Negative offsets are allowed, only the upper bound is checked.
        assert_eq!(below_height("u0", -5.0, 10.0), Ok(-5.0));
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(non_negative("u0", 0.0), Ok(0.0));
        assert!(non_negative("u0", -0.1).is_err());
    }

    #[test]
    fn open_unit_excludes_both_bounds() {
        assert!(open_unit("skew", 0.0).is_err());
        assert!(open_unit("skew", 1.0).is_err());
        assert_eq!(open_unit("skew", 0.5), Ok(0.5));
    }

    #[test]
    fn unit_rank_includes_one_only() {
        assert!(unit_rank("rmax", 0.0).is_err());
        assert_eq!(unit_rank("rmax", 1.0), Ok(1.0));
        assert!(unit_rank("rmax", 1.0001).is_err());
    }

    #[test]
    fn error_message_names_parameter_and_constraint() {
        let err = open_unit("skew", 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter `skew` = 0: must lie strictly between 0 and 1"
        );
    }
}
