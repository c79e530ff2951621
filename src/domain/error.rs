// ============================================================
// Layer 3 — Validation Errors
// ============================================================
// Every constructor or generator that accepts user-controlled
// numbers validates them up front and reports a ParamError.
// Upper layers work with anyhow::Result, and ParamError converts
// into anyhow::Error automatically through `?`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    /// A value that must be a finite number was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// A uniform range was given with min above max.
    #[error("{name} range is empty: min {min} > max {max}")]
    EmptyRange { name: &'static str, min: f64, max: f64 },

    /// A value fell outside the interval it is allowed to take.
    #[error("{name} = {value} is outside {expected}")]
    OutOfBounds {
        name:     &'static str,
        value:    f64,
        expected: &'static str,
    },

    /// A count (frames, substeps, samples) was too small.
    #[error("{name} must be at least {min}, got {value}")]
    TooFew {
        name:  &'static str,
        value: usize,
        min:   usize,
    },

    /// Physics time step must move time forward.
    #[error("time step must be positive, got {0}")]
    TimeStep(f64),

    /// An out-of-distribution range shares values with the training range.
    #[error("out-of-distribution {name} range {ood} overlaps training range {train}")]
    OverlappingOod {
        name:  &'static str,
        ood:   String,
        train: String,
    },

    /// An out-of-distribution config must change at least one parameter.
    #[error("out-of-distribution split needs a gravity or restitution range")]
    NoOodRange,

    /// A range string could not be parsed.
    #[error("cannot parse range '{0}': expected 'min..max' or a single number")]
    Parse(String),
}

/// Check that a named value is a finite number.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64, ParamError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParamError::NonFinite { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("g", 9.8), Ok(9.8));
        assert!(matches!(
            ensure_finite("g", f64::NAN),
            Err(ParamError::NonFinite { name: "g", .. })
        ));
        assert!(ensure_finite("g", f64::INFINITY).is_err());
    }

    #[test]
    fn test_messages_name_the_field() {
        let e = ParamError::TooFew { name: "frame_rate", value: 0, min: 1 };
        assert_eq!(e.to_string(), "frame_rate must be at least 1, got 0");
    }
}
