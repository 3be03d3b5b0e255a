use crate::AdError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, AdError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AdError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive, otherwise a domain failure.
pub fn ensure_positive(v: Real, what: &str) -> Result<Real, AdError> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(AdError::domain(what, v))
    }
}

/// Spacing of a sampled axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Uniformly spaced points
    Linear,
    /// Uniform in ln(x); both ends must be positive
    Logarithmic,
}

/// Sample `n` points from `start` to `end` inclusive.
///
/// Both endpoints are reproduced exactly. Logarithmic spacing requires
/// positive endpoints.
pub fn sample(start: Real, end: Real, n: usize, spacing: Spacing) -> Result<Vec<Real>, AdError> {
    ensure_finite(start, "sample start")?;
    ensure_finite(end, "sample end")?;
    if n < 2 {
        return Err(AdError::invalid(format!(
            "a sampled range needs at least 2 points, got {n}"
        )));
    }

    let mut points = match spacing {
        Spacing::Linear => linspace(start, end, n),
        Spacing::Logarithmic => {
            if start <= 0.0 {
                return Err(AdError::domain("logarithmic sample start", start));
            }
            if end <= 0.0 {
                return Err(AdError::domain("logarithmic sample end", end));
            }
            linspace(start.ln(), end.ln(), n)
                .into_iter()
                .map(Real::exp)
                .collect()
        }
    };

    // Ensure exact endpoints
    points[0] = start;
    points[n - 1] = end;
    Ok(points)
}

fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    let delta = (end - start) / (n - 1) as Real;
    (0..n).map(|i| start + i as Real * delta).collect()
}

/// Gradient of samples `y(x)` with second-order central differences in the
/// interior and first-order one-sided differences at the ends.
///
/// Handles uneven spacing. Needs at least two points with distinct `x`.
pub fn gradient(y: &[Real], x: &[Real]) -> Result<Vec<Real>, AdError> {
    if y.len() != x.len() {
        return Err(AdError::ParameterMismatch {
            what: "gradient samples".into(),
            left: y.len(),
            right: x.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(AdError::invalid("gradient needs at least 2 samples"));
    }

    let mut out = Vec::with_capacity(n);
    let step = |i: usize, j: usize| -> Result<Real, AdError> {
        let dx = x[j] - x[i];
        if dx == 0.0 {
            return Err(AdError::domain("gradient spacing", dx));
        }
        Ok(dx)
    };

    out.push((y[1] - y[0]) / step(0, 1)?);
    for i in 1..n - 1 {
        let hl = step(i - 1, i)?;
        let hr = step(i, i + 1)?;
        let d = (hl * hl * (y[i + 1] - y[i]) + hr * hr * (y[i] - y[i - 1]))
            / (hl * hr * (hl + hr));
        out.push(d);
    }
    out.push((y[n - 1] - y[n - 2]) / step(n - 2, n - 1)?);
    Ok(out)
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
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(1e-300, "p").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "p"),
            Err(AdError::NumericDomain { .. })
        ));
        assert!(ensure_positive(Real::INFINITY, "p").is_err());
    }

    #[test]
    fn linear_sample_pins_endpoints() {
        let pts = sample(0.1, 0.7, 7, Spacing::Linear).unwrap();
        assert_eq!(pts.len(), 7);
        assert_eq!(pts[0], 0.1);
        assert_eq!(pts[6], 0.7);
        assert!((pts[3] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn logarithmic_sample_is_geometric() {
        let pts = sample(1e-3, 1.0, 4, Spacing::Logarithmic).unwrap();
        assert_eq!(pts[0], 1e-3);
        assert_eq!(pts[3], 1.0);
        assert!((pts[1] - 1e-2).abs() < 1e-12);
        assert!((pts[2] - 1e-1).abs() < 1e-12);
    }

    #[test]
    fn logarithmic_sample_rejects_non_positive() {
        assert!(sample(0.0, 1.0, 4, Spacing::Logarithmic).is_err());
        assert!(sample(1.0, 2.0, 1, Spacing::Linear).is_err());
    }

    #[test]
    fn gradient_of_quadratic_is_exact_inside() {
        let x = [0.0, 0.5, 1.5, 3.0];
        let y: Vec<Real> = x.iter().map(|v| v * v).collect();
        let g = gradient(&y, &x).unwrap();
        assert!((g[1] - 1.0).abs() < 1e-12);
        assert!((g[2] - 3.0).abs() < 1e-12);
        // one-sided ends
        assert!((g[0] - 0.5).abs() < 1e-12);
        assert!((g[3] - 4.5).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sample_pins_ends_and_is_monotonic(
                start in 1e-4f64..1e2,
                span in 1e-3f64..1e3,
                n in 2usize..200,
                log in any::<bool>(),
            ) {
                let end = start + span;
                let spacing = if log { Spacing::Logarithmic } else { Spacing::Linear };
                let pts = sample(start, end, n, spacing).unwrap();
                prop_assert_eq!(pts.len(), n);
                prop_assert_eq!(pts[0], start);
                prop_assert_eq!(pts[n - 1], end);
                prop_assert!(pts.windows(2).all(|w| w[1] > w[0]));
            }

            #[test]
            fn nearly_equal_is_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
                let tol = Tolerances::default();
                prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
                prop_assert!(nearly_equal(a, a, tol));
            }
        }
    }
}
