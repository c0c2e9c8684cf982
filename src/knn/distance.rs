//! Distance metrics used to rank training rows against a query.

use std::fmt;
use std::str::FromStr;

use num_traits::{AsPrimitive, Float};

use crate::error::KnnError;

/// The metric a classifier ranks neighbors by.
///
/// One metric family is supported: Minkowski distance of order `p`.
/// `Euclidean` is the `p = 2` member, computed as `sqrt(Σ (a_j - b_j)^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KnnDistance {
    #[default]
    Euclidean,
    Minkowski { p: u32 }, // p = 1 is Manhattan
}

impl KnnDistance {
    /// Distance between two feature vectors of equal length.
    pub fn compute<F>(&self, a: &[F], b: &[F]) -> f64
    where
        F: Float + AsPrimitive<f64>,
    {
        debug_assert_eq!(a.len(), b.len());
        match *self {
            KnnDistance::Euclidean | KnnDistance::Minkowski { p: 2 } => euclidean_distance(a, b),
            KnnDistance::Minkowski { p } => minkowski_distance(a, b, p),
        }
    }
}

pub fn euclidean_distance<F>(a: &[F], b: &[F]) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    let sum_sq_diff: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let diff: f64 = (x - y).as_();
            diff * diff
        })
        .sum();
    sum_sq_diff.sqrt()
}

/// Minkowski distance of order `p`.
///
/// Differences are scaled by the largest one before raising them to `p`, so
/// every term lies in `[0, 1]` and large orders neither overflow nor wrap.
/// As `p` grows the result approaches the largest absolute difference.
pub fn minkowski_distance<F>(a: &[F], b: &[F], p: u32) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    let diffs = a.iter().zip(b.iter()).map(|(&x, &y)| -> f64 { (x - y).abs().as_() });
    if p == 1 {
        return diffs.sum();
    }

    let mut largest = 0.0_f64;
    for diff in diffs.clone() {
        if diff.is_nan() {
            return f64::NAN;
        }
        largest = largest.max(diff);
    }
    if largest == 0.0 || largest.is_infinite() {
        return largest;
    }

    let order = p as f64;
    let scaled_sum: f64 = diffs.map(|diff| (diff / largest).powf(order)).sum();
    largest * scaled_sum.powf(1.0 / order)
}

impl FromStr for KnnDistance {
    type Err = KnnError;

    /// Accepts `euclidean`, `manhattan` or `minkowski:<p>` with `p >= 1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "euclidean" => Ok(KnnDistance::Euclidean),
            "manhattan" => Ok(KnnDistance::Minkowski { p: 1 }),
            other => {
                let p = other
                    .strip_prefix("minkowski:")
                    .and_then(|order| order.trim().parse::<u32>().ok())
                    .filter(|&p| p >= 1)
                    .ok_or_else(|| {
                        KnnError::InvalidParameter(format!(
                            "unknown distance metric '{}': expected euclidean, manhattan or minkowski:<p>",
                            s
                        ))
                    })?;
                Ok(KnnDistance::Minkowski { p })
            }
        }
    }
}

impl fmt::Display for KnnDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnnDistance::Euclidean => f.write_str("euclidean"),
            KnnDistance::Minkowski { p: 1 } => f.write_str("manhattan"),
            KnnDistance::Minkowski { p } => write!(f, "minkowski:{}", p),
        }
    }
}
