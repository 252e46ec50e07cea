//! Column-wise criteria normalisation, applied in place.

use crate::Candidate;

/// Column scaling applied to the candidates before a strategy ranks them.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Normalization {
    /// Divide each column by its largest absolute value.
    #[default]
    MaxAbs,
    /// Rescale each column to `[0, 1]` by its min and max.
    MinMax,
}

impl Normalization {
    pub fn apply(self, candidates: &mut [Candidate]) {
        match self {
            Normalization::MaxAbs => normalize_max_abs(candidates),
            Normalization::MinMax => normalize_min_max(candidates),
        }
    }
}

fn columns(candidates: &[Candidate]) -> usize {
    candidates.iter().map(|c| c.criteria.len()).min().unwrap_or(0)
}

/// Divide every column by its maximum absolute value (zero max → 1.0).
///
/// Afterwards every value lies in `[-1, 1]`.
pub fn normalize_max_abs(candidates: &mut [Candidate]) {
    for col in 0..columns(candidates) {
        let mut max = candidates
            .iter()
            .map(|c| c.criteria[col].abs())
            .fold(0.0_f64, f64::max);
        if max == 0.0 || !max.is_finite() {
            max = 1.0;
        }
        for c in candidates.iter_mut() {
            c.criteria[col] /= max;
        }
    }
}

/// Map every column onto `[0, 1]` (zero range → 1.0).
pub fn normalize_min_max(candidates: &mut [Candidate]) {
    for col in 0..columns(candidates) {
        let (min, max) = candidates.iter().map(|c| c.criteria[col]).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), v| (lo.min(v), hi.max(v)),
        );
        let mut range = max - min;
        if range == 0.0 || !range.is_finite() {
            range = 1.0;
        }
        for c in candidates.iter_mut() {
            c.criteria[col] = (c.criteria[col] - min) / range;
        }
    }
}
