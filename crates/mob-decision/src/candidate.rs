use mob_core::TransportMode;

/// One alternative in a decision: a transport mode and its criteria vector.
///
/// The criteria order is fixed by the caller; the mode selector uses
/// `[price, time, social, difficulty]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub mode:     TransportMode,
    pub criteria: Vec<f64>,
}

impl Candidate {
    pub fn new(mode: TransportMode, criteria: Vec<f64>) -> Self {
        Self { mode, criteria }
    }

    /// Σ wᵢ·cᵢ over the shorter of the two vectors.
    #[inline]
    pub fn weighted_score(&self, weights: &[f64]) -> f64 {
        self.criteria.iter().zip(weights).map(|(c, w)| c * w).sum()
    }
}

/// `true` if every candidate carries exactly `weights.len()` criteria.
pub(crate) fn dimensions_match(candidates: &[Candidate], weights: &[f64]) -> bool {
    candidates.iter().all(|c| c.criteria.len() == weights.len())
}
