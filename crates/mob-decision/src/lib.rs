//! `mob-decision` — multi-criteria decision strategies.
//!
//! Every strategy is a pure function over a candidate slice and a weight
//! vector that returns the index of the chosen candidate.  Negative weights
//! mark cost criteria (smaller is better), non-negative weights mark benefit
//! criteria.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`candidate`]  | `Candidate` (mode + criteria vector)                        |
//! | [`normalize`]  | `normalize_max_abs`, `normalize_min_max`, `Normalization`   |
//! | [`strategy`]   | `weighted_sum`, `topsis`, `softmax_choice`, `lexicographic` |
//! |                | and the `DecisionStrategy` dispatcher                       |
//!
//! # Edge cases shared by all strategies
//!
//! - An empty candidate slice yields `None`.
//! - A weight vector whose length differs from any candidate's criteria
//!   yields `Some(0)` and logs a warning.

pub mod candidate;
pub mod normalize;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use candidate::Candidate;
pub use normalize::{normalize_max_abs, normalize_min_max, Normalization};
pub use strategy::{lexicographic, softmax_choice, topsis, weighted_sum, DecisionStrategy};
