//! Agent storage: `AgentRegistry` (citizen records) and `AgentRngs`
//! (per-agent RNG).
//!
//! # Why two structs?
//!
//! The tick loop hands every agent `&mut Citizen` and `&mut AgentRng` at the
//! same time, in parallel when the `parallel` feature of `mob-sim` is on.
//! Keeping the RNGs in their own `Vec` lets it zip the two slices:
//!
//! ```ignore
//! registry.citizens
//!     .par_iter_mut()
//!     .zip(rngs.inner.par_iter_mut())
//!     .map(|(citizen, rng)| step(citizen, rng, &ctx, traffic))
//!     .collect::<Vec<_>>();
//! ```

use mob_core::{AgentId, AgentRng};
use tracing::warn;

use crate::{Citizen, CongestionReport};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentRegistry ─────────────────────────────────────────────────────────────

/// All citizens, indexed by `AgentId`.
///
/// `citizens[i].id == AgentId(i)` for every `i`.
pub struct AgentRegistry {
    pub citizens: Vec<Citizen>,
}

impl AgentRegistry {
    pub fn new(citizens: Vec<Citizen>) -> Self {
        Self { citizens }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.citizens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.citizens.is_empty()
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&Citizen> {
        self.citizens.get(agent.index())
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut Citizen> {
        self.citizens.get_mut(agent.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Citizen> {
        self.citizens.iter()
    }

    /// Citizens currently making a trip.
    pub fn in_transit_count(&self) -> usize {
        self.citizens.iter().filter(|c| c.in_transit()).count()
    }

    /// Append `report` to each recipient's inbox.  Unknown ids are skipped.
    ///
    /// Returns how many inboxes received it.
    pub fn deliver(&mut self, report: &CongestionReport, recipients: &[AgentId]) -> usize {
        let mut delivered = 0;
        for &to in recipients {
            match self.citizens.get_mut(to.index()) {
                Some(c) => {
                    c.inbox.push(report.clone());
                    delivered += 1;
                }
                None => warn!(reporter = %report.reporter, recipient = %to, "report addressed to unknown agent"),
            }
        }
        delivered
    }
}
