//! R-tree index over agent positions.
//!
//! Built once from a snapshot of `(AgentId, GridPos)` pairs.  Agents with an
//! invalid position are skipped.  Used at population build time to wire up
//! social neighbourhoods; the tick loop never queries it.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use mob_core::{AgentId, GridPos};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct AgentEntry {
    point: [f64; 2],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

#[inline]
fn to_point(pos: GridPos) -> [f64; 2] {
    [f64::from(pos.x), f64::from(pos.y)]
}

// ── NeighborIndex ─────────────────────────────────────────────────────────────

pub struct NeighborIndex {
    tree: RTree<AgentEntry>,
}

impl NeighborIndex {
    pub fn build(positions: impl IntoIterator<Item = (AgentId, GridPos)>) -> Self {
        let entries: Vec<AgentEntry> = positions
            .into_iter()
            .filter(|(_, pos)| pos.is_valid())
            .map(|(id, pos)| AgentEntry { point: to_point(pos), id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Up to `k` agents nearest to `pos`, closest first, never including
    /// `exclude`.  Equal distances are ordered by ascending id.
    pub fn k_nearest(&self, pos: GridPos, k: usize, exclude: Option<AgentId>) -> Vec<AgentId> {
        if !pos.is_valid() || k == 0 {
            return Vec::new();
        }
        let p = to_point(pos);
        let mut found: Vec<(f64, AgentId)> = Vec::new();
        for entry in self.tree.nearest_neighbor_iter(&p) {
            if Some(entry.id) == exclude {
                continue;
            }
            let d2 = entry.distance_2(&p);
            // keep collecting through a tie at the cut-off distance
            if found.len() >= k && found.last().is_some_and(|&(last, _)| d2 > last) {
                break;
            }
            found.push((d2, entry.id));
        }
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        found.truncate(k);
        found.into_iter().map(|(_, id)| id).collect()
    }

    /// Every agent within `radius` cells of `pos` (inclusive), sorted by id.
    pub fn within_radius(&self, pos: GridPos, radius: f64) -> Vec<AgentId> {
        if !pos.is_valid() || radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }
        let mut ids: Vec<AgentId> = self
            .tree
            .locate_within_distance(to_point(pos), radius * radius)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
