//! Unit tests for mob-spatial.

#[cfg(test)]
mod grid {
    use mob_core::{AgentId, AgentRng, Coord, GridPos};

    use crate::{GridSpace, SpatialError};

    #[test]
    fn rejects_empty_dimensions() {
        assert!(matches!(GridSpace::new(0, 5), Err(SpatialError::EmptyGrid { .. })));
        assert!(GridSpace::new(-3, 5).is_err());
        assert_eq!(GridSpace::new(10, 4).unwrap().bounds(), (10, 4));
    }

    #[test]
    fn contains_and_check() {
        let g = GridSpace::new(10, 10).unwrap();
        assert!(g.contains(GridPos::new(0, 9)));
        assert!(!g.contains(GridPos::new(10, 0)));
        assert!(!g.contains(GridPos::new(-1, 0)));
        assert!(!g.contains(GridPos::INVALID));
        assert!(g.check(GridPos::new(3, 3)).is_ok());
        assert!(matches!(g.check(GridPos::new(3, 30)), Err(SpatialError::OutOfBounds(_))));
    }

    #[test]
    fn clamp_cells() {
        let g = GridSpace::new(50, 50).unwrap();
        assert_eq!(g.clamp(GridPos::new(-4, 70)), GridPos::new(0, 49));
        assert_eq!(g.clamp(GridPos::new(7, 8)), GridPos::new(7, 8));
        assert_eq!(g.clamp(GridPos::INVALID), GridPos::INVALID);
    }

    #[test]
    fn clamp_coords_truncate_then_clamp() {
        let g = GridSpace::new(50, 50).unwrap();
        assert_eq!(g.clamp_coord(Coord::new(12.9, 3.2)), Some(GridPos::new(12, 3)));
        assert_eq!(g.clamp_coord(Coord::new(-0.5, 99.0)), Some(GridPos::new(0, 49)));
        assert_eq!(g.clamp_coord(Coord::new(f64::NAN, 1.0)), None);
        assert_eq!(g.clamp_coord(Coord::new(1.0, f64::INFINITY)), None);
    }

    #[test]
    fn random_positions_are_in_bounds() {
        let g = GridSpace::new(7, 3).unwrap();
        let mut rng = AgentRng::new(5, AgentId(0));
        for _ in 0..500 {
            assert!(g.contains(g.random_position(rng.inner())));
        }
    }
}

#[cfg(test)]
mod neighbors {
    use mob_core::{AgentId, GridPos};

    use crate::NeighborIndex;

    fn line() -> NeighborIndex {
        NeighborIndex::build([
            (AgentId(0), GridPos::new(0, 0)),
            (AgentId(1), GridPos::new(1, 0)),
            (AgentId(2), GridPos::new(2, 0)),
            (AgentId(3), GridPos::new(10, 0)),
            (AgentId(4), GridPos::INVALID),
        ])
    }

    #[test]
    fn invalid_positions_are_skipped() {
        assert_eq!(line().len(), 4);
    }

    #[test]
    fn k_nearest_excludes_self() {
        let idx = line();
        let n = idx.k_nearest(GridPos::new(0, 0), 2, Some(AgentId(0)));
        assert_eq!(n, vec![AgentId(1), AgentId(2)]);
    }

    #[test]
    fn k_nearest_ties_break_by_id() {
        let idx = line();
        // 0 and 2 are both 1 cell from (1, 0)
        let n = idx.k_nearest(GridPos::new(1, 0), 1, Some(AgentId(1)));
        assert_eq!(n, vec![AgentId(0)]);
    }

    #[test]
    fn k_larger_than_population() {
        let idx = line();
        assert_eq!(idx.k_nearest(GridPos::new(0, 0), 10, None).len(), 4);
        assert!(idx.k_nearest(GridPos::INVALID, 3, None).is_empty());
    }

    #[test]
    fn within_radius_is_inclusive() {
        let idx = line();
        let ids = idx.within_radius(GridPos::new(0, 0), 2.0);
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert!(idx.within_radius(GridPos::new(0, 0), -1.0).is_empty());
    }
}
