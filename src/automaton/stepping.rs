//! Generation advancement.

use super::{
    grid::Grid,
    rule::{NeighborSet, RuleSet},
};

/// Computes the next generation of `grid`.
///
/// Every cell is evaluated against the unmodified `grid`, so the result is
/// the same regardless of the order in which cells are visited. A live cell
/// survives iff its neighbor count is in `survival`; a dead cell is born iff
/// its neighbor count is in `birth`.
pub fn step(grid: &Grid, birth: NeighborSet, survival: NeighborSet) -> Grid {
    let rules = RuleSet::new(birth, survival);
    let mut next = Grid::new(grid.size());
    for ((x, y), alive) in grid.iter() {
        if rules.next_state(alive, grid.count_live_neighbors(x, y)) {
            next.set(x, y, true);
        }
    }
    next
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::automaton::{
        grid::test::{arb_grid, grid_with},
        rule::{CONWAY, RULE_PRESETS},
    };

    fn life(grid: &Grid) -> Grid {
        step(grid, CONWAY.birth, CONWAY.survival)
    }

    #[test]
    fn block_is_still_life() {
        let block = grid_with(6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(block, life(&block));

        // also at a corner, where part of the neighborhood is off the grid
        let corner = grid_with(4, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(corner, life(&corner));
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = grid_with(5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = grid_with(5, &[(1, 2), (2, 2), (3, 2)]);

        let once = life(&horizontal);
        assert_eq!(vertical, once);
        assert_eq!(horizontal, life(&once));
    }

    #[test]
    fn update_is_synchronous() {
        // a row-major in-place sweep would let (2, 1) see the newborn (1, 2)
        // and survive
        let grid = grid_with(5, &[(2, 1), (2, 2), (2, 3)]);
        let next = life(&grid);
        assert!(next.get(1, 2));
        assert!(!next.get(2, 1));
        assert!(!next.get(2, 3));
        assert_eq!(3, next.population());
    }

    #[test]
    fn seeds_kills_every_live_cell() {
        let seeds = RULE_PRESETS
            .iter()
            .find(|preset| preset.name == "Seeds")
            .unwrap()
            .rules;
        let grid = grid_with(5, &[(2, 1), (2, 2)]);
        let next = step(&grid, seeds.birth, seeds.survival);
        assert!(!next.get(2, 1));
        assert!(!next.get(2, 2));
        assert!(next.get(1, 1));
        assert!(next.get(3, 2));
    }

    proptest! {
        #[test]
        fn empty_rules_kill_everything(grid in arb_grid()) {
            let next = step(&grid, NeighborSet::EMPTY, NeighborSet::EMPTY);
            prop_assert_eq!(0, next.population());
            prop_assert_eq!(grid.size(), next.size());
        }

        #[test]
        fn step_is_pure(grid in arb_grid(), birth in 0..512_u16, survival in 0..512_u16) {
            let birth: NeighborSet = (0..=8).filter(|n| birth & 1 << n != 0).collect();
            let survival: NeighborSet = (0..=8).filter(|n| survival & 1 << n != 0).collect();
            let snapshot = grid.clone();
            let a = step(&grid, birth, survival);
            let b = step(&grid, birth, survival);
            prop_assert_eq!(a, b);
            prop_assert_eq!(snapshot, grid);
        }
    }
}
