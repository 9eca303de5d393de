//! Life-like cellular automaton engine.
//!
//! This module knows nothing about rendering or input. The Bevy plugins in
//! the rest of the crate own an [`Automaton`] and call into it.

pub mod grid;
pub mod rule;
pub mod stepping;

pub use grid::{toggle_cell, Grid, GridError};
pub use rule::{
    NeighborSet, PresetCycle, RuleParseError, RulePreset, RuleSet, CONWAY, RULE_PRESETS,
};
pub use stepping::step;

/// A single simulation: the current grid, the rules it runs under, and how
/// many generations have elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    grid: Grid,
    rules: RuleSet,
    generation: u64,
}

impl Automaton {
    pub fn new(size: usize, rules: RuleSet) -> Self {
        Self {
            grid: Grid::new(size),
            rules,
            generation: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    #[inline]
    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances one generation.
    pub fn step(&mut self) {
        self.grid = step(&self.grid, self.rules.birth, self.rules.survival);
        self.generation += 1;
    }

    /// Flips one cell immediately and returns its new state.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> bool {
        self.grid.toggle(x, y)
    }

    /// Kills every cell and restarts the generation count. Rules are kept.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.generation = 0;
    }

    /// Fills the grid with coin flips.
    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        self.grid.fill_with(|_, _| rng.bool());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn automaton_works() {
        let mut automaton = Automaton::new(5, CONWAY);
        for y in 1..=3 {
            automaton.toggle_cell(2, y);
        }
        assert_eq!(3, automaton.grid().population());

        automaton.step();
        assert_eq!(1, automaton.generation());
        assert!(automaton.grid().get(1, 2));
        assert!(automaton.grid().get(3, 2));
        assert!(!automaton.grid().get(2, 1));

        // edits between steps are seen by the next step
        assert!(!automaton.toggle_cell(1, 2));
        automaton.step();
        assert_eq!(2, automaton.generation());
        assert_eq!(0, automaton.grid().population());

        automaton.reset();
        assert_eq!(0, automaton.generation());
        assert_eq!(Grid::new(5), *automaton.grid());
    }

    #[test]
    fn rules_can_change_between_steps() {
        let mut automaton = Automaton::new(4, CONWAY);
        automaton.toggle_cell(1, 1);
        automaton.rules_mut().survival.insert(0);
        automaton.step();
        assert!(automaton.grid().get(1, 1));

        automaton.set_rules(RuleSet::new(NeighborSet::EMPTY, NeighborSet::EMPTY));
        automaton.step();
        assert_eq!(0, automaton.grid().population());
        assert_eq!("B/S", automaton.rules().to_string());
    }

    #[test]
    fn randomize_is_seeded() {
        let mut a = Automaton::new(16, CONWAY);
        let mut b = Automaton::new(16, CONWAY);
        a.randomize(&mut fastrand::Rng::with_seed(7));
        b.randomize(&mut fastrand::Rng::with_seed(7));
        assert_eq!(a, b);
        assert!(a.grid().population() > 0);
        assert!(a.grid().population() < 256);
    }
}
