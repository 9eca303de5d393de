//! Birth/survival rules for 2-state Moore-neighborhood automata.
//!
//! Rules are written in the usual `B3/S23` notation: the digits after `B`
//! are the neighbor counts at which a dead cell is born, and the digits after
//! `S` are the neighbor counts at which a live cell survives.

use std::{fmt, str::FromStr};

use regex::Regex;
use thiserror::Error;

/// Largest neighbor count possible in a Moore neighborhood.
pub const MAX_NEIGHBORS: u8 = 8;

const NEIGHBOR_MASK: u16 = (1 << (MAX_NEIGHBORS + 1)) - 1;

lazy_static::lazy_static! {
    /// Matches `B<digits>/S<digits>`, with the slash optional.
    static ref RULESTRING_REGEX: Regex = Regex::new(r"^[Bb](\d*)/?[Ss](\d*)$").unwrap();
}

/// Set of neighbor counts in `0..=8`, stored as a bitset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborSet(u16);

impl NeighborSet {
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a list of counts. Counts above 8 can never occur and
    /// are dropped.
    pub const fn from_counts(counts: &[u8]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < counts.len() {
            if counts[i] <= MAX_NEIGHBORS {
                bits |= 1 << counts[i];
            }
            i += 1;
        }
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn contains(self, count: u8) -> bool {
        count <= MAX_NEIGHBORS && self.0 & (1 << count) != 0
    }

    pub fn insert(&mut self, count: u8) {
        self.0 = (self.0 | 1 << count.min(15)) & NEIGHBOR_MASK;
    }

    pub fn remove(&mut self, count: u8) {
        if count <= MAX_NEIGHBORS {
            self.0 &= !(1 << count);
        }
    }

    /// Flips membership of `count`, returning whether it is now present.
    pub fn toggle(&mut self, count: u8) -> bool {
        if self.contains(count) {
            self.remove(count);
            false
        } else {
            self.insert(count);
            self.contains(count)
        }
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the member counts in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_NEIGHBORS).filter(move |&n| self.contains(n))
    }
}

impl FromIterator<u8> for NeighborSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for count in iter {
            set.insert(count);
        }
        set
    }
}

impl fmt::Display for NeighborSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for count in self.iter() {
            write!(f, "{}", count)?;
        }
        Ok(())
    }
}

/// Error returned when parsing a rulestring fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("expected a rulestring like B3/S23, got {0:?}")]
    Malformed(String),
    #[error("neighbor count out of range: {0}")]
    CountOutOfRange(char),
}

/// Birth and survival conditions of a life-like rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSet {
    pub birth: NeighborSet,
    pub survival: NeighborSet,
}

impl RuleSet {
    pub const fn new(birth: NeighborSet, survival: NeighborSet) -> Self {
        Self { birth, survival }
    }

    /// Returns whether a cell is alive next generation.
    #[inline]
    pub const fn next_state(&self, alive: bool, live_neighbors: u8) -> bool {
        if alive {
            self.survival.contains(live_neighbors)
        } else {
            self.birth.contains(live_neighbors)
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        CONWAY
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", self.birth, self.survival)
    }
}

impl FromStr for RuleSet {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let captures = RULESTRING_REGEX
            .captures(s)
            .ok_or_else(|| RuleParseError::Malformed(s.to_owned()))?;
        let parse_counts = |digits: &str| {
            digits
                .chars()
                .map(|ch| match ch.to_digit(10) {
                    Some(n) if n <= MAX_NEIGHBORS as u32 => Ok(n as u8),
                    _ => Err(RuleParseError::CountOutOfRange(ch)),
                })
                .collect::<Result<NeighborSet, _>>()
        };
        Ok(Self {
            birth: parse_counts(&captures[1])?,
            survival: parse_counts(&captures[2])?,
        })
    }
}

/// Conway's Game of Life.
pub const CONWAY: RuleSet = RuleSet::new(
    NeighborSet::from_counts(&[3]),
    NeighborSet::from_counts(&[2, 3]),
);

/// A named rule in the preset palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulePreset {
    pub name: &'static str,
    pub rules: RuleSet,
}

const fn preset(name: &'static str, birth: &[u8], survival: &[u8]) -> RulePreset {
    RulePreset {
        name,
        rules: RuleSet::new(
            NeighborSet::from_counts(birth),
            NeighborSet::from_counts(survival),
        ),
    }
}

pub const RULE_PRESETS: &[RulePreset] = &[
    RulePreset {
        name: "Conway",
        rules: CONWAY,
    },
    preset("HighLife", &[3, 6], &[2, 3]),
    preset("Seeds", &[2], &[]),
    preset("Day & Night", &[3, 6, 7, 8], &[3, 4, 6, 7, 8]),
    preset("Life without Death", &[3], &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
    preset("Maze", &[3], &[1, 2, 3, 4, 5]),
    preset("Replicator", &[1, 3, 5, 7], &[1, 3, 5, 7]),
    preset("2x2", &[3, 6], &[1, 2, 5]),
];

/// Cursor into [`RULE_PRESETS`] that wraps around at the end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PresetCycle {
    index: usize,
}

impl PresetCycle {
    pub fn current(&self) -> &'static RulePreset {
        &RULE_PRESETS[self.index % RULE_PRESETS.len()]
    }

    /// Moves to the following preset and returns it.
    pub fn advance(&mut self) -> &'static RulePreset {
        self.index = (self.index + 1) % RULE_PRESETS.len();
        self.current()
    }
}
