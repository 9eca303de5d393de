//! Per-run configuration.
//!
//! The app ships three variants of the same simulation. They differ in board
//! size and in which controls are available:
//!
//! - `classic`: 40×40, Conway's rules, speed presets
//! - `editable`: 100×100, birth/survival counts toggled from the keyboard
//! - `palette`: 100×100, cycling through named rule presets, speed typed in
//!   as a percentage

use std::{str::FromStr, time::Duration};

use bevy::prelude::*;
use thiserror::Error;

use crate::{
    automaton::{RuleSet, CONWAY, RULE_PRESETS},
    prelude::*,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Classic,
    Editable,
    Palette,
}

/// How the tick period is changed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedControl {
    Presets,
    Percentage,
}

impl Variant {
    pub fn board_size(self) -> usize {
        match self {
            Self::Classic => CLASSIC_BOARD_SIZE,
            Self::Editable | Self::Palette => LARGE_BOARD_SIZE,
        }
    }

    pub fn speed_control(self) -> SpeedControl {
        match self {
            Self::Classic | Self::Editable => SpeedControl::Presets,
            Self::Palette => SpeedControl::Percentage,
        }
    }

    pub fn editable_rules(self) -> bool {
        self == Self::Editable
    }

    pub fn rule_presets(self) -> bool {
        self == Self::Palette
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown variant {0:?} (expected classic, editable or palette)")]
pub struct VariantParseError(String);

impl FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "editable" => Ok(Self::Editable),
            "palette" => Ok(Self::Palette),
            _ => Err(VariantParseError(s.to_owned())),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LifeConfig {
    pub variant: Variant,
    /// the amount of cells on each axis
    pub board_size: usize,
    pub rules: RuleSet,
    pub period: Duration,
    /// side length of each cell in pixels
    pub cell_size: f32,
}

impl LifeConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let board_size = variant.board_size();
        let rules = if variant.rule_presets() {
            RULE_PRESETS[0].rules
        } else {
            CONWAY
        };
        Self {
            variant,
            board_size,
            rules,
            period: DEFAULT_TICK_PERIOD,
            cell_size: BOARD_PIXEL_SIZE / board_size as f32,
        }
    }

    pub fn classic() -> Self {
        Self::for_variant(Variant::Classic)
    }

    pub fn editable() -> Self {
        Self::for_variant(Variant::Editable)
    }

    pub fn palette() -> Self {
        Self::for_variant(Variant::Palette)
    }

    /// Reads the variant and optional starting rule from the environment.
    /// Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(VARIANT_ENV_VAR).ok().as_deref(),
            std::env::var(RULE_ENV_VAR).ok().as_deref(),
        )
    }

    fn from_vars(variant: Option<&str>, rule: Option<&str>) -> Self {
        let variant = variant.map_or(Ok(Variant::default()), |s| s.parse::<Variant>());
        let mut config = Self::for_variant(variant.unwrap_or_else(|err| {
            warn!("{err}, falling back to the classic variant");
            Variant::default()
        }));
        // the palette variant always starts on its first preset
        if let Some(rule) = rule.filter(|_| !config.variant.rule_presets()) {
            match rule.parse() {
                Ok(rules) => config.rules = rules,
                Err(err) => warn!("ignoring {RULE_ENV_VAR}: {err}"),
            }
        }
        config
    }
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn variants() {
        assert_eq!(Ok(Variant::Palette), "Palette".parse::<Variant>());
        assert_eq!(Ok(Variant::Editable), " editable ".parse::<Variant>());
        assert!("huge".parse::<Variant>().is_err());

        let classic = LifeConfig::classic();
        assert_eq!(40, classic.board_size);
        assert_eq!(CONWAY, classic.rules);
        assert_eq!(SpeedControl::Presets, classic.variant.speed_control());
        assert_eq!(BOARD_PIXEL_SIZE, classic.board_size as f32 * classic.cell_size);

        let palette = LifeConfig::palette();
        assert_eq!(100, palette.board_size);
        assert!(palette.variant.rule_presets());
        assert!(!palette.variant.editable_rules());
        assert_eq!(SpeedControl::Percentage, palette.variant.speed_control());
    }

    #[test]
    fn config_from_vars() {
        assert_eq!(LifeConfig::classic(), LifeConfig::from_vars(None, None));
        assert_eq!(
            LifeConfig::classic(),
            LifeConfig::from_vars(Some("nonsense"), Some("not a rule"))
        );

        let highlife = LifeConfig::from_vars(Some("editable"), Some("B36/S23"));
        assert_eq!(Variant::Editable, highlife.variant);
        assert_eq!("B36/S23", highlife.rules.to_string());

        let palette = LifeConfig::from_vars(Some("palette"), Some("B2/S"));
        assert_eq!(RULE_PRESETS[0].rules, palette.rules);
    }
}
