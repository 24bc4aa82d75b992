//! Game configuration.
//!
//! A table is configured once at creation: how many players sit down,
//! which power pool is in play and how powers are distributed.
//!
//! ```
//! use santorini_engine::core::{GameConfig, PowerOption, SetupMode};
//!
//! let config = GameConfig::new(2)
//!     .with_powers(PowerOption::AllGods)
//!     .with_setup(SetupMode::Quick)
//!     .with_seed(9);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::powers::PowerRegistry;

use super::error::{Result, UserActionError};

/// Which powers are in play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerOption {
    /// Base game, no powers.
    None,
    /// The ten simple gods.
    SimpleGods,
    /// Simple and advanced gods.
    #[default]
    AllGods,
    /// Heroes only.
    Heroes,
    /// Gods and heroes mixed.
    GodsAndHeroes,
    /// One power shared through the Ram figure.
    GoldenFleece,
}

impl PowerOption {
    #[must_use]
    pub fn is_golden_fleece(self) -> bool {
        self == PowerOption::GoldenFleece
    }
}

/// How powers are distributed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetupMode {
    /// Random powers, no offer building.
    #[default]
    Quick,
    /// Random pool of `(n + 1) * 2` powers, then fair division.
    Tournament,
    /// The contestant builds the offer from the whole pool.
    Custom,
}

/// Table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player_count: usize,
    pub powers: PowerOption,
    pub setup: SetupMode,
    pub seed: u64,
}

impl GameConfig {
    /// Configuration with default power option and setup.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            powers: PowerOption::default(),
            setup: SetupMode::default(),
            seed: 0,
        }
    }

    #[must_use]
    pub fn with_powers(mut self, powers: PowerOption) -> Self {
        self.powers = powers;
        self
    }

    #[must_use]
    pub fn with_setup(mut self, setup: SetupMode) -> Self {
        self.setup = setup;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject tables the rules do not support, including power pools too
    /// small for the chosen setup.
    pub fn validate(&self) -> Result<()> {
        if !(2..=4).contains(&self.player_count) {
            return Err(UserActionError::UnsupportedPlayerCount(self.player_count).into());
        }
        PowerRegistry::standard().check_setup(self)
    }
}
