//! Core engine types: players, turn order, state, errors, statistics, RNG, configuration.
//!
//! This module contains the building blocks every other layer shares.
//! Tables are configured via `GameConfig` rather than by modifying the core.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;
pub mod stats;
pub mod turn_order;

pub use config::{GameConfig, PowerOption, SetupMode};
pub use error::{EngineError, InvariantViolation, Result, RuleConflictError, UserActionError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
pub use stats::{StatDelta, StatName, StatScope, Stats};
pub use turn_order::TurnOrder;
