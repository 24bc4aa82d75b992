//! # santorini-engine
//!
//! A rules engine for Santorini with pluggable god and hero powers.
//!
//! ## Design Principles
//!
//! 1. **Capabilities, not subclasses**: every power implements the
//!    [`PowerCapability`] hook contract; the engine never asks which power
//!    it is talking to.
//!
//! 2. **One dispatch order**: the [`HookDispatcher`] always consults the
//!    active player's powers first, then each opponent in seating order.
//!
//! 3. **Everything is logged**: every board or holding change made during
//!    a turn lands in the [`ActionLog`] and can be undone exactly.
//!
//! ## Modules
//!
//! - `core`: players, seating, configuration, RNG, statistics, game state
//! - `board`: spaces, pieces and the board itself
//! - `log`: the append-only action log with rollback and its store seam
//! - `powers`: catalog, registry, offers, holdings and capabilities
//! - `hooks`: hook arguments, contexts and the dispatcher
//! - `turn`: the turn state machine

pub mod board;
pub mod core;
pub mod hooks;
pub mod log;
pub mod powers;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GameConfig, GameRng, GameState, PlayerId, PlayerMap, PowerOption, Result, SetupMode,
    TurnOrder,
};

pub use crate::board::{Board, Piece, PieceId, Space, Work, WorkKind};

pub use crate::log::{ActionKind, ActionLog, LogEntry, LogStore, MemoryLogStore, SequenceId, Tag};

pub use crate::powers::{
    Handled, Offer, PowerCapability, PowerDefinition, PowerHoldings, PowerId, PowerKind, PowerRegistry,
    SetupPlan, Transition,
};

pub use crate::hooks::{HookCtx, HookCtxMut, HookDispatcher, StateHook, WinArg, WorkArg};

pub use crate::turn::{GameResult, TurnMachine, TurnPhase};
