//! Extension points and their dispatch.
//!
//! ## Key Components
//!
//! - [`HookDispatcher`]: self-then-opponents invocation and next-state resolution
//! - [`HookCtx`] / [`HookCtxMut`]: what a capability sees of the game
//! - [`WorkArg`], [`WorkFilter`], [`WinArg`], ...: per-call extension arguments

mod arg;
mod context;
mod dispatcher;

pub use arg::{
    FirstPlayerArg, PlaceWorkerArg, UsePowerArg, WinArg, WorkArg, WorkFilter, WorkOption, WorkerOption,
};
pub use context::{HookCtx, HookCtxMut};
pub use dispatcher::{HookDispatcher, StateHook};
