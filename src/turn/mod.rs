//! Turn flow: phases, results and the state machine that walks them.
//!
//! ## Key Components
//!
//! - [`TurnPhase`]: where the machine currently stands
//! - [`TurnMachine`]: drives placement, works, powers and end of turn
//! - [`GameResult`]: who won

mod machine;
mod phase;

pub use machine::TurnMachine;
pub use phase::{GameResult, TurnPhase};
