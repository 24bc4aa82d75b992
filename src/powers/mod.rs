//! Powers: catalog, registry, holdings and capabilities.
//!
//! ## Key Components
//!
//! - [`PowerDefinition`]: immutable metadata of one power
//! - [`PowerRegistry`]: catalog lookup, banned matchups, fair offers
//! - [`PowerCapability`]: the hook contract every power implements
//! - [`PowerHoldings`]: which player holds which power right now
//!
//! ## Binding
//!
//! A power is bound to a player through [`PowerHoldings::grant`], which
//! resolves the capability constructor from the explicit [`variants::factory`]
//! table. Instances are created per hook call and carry no state.

mod capability;
mod catalog;
mod definition;
mod holdings;
mod offer;
mod registry;
pub mod variants;

pub use capability::{CapabilityFactory, Handled, PowerCapability, Transition};
pub use catalog::{BANNED_MATCHUPS, CATALOG};
pub use definition::{PowerDefinition, PowerId, PowerKind};
pub use holdings::{BoundPower, PowerHoldings};
pub use offer::Offer;
pub use registry::{PowerRegistry, SetupPlan};
