//! Which player currently holds which power.

use crate::core::error::{InvariantViolation, Result};
use crate::core::{PlayerId, PlayerMap};

use super::capability::{CapabilityFactory, PowerCapability};
use super::definition::PowerId;
use super::variants;

/// A power bound to its owner, or unbound for a shared object nobody holds.
#[derive(Clone, Copy)]
pub struct BoundPower {
    pub id: PowerId,
    pub owner: Option<PlayerId>,
    make: CapabilityFactory,
}

impl BoundPower {
    #[must_use]
    pub fn new(id: PowerId, owner: Option<PlayerId>, make: CapabilityFactory) -> Self {
        Self { id, owner, make }
    }

    /// Bind a catalog power, failing if it has no capability.
    pub fn from_catalog(id: PowerId, owner: Option<PlayerId>) -> Result<Self> {
        let make = variants::factory(id).ok_or(InvariantViolation::NotImplemented(id))?;
        Ok(Self::new(id, owner, make))
    }

    /// Fresh capability instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn PowerCapability> {
        (self.make)()
    }
}

impl PartialEq for BoundPower {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.owner == other.owner
    }
}

impl Eq for BoundPower {}

impl std::fmt::Debug for BoundPower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundPower")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish()
    }
}

/// Per-player bound powers plus the Golden Fleece power, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerHoldings {
    players: PlayerMap<Vec<BoundPower>>,
    shared: Option<PowerId>,
}

impl PowerHoldings {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            players: PlayerMap::with_default(player_count),
            shared: None,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Give a catalog power to a player. Holding it already is a no-op.
    pub fn grant(&mut self, player: PlayerId, id: PowerId) -> Result<()> {
        if self.holds(player, id) {
            return Ok(());
        }
        let bound = BoundPower::from_catalog(id, Some(player))?;
        self.players[player].push(bound);
        Ok(())
    }

    /// Give a player a capability built by `make`.
    pub fn bind(&mut self, player: PlayerId, id: PowerId, make: CapabilityFactory) {
        self.players[player].push(BoundPower::new(id, Some(player), make));
    }

    /// Take a power away. Returns whether the player held it.
    pub fn revoke(&mut self, player: PlayerId, id: PowerId) -> bool {
        let powers = &mut self.players[player];
        let before = powers.len();
        powers.retain(|p| p.id != id);
        powers.len() != before
    }

    #[must_use]
    pub fn holds(&self, player: PlayerId, id: PowerId) -> bool {
        self.players[player].iter().any(|p| p.id == id)
    }

    /// Bound powers of a player in registration order.
    #[must_use]
    pub fn powers_of(&self, player: PlayerId) -> &[BoundPower] {
        &self.players[player]
    }

    #[must_use]
    pub fn power_ids(&self, player: PlayerId) -> Vec<PowerId> {
        self.players[player].iter().map(|p| p.id).collect()
    }

    /// Set the power granted by the Ram figure.
    pub fn set_shared(&mut self, id: PowerId) {
        self.shared = Some(id);
    }

    #[must_use]
    pub fn shared(&self) -> Option<PowerId> {
        self.shared
    }

    /// The Ram power as an unbound capability.
    pub fn shared_unbound(&self) -> Option<Result<BoundPower>> {
        self.shared.map(|id| BoundPower::from_catalog(id, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_and_revoke() {
        let mut holdings = PowerHoldings::new(2);
        holdings.grant(PlayerId(1), PowerId::Pan).unwrap();
        holdings.grant(PlayerId(1), PowerId::Pan).unwrap();
        assert_eq!(holdings.power_ids(PlayerId(1)), vec![PowerId::Pan]);
        assert!(holdings.powers_of(PlayerId(0)).is_empty());

        assert!(holdings.revoke(PlayerId(1), PowerId::Pan));
        assert!(!holdings.revoke(PlayerId(1), PowerId::Pan));
    }

    #[test]
    fn test_unimplemented_power_cannot_be_granted() {
        let mut holdings = PowerHoldings::new(2);
        let err = holdings.grant(PlayerId(0), PowerId::Aphrodite).unwrap_err();
        assert_eq!(err, InvariantViolation::NotImplemented(PowerId::Aphrodite).into());
    }

    #[test]
    fn test_shared_power_is_unbound() {
        let mut holdings = PowerHoldings::new(3);
        assert!(holdings.shared_unbound().is_none());

        holdings.set_shared(PowerId::Atlas);
        let bound = holdings.shared_unbound().unwrap().unwrap();
        assert_eq!(bound.owner, None);
        assert_eq!(bound.instantiate().id(), PowerId::Atlas);
    }
}
