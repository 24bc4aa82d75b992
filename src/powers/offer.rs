//! Fair-division offer building.
//!
//! In tournament and custom setups the contestant moves powers from a
//! deck into the offer one at a time. A power banned against anything
//! already offered cannot be added.

use std::collections::BTreeSet;

use crate::core::error::{Result, UserActionError};

use super::definition::PowerId;
use super::registry::PowerRegistry;

/// An offer under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Offer {
    target: usize,
    deck: Vec<PowerId>,
    powers: Vec<PowerId>,
}

impl Offer {
    /// Offer of `target` powers drawn from `deck`.
    #[must_use]
    pub fn new(target: usize, deck: Vec<PowerId>) -> Self {
        Self {
            target,
            deck,
            powers: Vec::new(),
        }
    }

    #[must_use]
    pub fn powers(&self) -> &[PowerId] {
        &self.powers
    }

    #[must_use]
    pub fn deck(&self) -> &[PowerId] {
        &self.deck
    }

    /// Powers banned against the current offer.
    #[must_use]
    pub fn banned(&self, registry: &PowerRegistry) -> BTreeSet<PowerId> {
        registry.banned_ids(&self.powers)
    }

    /// Move a power from the deck into the offer.
    pub fn add(&mut self, registry: &PowerRegistry, id: PowerId) -> Result<()> {
        if self.powers.contains(&id) {
            return Err(UserActionError::AlreadyOffered(id).into());
        }
        let Some(pos) = self.deck.iter().position(|p| *p == id) else {
            return Err(UserActionError::PowerNotOffered(id).into());
        };
        if self.banned(registry).contains(&id) {
            return Err(UserActionError::BannedPower(id).into());
        }
        if self.powers.len() >= self.target {
            return Err(UserActionError::OfferSize {
                expected: self.target,
                actual: self.powers.len() + 1,
            }
            .into());
        }
        self.deck.remove(pos);
        self.powers.push(id);
        Ok(())
    }

    /// Return a power from the offer to the deck.
    pub fn remove(&mut self, id: PowerId) -> Result<()> {
        let pos = self
            .powers
            .iter()
            .position(|p| *p == id)
            .ok_or(UserActionError::NotInOffer(id))?;
        self.powers.remove(pos);
        self.deck.push(id);
        Ok(())
    }

    /// Finish building; the offer must be exactly full.
    pub fn confirm(&self) -> Result<Vec<PowerId>> {
        if self.powers.len() != self.target {
            return Err(UserActionError::OfferSize {
                expected: self.target,
                actual: self.powers.len(),
            }
            .into());
        }
        Ok(self.powers.clone())
    }

    /// A player takes a power out of the confirmed offer.
    pub fn claim(&mut self, id: PowerId) -> Result<PowerId> {
        let pos = self
            .powers
            .iter()
            .position(|p| *p == id)
            .ok_or(UserActionError::PowerNotOffered(id))?;
        Ok(self.powers.remove(pos))
    }
}
