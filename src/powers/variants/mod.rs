//! Concrete capabilities, one per implemented power.
//!
//! [`factory`] is the explicit id-to-constructor table; powers missing
//! from it are listed in the catalog but cannot be played.

mod apollo;
mod artemis;
mod athena;
mod atlas;
mod bia;
mod castor;
mod chronus;
mod demeter;
mod hecate;
mod hephaestus;
mod hera;
mod hermes;
mod hydra;
mod maenads;
mod minotaur;
mod pan;
mod prometheus;
mod selene;
mod zeus;

pub use apollo::Apollo;
pub use artemis::Artemis;
pub use athena::Athena;
pub use atlas::Atlas;
pub use bia::Bia;
pub use castor::Castor;
pub use chronus::Chronus;
pub use demeter::Demeter;
pub use hecate::Hecate;
pub use hephaestus::Hephaestus;
pub use hera::Hera;
pub use hermes::Hermes;
pub use hydra::Hydra;
pub use maenads::Maenads;
pub use minotaur::Minotaur;
pub use pan::Pan;
pub use prometheus::Prometheus;
pub use selene::Selene;
pub use zeus::Zeus;

use crate::board::Piece;
use crate::hooks::HookCtx;

use super::capability::{CapabilityFactory, PowerCapability};
use super::definition::PowerId;

/// Constructor of an implemented power.
#[must_use]
pub fn factory(id: PowerId) -> Option<CapabilityFactory> {
    fn make<C: PowerCapability + Default + 'static>() -> Box<dyn PowerCapability> {
        Box::new(C::default())
    }

    let make: CapabilityFactory = match id {
        PowerId::Apollo => make::<Apollo>,
        PowerId::Artemis => make::<Artemis>,
        PowerId::Athena => make::<Athena>,
        PowerId::Atlas => make::<Atlas>,
        PowerId::Demeter => make::<Demeter>,
        PowerId::Hephaestus => make::<Hephaestus>,
        PowerId::Hermes => make::<Hermes>,
        PowerId::Minotaur => make::<Minotaur>,
        PowerId::Pan => make::<Pan>,
        PowerId::Prometheus => make::<Prometheus>,
        PowerId::Bia => make::<Bia>,
        PowerId::Chronus => make::<Chronus>,
        PowerId::Hera => make::<Hera>,
        PowerId::Selene => make::<Selene>,
        PowerId::Zeus => make::<Zeus>,
        PowerId::Hecate => make::<Hecate>,
        PowerId::Castor => make::<Castor>,
        PowerId::Maenads => make::<Maenads>,
        PowerId::Hydra => make::<Hydra>,
        _ => return None,
    };
    Some(make)
}

/// Visible worker of a rival team standing in column `(x, y)`.
fn opponent_worker_at(ctx: &HookCtx<'_>, x: u8, y: u8) -> Option<Piece> {
    ctx.board()
        .worker_at(x, y)
        .filter(|w| ctx.is_opponent_piece(w))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powers::CATALOG;

    #[test]
    fn test_factory_matches_catalog() {
        for def in CATALOG {
            let made = factory(def.id).map(|make| make().id());
            if def.implemented {
                assert_eq!(made, Some(def.id), "{} has no capability", def.id);
            } else {
                assert_eq!(made, None, "{} is not flagged implemented", def.id);
            }
        }
    }
}
