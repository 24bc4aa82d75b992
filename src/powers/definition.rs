//! Power identifiers and static definitions.

use serde::{Deserialize, Serialize};

/// Every power of the catalog, numbered from 1 in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum PowerId {
    Apollo = 1,
    Artemis,
    Athena,
    Atlas,
    Demeter,
    Hephaestus,
    Hermes,
    Minotaur,
    Pan,
    Prometheus,
    Aphrodite,
    Ares,
    Bia,
    Chaos,
    Charon,
    Chronus,
    Circe,
    Dionysus,
    Eros,
    Hera,
    Hestia,
    Hypnus,
    Limus,
    Medusa,
    Morpheus,
    Persephone,
    Poseidon,
    Selene,
    Triton,
    Zeus,
    Aeolus,
    Charybdis,
    Clio,
    Europa,
    Gaea,
    Graeae,
    Hades,
    Harpies,
    Hecate,
    Moerae,
    Nemesis,
    Siren,
    Tartarus,
    Terpsichore,
    Urania,
    Achilles,
    Adonis,
    Atalanta,
    Bellerophon,
    Heracles,
    Jason,
    Medea,
    Odysseus,
    Polyphemus,
    Theseus,
    Tyche,
    Scylla,
    Castor,
    Proteus,
    Eris,
    Maenads,
    Asteria,
    Hippolyta,
    Hydra,
    Iris,
    Nyx,
    Pegasus,
}

impl PowerId {
    #[must_use]
    pub const fn raw(self) -> u16 {
        self as u16
    }
}

impl std::fmt::Display for PowerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerKind {
    SimpleGod,
    AdvancedGod,
    Hero,
}

/// Immutable description of a power.
///
/// ## Example
///
/// ```
/// use santorini_engine::powers::{PowerDefinition, PowerId, PowerKind};
///
/// let hecate = PowerDefinition::new(PowerId::Hecate, "Hecate", "Goddess of Magic", PowerKind::AdvancedGod)
///     .with_players(&[2])
///     .with_order_aid(64)
///     .without_golden_fleece();
///
/// assert!(hecate.supports(2));
/// assert!(!hecate.supports(3));
/// assert!(!hecate.golden_fleece);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerDefinition {
    pub id: PowerId,
    pub name: &'static str,
    pub title: &'static str,
    pub kind: PowerKind,
    /// Player counts the power can be played at.
    pub players: &'static [usize],
    /// Whether the power may be shared through the Ram figure.
    pub golden_fleece: bool,
    /// Rank used to suggest the first player; -1 expresses no opinion.
    pub order_aid: i32,
    /// Whether a capability exists for this power.
    pub implemented: bool,
}

impl PowerDefinition {
    /// Definition playable at every table size, golden-fleece eligible,
    /// without an order opinion.
    #[must_use]
    pub const fn new(id: PowerId, name: &'static str, title: &'static str, kind: PowerKind) -> Self {
        Self {
            id,
            name,
            title,
            kind,
            players: &[2, 3, 4],
            golden_fleece: true,
            order_aid: -1,
            implemented: false,
        }
    }

    #[must_use]
    pub const fn with_players(mut self, players: &'static [usize]) -> Self {
        self.players = players;
        self
    }

    #[must_use]
    pub const fn with_order_aid(mut self, order_aid: i32) -> Self {
        self.order_aid = order_aid;
        self
    }

    #[must_use]
    pub const fn without_golden_fleece(mut self) -> Self {
        self.golden_fleece = false;
        self
    }

    #[must_use]
    pub const fn implemented(mut self) -> Self {
        self.implemented = true;
        self
    }

    #[must_use]
    pub fn supports(&self, player_count: usize) -> bool {
        self.players.contains(&player_count)
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.kind == PowerKind::Hero
    }
}
