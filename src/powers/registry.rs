//! Power registry for definition lookup and fair-offer generation.
//!
//! The `PowerRegistry` stores every power definition plus the symmetric
//! banned-matchup relation. It answers which powers are playable at a
//! table and draws offers that never contain a banned pair.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::core::config::{GameConfig, PowerOption, SetupMode};
use crate::core::error::{Result, RuleConflictError, UserActionError};
use crate::core::GameRng;

use super::catalog::{BANNED_MATCHUPS, CATALOG};
use super::definition::{PowerDefinition, PowerId, PowerKind};

/// How powers reach the players once setup has run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupPlan {
    /// Base game.
    NoPowers,
    /// The offer is final; players pick from it directly.
    Offer(Vec<PowerId>),
    /// A single power goes on the Ram figure.
    GoldenFleece(PowerId),
    /// The contestant builds the offer from the shuffled pool of powers.
    BuildOffer { deck: Vec<PowerId> },
}

/// Registry of power definitions and banned matchups.
///
/// ## Example
///
/// ```
/// use santorini_engine::powers::{PowerId, PowerRegistry};
///
/// let registry = PowerRegistry::standard();
/// assert_eq!(registry.get(PowerId::Atlas).unwrap().name, "Atlas");
///
/// let banned = registry.banned_ids(&[PowerId::Atlas]);
/// assert!(banned.contains(&PowerId::Gaea));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PowerRegistry {
    definitions: FxHashMap<PowerId, PowerDefinition>,
    banned: FxHashSet<(PowerId, PowerId)>,
}

impl PowerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry loaded with the full catalog and banned matchups.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in CATALOG {
            registry.register(*def);
        }
        for &(a, b) in BANNED_MATCHUPS {
            registry.ban(a, b);
        }
        registry
    }

    /// Register a power definition.
    ///
    /// Panics if a power with the same ID already exists.
    pub fn register(&mut self, def: PowerDefinition) {
        if self.definitions.contains_key(&def.id) {
            panic!("Power {:?} already registered", def.id);
        }
        self.definitions.insert(def.id, def);
    }

    /// Declare a banned pair. Order does not matter.
    pub fn ban(&mut self, a: PowerId, b: PowerId) {
        self.banned.insert(normalized(a, b));
    }

    #[must_use]
    pub fn get(&self, id: PowerId) -> Option<&PowerDefinition> {
        self.definitions.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Every definition in id order.
    #[must_use]
    pub fn iter(&self) -> Vec<&PowerDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by_key(|d| d.id);
        defs
    }

    #[must_use]
    pub fn is_banned_pair(&self, a: PowerId, b: PowerId) -> bool {
        self.banned.contains(&normalized(a, b))
    }

    /// Union of the banned partners of every selected power.
    #[must_use]
    pub fn banned_ids(&self, selected: &[PowerId]) -> BTreeSet<PowerId> {
        let mut ids = BTreeSet::new();
        for &(a, b) in &self.banned {
            if selected.contains(&a) {
                ids.insert(b);
            }
            if selected.contains(&b) {
                ids.insert(a);
            }
        }
        ids
    }

    /// Implemented powers playable at a table of `player_count` with `option`.
    #[must_use]
    pub fn supported(&self, player_count: usize, option: PowerOption) -> Vec<PowerId> {
        self.iter()
            .into_iter()
            .filter(|d| d.implemented && d.supports(player_count))
            .filter(|d| match option {
                PowerOption::None => false,
                PowerOption::SimpleGods => d.kind == PowerKind::SimpleGod,
                PowerOption::AllGods => !d.is_hero(),
                PowerOption::Heroes => d.is_hero(),
                PowerOption::GodsAndHeroes => true,
                PowerOption::GoldenFleece => d.golden_fleece,
            })
            .map(|d| d.id)
            .collect()
    }

    /// Draw `count` powers such that no two are banned against each other.
    ///
    /// Each draw removes the chosen power and its banned partners from the
    /// pool. Running out before reaching `count` is a setup defect.
    pub fn fair_offer(&self, pool: &[PowerId], count: usize, rng: &mut GameRng) -> Result<Vec<PowerId>> {
        let mut remaining = pool.to_vec();
        let mut offer = Vec::with_capacity(count);
        while offer.len() < count && !remaining.is_empty() {
            let pick = remaining[rng.gen_range_usize(0..remaining.len())];
            offer.push(pick);
            let banned = self.banned_ids(&offer);
            remaining.retain(|p| !offer.contains(p) && !banned.contains(p));
        }
        if offer.len() != count {
            return Err(RuleConflictError::OfferQuota {
                expected: count,
                actual: offer.len(),
            }
            .into());
        }
        debug!(offer = ?offer, "fair offer drawn");
        Ok(offer)
    }

    /// Powers setup needs for `config`: the fair-draw quota, or for a custom
    /// setup the size of the offer the contestant builds.
    #[must_use]
    pub fn required_powers(config: &GameConfig) -> usize {
        let n = config.player_count;
        match (config.powers, config.setup) {
            (PowerOption::None, _) => 0,
            (_, SetupMode::Tournament) => (n + 1) * 2,
            (PowerOption::GoldenFleece, _) => 1,
            _ => n,
        }
    }

    /// Lower bound on the powers a fair draw from `pool` reaches, however
    /// unlucky.
    ///
    /// Each draw strips at most the drawn power and its banned partners, so
    /// the bound takes the powers with the most partners first.
    #[must_use]
    pub fn guaranteed_draws(&self, pool: &[PowerId]) -> usize {
        let mut stripped: Vec<usize> = pool
            .iter()
            .map(|&p| 1 + pool.iter().filter(|&&q| p != q && self.is_banned_pair(p, q)).count())
            .collect();
        stripped.sort_unstable_by(|a, b| b.cmp(a));
        let mut cleared = 0;
        for (draws, count) in stripped.iter().enumerate() {
            cleared += count;
            if cleared >= pool.len() {
                return draws + 1;
            }
        }
        0
    }

    /// Reject a table whose power pool cannot fill its setup.
    pub fn check_setup(&self, config: &GameConfig) -> Result<()> {
        let required = Self::required_powers(config);
        if required == 0 {
            return Ok(());
        }
        let available = self.guaranteed_draws(&self.supported(config.player_count, config.powers));
        if available < required {
            return Err(UserActionError::UnsupportedSetup {
                powers: config.powers,
                setup: config.setup,
                players: config.player_count,
                available,
                required,
            }
            .into());
        }
        Ok(())
    }

    /// Run power setup for a table.
    pub fn prepare_powers(&self, config: &GameConfig, rng: &mut GameRng) -> Result<SetupPlan> {
        config.validate()?;
        self.check_setup(config)?;
        if config.powers == PowerOption::None {
            return Ok(SetupPlan::NoPowers);
        }

        let n = config.player_count;
        let mut pool = self.supported(n, config.powers);
        let mixed = config.powers == PowerOption::GodsAndHeroes;
        let quota = match config.setup {
            SetupMode::Custom => None,
            _ => Some(Self::required_powers(config)),
        };
        if let Some(count) = quota.filter(|_| !mixed) {
            pool = self.fair_offer(&pool, count, rng)?;
        }

        let plan = match (config.setup, mixed) {
            (SetupMode::Quick, false) if config.powers.is_golden_fleece() => {
                SetupPlan::GoldenFleece(pool[0])
            }
            (SetupMode::Quick, false) => SetupPlan::Offer(pool),
            _ => {
                rng.shuffle(&mut pool);
                SetupPlan::BuildOffer { deck: pool }
            }
        };
        info!(players = n, plan = ?plan, "powers prepared");
        Ok(plan)
    }

    /// Power whose owner should play first: lowest non-negative order aid.
    #[must_use]
    pub fn first_player_suggestion(&self, offer: &[PowerId]) -> Option<PowerId> {
        offer
            .iter()
            .filter_map(|id| self.get(*id))
            .filter(|d| d.order_aid >= 0)
            .min_by_key(|d| d.order_aid)
            .map(|d| d.id)
    }
}

fn normalized(a: PowerId, b: PowerId) -> (PowerId, PowerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
