//! The standard power catalog and banned matchups.

use super::definition::{PowerDefinition, PowerId, PowerKind};

use PowerId::*;
use PowerKind::{AdvancedGod, Hero, SimpleGod};

const HEROES: &[usize] = &[2];

/// Every power, in catalog order.
pub const CATALOG: &[PowerDefinition] = &[
    PowerDefinition::new(Apollo, "Apollo", "God of Music", SimpleGod).implemented(),
    PowerDefinition::new(Artemis, "Artemis", "Goddess of the Hunt", SimpleGod).implemented(),
    PowerDefinition::new(Athena, "Athena", "Goddess of Wisdom", SimpleGod).implemented(),
    PowerDefinition::new(Atlas, "Atlas", "Titan Shouldering the Heavens", SimpleGod).implemented(),
    PowerDefinition::new(Demeter, "Demeter", "Goddess of the Harvest", SimpleGod).implemented(),
    PowerDefinition::new(Hephaestus, "Hephaestus", "God of Blacksmiths", SimpleGod).implemented(),
    PowerDefinition::new(Hermes, "Hermes", "God of Travel", SimpleGod).implemented(),
    PowerDefinition::new(Minotaur, "Minotaur", "Bull-headed Monster", SimpleGod).implemented(),
    PowerDefinition::new(Pan, "Pan", "God of the Wild", SimpleGod).implemented(),
    PowerDefinition::new(Prometheus, "Prometheus", "Titan Benefactor of Mankind", SimpleGod).implemented(),
    PowerDefinition::new(Aphrodite, "Aphrodite", "Goddess of Love", AdvancedGod),
    PowerDefinition::new(Ares, "Ares", "God of War", AdvancedGod),
    PowerDefinition::new(Bia, "Bia", "Goddess of Violence", AdvancedGod).implemented(),
    PowerDefinition::new(Chaos, "Chaos", "Primordial Nothingness", AdvancedGod),
    PowerDefinition::new(Charon, "Charon", "Ferryman to the Underworld", AdvancedGod),
    PowerDefinition::new(Chronus, "Chronus", "God of Time", AdvancedGod).implemented(),
    PowerDefinition::new(Circe, "Circe", "Divine Enchantress", AdvancedGod),
    PowerDefinition::new(Dionysus, "Dionysus", "God of Wine", AdvancedGod),
    PowerDefinition::new(Eros, "Eros", "God of Desire", AdvancedGod),
    PowerDefinition::new(Hera, "Hera", "Goddess of Marriage", AdvancedGod).implemented(),
    PowerDefinition::new(Hestia, "Hestia", "Goddess of Hearth and Home", AdvancedGod),
    PowerDefinition::new(Hypnus, "Hypnus", "God of Sleep", AdvancedGod),
    PowerDefinition::new(Limus, "Limus", "Goddess of Famine", AdvancedGod),
    PowerDefinition::new(Medusa, "Medusa", "Petrifying Gorgon", AdvancedGod),
    PowerDefinition::new(Morpheus, "Morpheus", "God of Dreams", AdvancedGod),
    PowerDefinition::new(Persephone, "Persephone", "Goddess of Spring Growth", AdvancedGod),
    PowerDefinition::new(Poseidon, "Poseidon", "God of the Sea", AdvancedGod),
    PowerDefinition::new(Selene, "Selene", "Goddess of the Moon", AdvancedGod)
        .with_order_aid(8)
        .implemented(),
    PowerDefinition::new(Triton, "Triton", "God of the Waves", AdvancedGod),
    PowerDefinition::new(Zeus, "Zeus", "God of the Sky", AdvancedGod).implemented(),
    PowerDefinition::new(Aeolus, "Aeolus", "God of the Winds", AdvancedGod),
    PowerDefinition::new(Charybdis, "Charybdis", "Whirlpool Monster", AdvancedGod),
    PowerDefinition::new(Clio, "Clio", "Muse of History", AdvancedGod),
    PowerDefinition::new(Europa, "Europa & Talus", "Queen & Guardian Automaton", AdvancedGod),
    PowerDefinition::new(Gaea, "Gaea", "Goddess of the Earth", AdvancedGod),
    PowerDefinition::new(Graeae, "Graeae", "The Grey Hags", AdvancedGod),
    PowerDefinition::new(Hades, "Hades", "God of the Underworld", AdvancedGod),
    PowerDefinition::new(Harpies, "Harpies", "Winged Menaces", AdvancedGod),
    PowerDefinition::new(Hecate, "Hecate", "Goddess of Magic", AdvancedGod)
        .with_players(&[2])
        .with_order_aid(64)
        .without_golden_fleece()
        .implemented(),
    PowerDefinition::new(Moerae, "Moerae", "Goddesses of Fate", AdvancedGod),
    PowerDefinition::new(Nemesis, "Nemesis", "Goddess of Retribution", AdvancedGod),
    PowerDefinition::new(Siren, "Siren", "Alluring Sea Nymph", AdvancedGod),
    PowerDefinition::new(Tartarus, "Tartarus", "God of the Abyss", AdvancedGod),
    PowerDefinition::new(Terpsichore, "Terpsichore", "Muse of Dancing", AdvancedGod),
    PowerDefinition::new(Urania, "Urania", "Muse of Astronomy", AdvancedGod),
    PowerDefinition::new(Achilles, "Achilles", "Volatile Warrior", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Adonis, "Adonis", "Devastatingly Handsome", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Atalanta, "Atalanta", "Swift Huntress", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Bellerophon, "Bellerophon", "Tamer of Pegasus", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Heracles, "Heracles", "Doer of Great Deeds", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Jason, "Jason", "Leader of the Argonauts", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Medea, "Medea", "Powerful Sorceress", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Odysseus, "Odysseus", "Cunning Leader", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Polyphemus, "Polyphemus", "Gigantic Cyclops", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Theseus, "Theseus", "Slayer of the Minotaur", Hero)
        .with_players(HEROES)
        .without_golden_fleece(),
    PowerDefinition::new(Tyche, "Tyche", "Goddess of Fortune", AdvancedGod),
    PowerDefinition::new(Scylla, "Scylla", "Desirous Sea Monster", AdvancedGod),
    PowerDefinition::new(Castor, "Castor & Pollux", "Divine & Mortal Twins", AdvancedGod)
        .with_order_aid(13)
        .implemented(),
    PowerDefinition::new(Proteus, "Proteus", "Shapeshifting Sea God", AdvancedGod),
    PowerDefinition::new(Eris, "Eris", "Goddess of Discord", AdvancedGod),
    PowerDefinition::new(Maenads, "Maenads", "Raving Ones", AdvancedGod)
        .with_order_aid(41)
        .without_golden_fleece()
        .implemented(),
    PowerDefinition::new(Asteria, "Asteria", "Goddess of Falling Stars", AdvancedGod),
    PowerDefinition::new(Hippolyta, "Hippolyta", "Queen of the Amazons", AdvancedGod),
    PowerDefinition::new(Hydra, "Hydra", "Many-Headed Monster", AdvancedGod)
        .with_players(&[2, 3])
        .with_order_aid(43)
        .without_golden_fleece()
        .implemented(),
    PowerDefinition::new(Iris, "Iris", "Goddess of the Rainbow", AdvancedGod),
    PowerDefinition::new(Nyx, "Nyx", "Goddess of Night", AdvancedGod),
    PowerDefinition::new(Pegasus, "Pegasus", "Winged Horse", AdvancedGod),
];

/// Pairs of powers that may never both be in play.
pub const BANNED_MATCHUPS: &[(PowerId, PowerId)] = &[
    (Atlas, Gaea),
    (Aphrodite, Nemesis),
    (Aphrodite, Urania),
    (Asteria, Hades),
    (Bia, Nemesis),
    (Bia, Tartarus),
    (Charon, Hecate),
    (Circe, Clio),
    (Circe, Eros),
    (Circe, Gaea),
    (Circe, Graeae),
    (Circe, Hecate),
    (Circe, Jason),
    (Circe, Moerae),
    (Circe, Nyx),
    (Circe, Proteus),
    (Circe, Tartarus),
    (Circe, Achilles),
    (Circe, Adonis),
    (Circe, Atalanta),
    (Circe, Bellerophon),
    (Circe, Heracles),
    (Circe, Medea),
    (Circe, Odysseus),
    (Circe, Polyphemus),
    (Circe, Theseus),
    (Clio, Nemesis),
    (Eris, Hecate),
    (Eris, Persephone),
    (Eris, Tartarus),
    (Gaea, Nemesis),
    (Gaea, Selene),
    (Graeae, Nemesis),
    (Hades, Pan),
    (Harpies, Hermes),
    (Harpies, Maenads),
    (Harpies, Triton),
    (Hecate, Dionysus),
    (Hecate, Medea),
    (Hecate, Moerae),
    (Hecate, Scylla),
    (Hecate, Nyx),
    (Hecate, Tartarus),
    (Hecate, Theseus),
    (Hypnus, Terpsichore),
    (Limus, Terpsichore),
    (Medusa, Nemesis),
    (Moerae, Nemesis),
    (Moerae, Tartarus),
    (Nemesis, Terpsichore),
    (Nemesis, Theseus),
    (Selene, Gaea),
    (Persephone, Triton),
    (Persephone, Artemis),
    (Persephone, Charon),
    (Persephone, Prometheus),
    (Tartarus, Terpsichore),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_in_id_order() {
        assert_eq!(CATALOG.len(), 67);
        for (i, def) in CATALOG.iter().enumerate() {
            assert_eq!(def.id.raw() as usize, i + 1, "{} out of order", def.id);
        }
    }

    #[test]
    fn test_known_metadata() {
        let hydra = CATALOG.iter().find(|d| d.id == Hydra).unwrap();
        assert_eq!(hydra.players, &[2, 3]);
        assert_eq!(hydra.order_aid, 43);
        assert!(!hydra.golden_fleece);

        let implemented = CATALOG.iter().filter(|d| d.implemented).count();
        assert_eq!(implemented, 19);
        assert_eq!(CATALOG.iter().filter(|d| d.is_hero()).count(), 10);
    }
}
