//! Log entries.

use serde::{Deserialize, Serialize};

use crate::board::{Location, PieceId, Space};
use crate::core::stats::StatDelta;
use crate::core::PlayerId;
use crate::powers::PowerId;

/// Strictly increasing position in the action log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub u64);

impl SequenceId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Build,
    /// A piece moved by a power rather than by its owner.
    Force,
    Removal,
    PlaceWorker,
    PlaceToken,
    MoveToken,
    TurnStart,
    AdditionalTurn,
    Generic,
}

impl ActionKind {
    /// Turn boundaries partition the log; cancel never crosses them.
    #[must_use]
    pub fn is_boundary(self) -> bool {
        matches!(self, ActionKind::TurnStart | ActionKind::AdditionalTurn)
    }
}

/// Reason carried by generic entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    SkippedWork,
    SkippedPower,
    UsedPower,
    PowerGranted,
    PowerRevoked,
    Stats,
    Conflict,
}

impl Tag {
    /// Bookkeeping tags that never make a turn cancelable by themselves.
    #[must_use]
    pub fn is_marker(self) -> bool {
        matches!(
            self,
            Tag::PowerGranted | Tag::PowerRevoked | Tag::Stats | Tag::Conflict
        )
    }
}

/// Entry data. Which fields are set depends on the action kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub from: Option<Space>,
    pub to: Option<Space>,
    pub arg: Option<u8>,
    /// Piece created by this entry (builds, new workers).
    pub created: Option<PieceId>,
    /// Location the subject had before this entry.
    pub location: Option<Location>,
    pub power: Option<PowerId>,
    /// Player affected by a power grant or revocation.
    pub beneficiary: Option<PlayerId>,
    pub tag: Option<Tag>,
}

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_from(mut self, from: Space) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn with_to(mut self, to: Space) -> Self {
        self.to = Some(to);
        self
    }

    #[must_use]
    pub fn with_arg(mut self, arg: u8) -> Self {
        self.arg = Some(arg);
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: PieceId) -> Self {
        self.created = Some(created);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: PowerId) -> Self {
        self.power = Some(power);
        self
    }

    #[must_use]
    pub fn with_beneficiary(mut self, player: PlayerId) -> Self {
        self.beneficiary = Some(player);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// One atomic recorded effect plus its statistic deltas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub seq: SequenceId,
    /// The turn boundary this entry belongs to; `None` during setup.
    pub boundary: Option<SequenceId>,
    pub actor: PlayerId,
    pub subject: Option<PieceId>,
    pub kind: ActionKind,
    pub payload: Payload,
    pub stat_deltas: Vec<StatDelta>,
}

impl LogEntry {
    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        self.payload.tag
    }

    /// Whether the entry alone makes a turn cancelable.
    #[must_use]
    pub fn is_cancelable(&self) -> bool {
        !self.kind.is_boundary() && !self.payload.tag.is_some_and(Tag::is_marker)
    }

    /// Whether the entry was an upward move.
    #[must_use]
    pub fn moved_up(&self) -> bool {
        self.kind == ActionKind::Move
            && matches!((self.payload.from, self.payload.to), (Some(f), Some(t)) if t.z > f.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: ActionKind, tag: Option<Tag>) -> LogEntry {
        LogEntry {
            seq: SequenceId::new(1),
            boundary: None,
            actor: PlayerId(0),
            subject: None,
            kind,
            payload: Payload {
                tag,
                ..Payload::default()
            },
            stat_deltas: Vec::new(),
        }
    }

    #[test]
    fn test_cancelable_kinds() {
        assert!(entry(ActionKind::Move, None).is_cancelable());
        assert!(entry(ActionKind::Generic, Some(Tag::SkippedWork)).is_cancelable());
        assert!(!entry(ActionKind::TurnStart, None).is_cancelable());
        assert!(!entry(ActionKind::Generic, Some(Tag::PowerGranted)).is_cancelable());
        assert!(!entry(ActionKind::Generic, Some(Tag::Stats)).is_cancelable());
    }

    #[test]
    fn test_moved_up() {
        let mut e = entry(ActionKind::Move, None);
        e.payload = Payload::new()
            .with_from(Space::new(0, 0, 1))
            .with_to(Space::new(0, 1, 2));
        assert!(e.moved_up());

        e.kind = ActionKind::Force;
        assert!(!e.moved_up());
    }
}
