// ── Delete confirmation gate ──
//
// Closed -> AwaitingConfirmation{target} -> Closed            (cancel)
//                                        -> Deleting{target}  (confirm)
//                                           -> Closed         (finished)

use crate::model::EntityId;

/// Two-step confirmation in front of every destructive delete.
///
/// Holding an [`EntityId`] means the target is already known to be a
/// positive identifier; the controller decides whether `confirm` may
/// proceed (it is refused while another mutation is in flight).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteGate {
    #[default]
    Closed,
    AwaitingConfirmation {
        target: EntityId,
    },
    Deleting {
        target: EntityId,
    },
}

impl DeleteGate {
    /// Row the gate currently refers to.
    pub fn target(&self) -> Option<EntityId> {
        match self {
            Self::Closed => None,
            Self::AwaitingConfirmation { target } | Self::Deleting { target } => Some(*target),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Ask for confirmation before deleting `target`. Replaces any pending
    /// request; refused while a delete is already running.
    pub(crate) fn open(&mut self, target: EntityId) -> bool {
        if matches!(self, Self::Deleting { .. }) {
            return false;
        }
        *self = Self::AwaitingConfirmation { target };
        true
    }

    /// Move from awaiting to deleting, handing back the confirmed target.
    pub(crate) fn begin(&mut self) -> Option<EntityId> {
        match *self {
            Self::AwaitingConfirmation { target } => {
                *self = Self::Deleting { target };
                Some(target)
            }
            Self::Closed | Self::Deleting { .. } => None,
        }
    }

    /// Return to `Closed`. Returns `true` if anything changed.
    pub(crate) fn close(&mut self) -> bool {
        let was_open = !self.is_closed();
        *self = Self::Closed;
        was_open
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(raw: i64) -> EntityId {
        EntityId::try_from(raw).unwrap()
    }

    #[test]
    fn full_confirmation_path() {
        let mut gate = DeleteGate::default();
        assert!(gate.begin().is_none());

        assert!(gate.open(id(4)));
        assert_eq!(gate.target(), Some(id(4)));

        assert_eq!(gate.begin(), Some(id(4)));
        assert_eq!(gate, DeleteGate::Deleting { target: id(4) });
        assert!(gate.begin().is_none());

        assert!(gate.close());
        assert!(gate.is_closed());
    }

    #[test]
    fn cancel_always_closes() {
        let mut gate = DeleteGate::default();
        assert!(!gate.close());

        gate.open(id(1));
        assert!(gate.close());
        assert_eq!(gate, DeleteGate::Closed);
    }

    #[test]
    fn cannot_retarget_while_deleting() {
        let mut gate = DeleteGate::default();
        gate.open(id(1));
        gate.begin();

        assert!(!gate.open(id(2)));
        assert_eq!(gate.target(), Some(id(1)));
    }
}
