//! # Ringing notifications
//! Keeps track of the ringing notification currently shown, so that there is never more than one.
//!
//! Presenting a new notification hands back the one it replaces, which the display must take
//! down first. A dismissal only clears the slot when it refers to the notification still shown;
//! a late dismissal of an already replaced one is ignored.

use crate::alarm::AlarmKind;

/// Identifies one presented notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotificationId(u32);

/// Result of presenting a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Presented {
    /// The new notification
    pub id: NotificationId,
    /// The alarm it rings for
    pub kind: AlarmKind,
    /// The notification that was showing before and has to be dismissed first
    pub replaced: Option<NotificationId>,
}

/// Holds at most one active ringing notification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingingSlot {
    /// The notification on screen, if any
    active: Option<(NotificationId, AlarmKind)>,
    /// Id handed out next
    next_id: u32,
}

impl RingingSlot {
    /// Create a new, empty `RingingSlot`.
    pub const fn new() -> Self {
        Self {
            active: None,
            next_id: 0,
        }
    }

    /// Makes a notification for `kind` the active one.
    pub fn present(&mut self, kind: AlarmKind) -> Presented {
        let id = NotificationId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let replaced = self.active_id();
        self.active = Some((id, kind));
        Presented { id, kind, replaced }
    }

    /// The notification `id` was closed. Returns whether it was the active one.
    pub fn dismissed(&mut self, id: NotificationId) -> bool {
        match self.active {
            Some((active, _)) if active == id => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Id of the active notification
    pub fn active_id(&self) -> Option<NotificationId> {
        self.active.map(|(id, _)| id)
    }

    /// Alarm the active notification rings for
    pub fn active(&self) -> Option<AlarmKind> {
        self.active.map(|(_, kind)| kind)
    }
}
