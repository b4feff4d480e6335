use crate::DayKey;

/// Which day's events a timeline's event panel shows.
///
/// Hovering previews a day until a click pins it. Clicking the pinned day
/// again releases the pin; clicking another day moves it.
///
/// # Example
///
/// ```
/// use quantedge_overlay::{DayKey, EventPanel};
///
/// let jan_1 = DayKey::from_ymd(2024, 1, 1).unwrap();
/// let jan_2 = DayKey::from_ymd(2024, 1, 2).unwrap();
///
/// let panel = EventPanel::default();
/// assert_eq!(panel.hover(jan_2), Some(jan_2));
///
/// let panel = panel.click(jan_1);
/// assert_eq!(panel.hover(jan_2), None);
/// assert_eq!(panel.locked_day(), Some(jan_1));
///
/// assert_eq!(panel.click(jan_1), EventPanel::Unlocked);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum EventPanel {
    /// Follows the hovered day.
    #[default]
    Unlocked,
    /// Pinned to a day; hover is ignored.
    Locked(DayKey),
}

impl EventPanel {
    /// State after the user clicks a point on `day`.
    #[must_use]
    pub fn click(self, day: DayKey) -> Self {
        match self {
            Self::Locked(locked) if locked == day => Self::Unlocked,
            _ => Self::Locked(day),
        }
    }

    /// Day to display when the user hovers a point on `day`, or `None` if
    /// the panel is locked and must keep its content.
    #[must_use]
    pub fn hover(self, day: DayKey) -> Option<DayKey> {
        match self {
            Self::Unlocked => Some(day),
            Self::Locked(_) => None,
        }
    }

    #[must_use]
    pub fn locked_day(self) -> Option<DayKey> {
        match self {
            Self::Unlocked => None,
            Self::Locked(day) => Some(day),
        }
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked(_))
    }
}
