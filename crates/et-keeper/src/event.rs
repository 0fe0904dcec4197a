//! Change-event payload and the result of a mutating keeper call.

use et_core::FactoredTime;

/// Published to every observer after the counter changes.
///
/// Observers receive it by shared reference, so none of them can alter what
/// the others see.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeChangeEvent {
    pub old_time: FactoredTime,
    pub new_time: FactoredTime,
}

impl TimeChangeEvent {
    /// Signed minutes between the two snapshots.
    pub fn delta_minutes(&self) -> i64 {
        self.new_time.total_minutes as i64 - self.old_time.total_minutes as i64
    }

    /// `true` if the event moved the clock to a different day.
    pub fn crossed_day(&self) -> bool {
        self.old_time.days != self.new_time.days
    }
}

/// Outcome of [`TimeKeeper::increment`] / [`TimeKeeper::set`].
///
/// [`TimeKeeper::increment`]: crate::TimeKeeper::increment
/// [`TimeKeeper::set`]: crate::TimeKeeper::set
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TimeUpdate {
    /// The counter was persisted and observers were notified.
    Changed(TimeChangeEvent),
    /// The requested value equals the current one (including a decrement
    /// clamped at zero).  Nothing was written or published.
    Unchanged,
    /// The acting user is not privileged.  Nothing was written or published.
    Denied,
}

impl TimeUpdate {
    #[inline]
    pub fn is_changed(&self) -> bool {
        matches!(self, TimeUpdate::Changed(_))
    }

    #[inline]
    pub fn is_denied(&self) -> bool {
        matches!(self, TimeUpdate::Denied)
    }

    pub fn event(&self) -> Option<&TimeChangeEvent> {
        match self {
            TimeUpdate::Changed(e) => Some(e),
            _ => None,
        }
    }
}
