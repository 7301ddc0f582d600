//! crates/nutriflow_core/src/booking.rs
//!
//! The coach-booking flow: a pure, local state machine with three steps
//! (select coach, select date/slot, confirm) and a pseudo-terminal success
//! state. There is no scheduling-conflict check; any date/slot combination
//! is confirmable once both are chosen.

use crate::domain::{Booking, Coach};
use chrono::{Duration, NaiveDate};

/// Number of selectable booking dates offered, starting tomorrow.
pub const BOOKING_WINDOW_DAYS: i64 = 5;

/// Errors raised by invalid transitions of the booking flow.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("No coach has been selected")]
    NoCoachSelected,
    #[error("A date must be selected before choosing a slot")]
    DateRequired,
    #[error("Slot '{0}' is not offered by this coach")]
    SlotUnavailable(String),
    #[error("Both a date and a slot must be selected before confirming")]
    Incomplete,
    #[error("The booking has already been confirmed")]
    AlreadyConfirmed,
}

/// The booking state machine held by a client session.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingFlow {
    /// Browsing the coach catalog; nothing selected.
    Browsing,
    /// A coach is chosen; date and slot are filled in one at a time.
    Selecting {
        coach: Coach,
        date: Option<NaiveDate>,
        slot: Option<String>,
    },
    /// The success display. Auto-reverts to `Browsing` after a fixed delay.
    Confirmed { booking: Booking },
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        BookingFlow::Browsing
    }

    /// Chooses a coach, discarding any previous date/slot selection.
    pub fn select_coach(&mut self, coach: Coach) -> Result<(), BookingError> {
        if matches!(self, BookingFlow::Confirmed { .. }) {
            return Err(BookingError::AlreadyConfirmed);
        }
        *self = BookingFlow::Selecting {
            coach,
            date: None,
            slot: None,
        };
        Ok(())
    }

    /// Picks a booking date. The caller is responsible for offering only
    /// dates from [`upcoming_dates`].
    pub fn select_date(&mut self, new_date: NaiveDate) -> Result<(), BookingError> {
        match self {
            BookingFlow::Selecting { date, .. } => {
                *date = Some(new_date);
                Ok(())
            }
            BookingFlow::Confirmed { .. } => Err(BookingError::AlreadyConfirmed),
            BookingFlow::Browsing => Err(BookingError::NoCoachSelected),
        }
    }

    /// Picks a time slot. Requires a date to be chosen first (slot buttons
    /// are disabled until then) and the slot to be one the coach offers.
    pub fn select_slot(&mut self, new_slot: &str) -> Result<(), BookingError> {
        match self {
            BookingFlow::Selecting { coach, date, slot } => {
                if date.is_none() {
                    return Err(BookingError::DateRequired);
                }
                if !coach.available_slots.iter().any(|s| s == new_slot) {
                    return Err(BookingError::SlotUnavailable(new_slot.to_string()));
                }
                *slot = Some(new_slot.to_string());
                Ok(())
            }
            BookingFlow::Confirmed { .. } => Err(BookingError::AlreadyConfirmed),
            BookingFlow::Browsing => Err(BookingError::NoCoachSelected),
        }
    }

    /// True only when both a date and a slot have been selected.
    pub fn can_confirm(&self) -> bool {
        matches!(
            self,
            BookingFlow::Selecting {
                date: Some(_),
                slot: Some(_),
                ..
            }
        )
    }

    /// Confirms the booking, moving to the success state.
    pub fn confirm(&mut self) -> Result<Booking, BookingError> {
        match self {
            BookingFlow::Selecting {
                coach,
                date: Some(date),
                slot: Some(slot),
            } => {
                let booking = Booking {
                    coach_id: coach.id.clone(),
                    coach_name: coach.name.clone(),
                    date: *date,
                    slot: slot.clone(),
                };
                *self = BookingFlow::Confirmed {
                    booking: booking.clone(),
                };
                Ok(booking)
            }
            BookingFlow::Confirmed { .. } => Err(BookingError::AlreadyConfirmed),
            BookingFlow::Selecting { .. } => Err(BookingError::Incomplete),
            BookingFlow::Browsing => Err(BookingError::NoCoachSelected),
        }
    }

    /// Returns to the catalog, clearing the current selection.
    pub fn back(&mut self) {
        if matches!(self, BookingFlow::Selecting { .. }) {
            *self = BookingFlow::Browsing;
        }
    }

    /// Clears everything, including a confirmed booking. Used by the timed
    /// revert after the success display.
    pub fn reset(&mut self) {
        *self = BookingFlow::Browsing;
    }
}

/// The selectable booking dates: exactly five consecutive calendar days
/// starting tomorrow. Today is never offered.
pub fn upcoming_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=BOOKING_WINDOW_DAYS)
        .map(|offset| today + Duration::days(offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn a_coach() -> Coach {
        catalog::coaches().remove(0)
    }

    fn a_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn window_is_five_days_starting_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        let dates = upcoming_dates(today);

        assert_eq!(dates.len(), 5);
        assert!(!dates.contains(&today));
        assert_eq!(dates[0], today + Duration::days(1));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn window_crosses_month_boundaries() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 30).unwrap();
        let dates = upcoming_dates(today);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert_eq!(dates[4], NaiveDate::from_ymd_opt(2026, 2, 4).unwrap());
    }

    #[test]
    fn slot_requires_a_date_first() {
        let mut flow = BookingFlow::new();
        flow.select_coach(a_coach()).unwrap();

        assert_eq!(
            flow.select_slot("09:00 AM"),
            Err(BookingError::DateRequired)
        );

        flow.select_date(a_date()).unwrap();
        assert!(flow.select_slot("09:00 AM").is_ok());
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let mut flow = BookingFlow::new();
        flow.select_coach(a_coach()).unwrap();
        flow.select_date(a_date()).unwrap();

        assert_eq!(
            flow.select_slot("11:59 PM"),
            Err(BookingError::SlotUnavailable("11:59 PM".to_string()))
        );
    }

    #[test]
    fn confirm_is_gated_on_date_and_slot() {
        let mut flow = BookingFlow::new();
        assert_eq!(flow.confirm(), Err(BookingError::NoCoachSelected));

        flow.select_coach(a_coach()).unwrap();
        assert!(!flow.can_confirm());
        assert_eq!(flow.confirm(), Err(BookingError::Incomplete));

        flow.select_date(a_date()).unwrap();
        assert!(!flow.can_confirm());

        flow.select_slot("11:00 AM").unwrap();
        assert!(flow.can_confirm());

        let booking = flow.confirm().unwrap();
        assert_eq!(booking.coach_name, "Dr. Emily Carter");
        assert_eq!(booking.date, a_date());
        assert_eq!(booking.slot, "11:00 AM");
        assert!(matches!(flow, BookingFlow::Confirmed { .. }));
    }

    #[test]
    fn confirmed_flow_rejects_further_selection() {
        let mut flow = BookingFlow::new();
        flow.select_coach(a_coach()).unwrap();
        flow.select_date(a_date()).unwrap();
        flow.select_slot("02:00 PM").unwrap();
        flow.confirm().unwrap();

        assert_eq!(
            flow.select_coach(a_coach()),
            Err(BookingError::AlreadyConfirmed)
        );
        assert_eq!(flow.confirm(), Err(BookingError::AlreadyConfirmed));
    }

    #[test]
    fn reset_clears_a_confirmed_booking() {
        let mut flow = BookingFlow::new();
        flow.select_coach(a_coach()).unwrap();
        flow.select_date(a_date()).unwrap();
        flow.select_slot("09:00 AM").unwrap();
        flow.confirm().unwrap();

        flow.reset();
        assert_eq!(flow, BookingFlow::Browsing);
    }

    #[test]
    fn back_only_leaves_the_selection_step() {
        let mut flow = BookingFlow::new();
        flow.back();
        assert_eq!(flow, BookingFlow::Browsing);

        flow.select_coach(a_coach()).unwrap();
        flow.select_date(a_date()).unwrap();
        flow.back();
        assert_eq!(flow, BookingFlow::Browsing);
    }
}
