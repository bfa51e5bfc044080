use serde::Serialize;

use crate::error::AppError;

/// The occupancy key of a booking: a room and an exact check-in date
///
/// Two bookings only compete for capacity when both fields are equal; stays
/// that overlap on later nights do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub room_id: i64,
    pub checkin_date: &'a str,
}

/// Outcome of evaluating a prospective booking against its room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityCheck {
    pub capacity: i64,
    /// Bookings already stored for the target slot
    pub occupancy: i64,
    /// Occupancy of the target slot once the booking is committed
    pub prospective: i64,
}

impl CapacityCheck {
    pub fn new(capacity: i64, occupancy: i64, prior: Option<Slot<'_>>, target: Slot<'_>) -> Self {
        Self {
            capacity,
            occupancy,
            prospective: prospective_occupancy(occupancy, prior, target),
        }
    }

    pub fn exceeds(&self) -> bool {
        self.prospective > self.capacity
    }

    pub fn fits(&self) -> bool {
        !self.exceeds()
    }

    pub fn into_error(self) -> AppError {
        AppError::CapacityExceeded {
            capacity: self.capacity,
            occupancy: self.occupancy,
        }
    }
}

/// Occupancy of `target` after placing a booking there
///
/// `prior` is the slot the booking occupies today (edits only). A booking that
/// stays in its slot is already part of `current`; one that moves in, or is
/// new, adds one. The slot it leaves only loses an occupant, so it is never
/// checked.
pub fn prospective_occupancy(current: i64, prior: Option<Slot<'_>>, target: Slot<'_>) -> i64 {
    match prior {
        Some(prior) if prior == target => current,
        _ => current + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JUNE_1: Slot<'static> = Slot {
        room_id: 1,
        checkin_date: "2024-06-01",
    };

    #[test]
    fn test_new_booking_adds_one() {
        assert_eq!(prospective_occupancy(0, None, JUNE_1), 1);
        assert_eq!(prospective_occupancy(2, None, JUNE_1), 3);
    }

    #[test]
    fn test_edit_in_place_does_not_self_count() {
        assert_eq!(prospective_occupancy(2, Some(JUNE_1), JUNE_1), 2);
    }

    #[test]
    fn test_edit_moving_slot_adds_one() {
        let other_date = Slot {
            room_id: 1,
            checkin_date: "2024-06-02",
        };
        let other_room = Slot {
            room_id: 2,
            checkin_date: "2024-06-01",
        };
        assert_eq!(prospective_occupancy(0, Some(JUNE_1), other_date), 1);
        assert_eq!(prospective_occupancy(1, Some(JUNE_1), other_room), 2);
    }

    #[test]
    fn test_check_exceeds_only_above_capacity() {
        let full_edit = CapacityCheck::new(2, 2, Some(JUNE_1), JUNE_1);
        assert!(full_edit.fits());

        let full_new = CapacityCheck::new(2, 2, None, JUNE_1);
        assert!(full_new.exceeds());
        assert!(matches!(
            full_new.into_error(),
            AppError::CapacityExceeded {
                capacity: 2,
                occupancy: 2
            }
        ));
    }
}
