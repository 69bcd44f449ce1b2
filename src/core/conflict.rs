use crate::domain::model::{Reservation, TimeOfDay};

/// Changeover margin kept free on both sides of every reservation.
pub const BUFFER_MINUTES: i32 = 30;

/// Half-open window `[start, end)` in minutes since midnight that no other
/// booking may touch. Not wrapped at midnight, so it can leave 0..1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedWindow {
    pub start: i32,
    pub end: i32,
}

impl ProtectedWindow {
    pub fn around(reservation: &Reservation) -> Self {
        Self {
            start: reservation.start.total_minutes() - BUFFER_MINUTES,
            end: reservation.end.total_minutes() + BUFFER_MINUTES,
        }
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        let t = time.total_minutes();
        self.start <= t && t < self.end
    }

    /// Would a booking `[start, end)` cut into this window?
    pub fn blocks(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        start.total_minutes() < self.end && end.total_minutes() > self.start
    }
}

fn windows(reservations: &[Reservation]) -> Vec<ProtectedWindow> {
    reservations.iter().map(ProtectedWindow::around).collect()
}

/// Start slots outside every protected window. `today_floor` is the current
/// time when the date being booked is today; earlier slots are dropped.
pub fn available_start_slots(
    candidates: &[TimeOfDay],
    reservations: &[Reservation],
    today_floor: Option<TimeOfDay>,
) -> Vec<TimeOfDay> {
    let protected = windows(reservations);

    candidates
        .iter()
        .copied()
        .filter(|&slot| today_floor.map_or(true, |floor| slot >= floor))
        .filter(|&slot| !protected.iter().any(|w| w.contains(slot)))
        .collect()
}

/// End slots that make `[chosen_start, end)` a valid, non-conflicting
/// booking. Empty until a start is chosen.
pub fn available_end_slots(
    candidates: &[TimeOfDay],
    reservations: &[Reservation],
    chosen_start: Option<TimeOfDay>,
) -> Vec<TimeOfDay> {
    let Some(start) = chosen_start else {
        return Vec::new();
    };
    let protected = windows(reservations);

    candidates
        .iter()
        .copied()
        .filter(|&slot| slot > start)
        .filter(|&slot| !protected.iter().any(|w| w.blocks(start, slot)))
        .collect()
}
