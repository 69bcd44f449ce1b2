use crate::core::clock::today_floor;
use crate::core::conflict::{available_end_slots, available_start_slots};
use crate::core::validator::BookingValidator;
use crate::core::{BookingDraft, Clock, Reservation, SlotCatalog};
use crate::domain::model::{RoomId, TimeOfDay};
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;

/// Identifies the (room, date) selection a fetch was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub room: RoomId,
    pub date: NaiveDate,
}

/// Controlled state of the reservation form: the draft being filled in, the
/// reservations shown for the selected room and date, and the last error.
#[derive(Debug, Default)]
pub struct BookingForm {
    draft: BookingDraft,
    reservations: Vec<Reservation>,
    generation: u64,
    error: Option<String>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Reservations of the selected room on the selected date.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_client(&mut self, client: impl Into<String>) {
        self.draft.client = client.into();
    }

    pub fn select_room(&mut self, room: RoomId) {
        if self.draft.room != Some(room) {
            self.draft.room = Some(room);
            self.selection_changed();
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        if self.draft.date != Some(date) {
            self.draft.date = Some(date);
            self.selection_changed();
        }
    }

    /// A new start invalidates whatever end was picked before.
    pub fn set_start(&mut self, start: Option<TimeOfDay>) {
        self.draft.start = start;
        self.draft.end = None;
    }

    pub fn set_end(&mut self, end: Option<TimeOfDay>) {
        self.draft.end = end;
    }

    fn selection_changed(&mut self) {
        self.generation += 1;
        self.reservations.clear();
    }

    /// `None` until both room and date are chosen.
    pub fn begin_fetch(&self) -> Option<FetchTicket> {
        Some(FetchTicket {
            generation: self.generation,
            room: self.draft.room?,
            date: self.draft.date?,
        })
    }

    /// Installs a fetch result. Results for a superseded selection are
    /// dropped; a failed fetch keeps the list already shown. Returns whether
    /// the displayed list was replaced.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Reservation>>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale reservations for {} on {}",
                ticket.room,
                ticket.date
            );
            return false;
        }

        match result {
            Ok(all) => {
                self.reservations = all
                    .into_iter()
                    .filter(|r| r.room == ticket.room && r.date == ticket.date)
                    .collect();
                tracing::debug!(
                    "Loaded {} reservations for {} on {}",
                    self.reservations.len(),
                    ticket.room,
                    ticket.date
                );
                true
            }
            Err(e) => {
                tracing::warn!("Error fetching reservations: {}", e);
                false
            }
        }
    }

    pub fn start_options(&self, clock: &dyn Clock) -> Vec<TimeOfDay> {
        let floor = self.draft.date.and_then(|date| today_floor(clock, date));
        available_start_slots(
            &SlotCatalog::business_day().start_candidates,
            &self.reservations,
            floor,
        )
    }

    pub fn end_options(&self) -> Vec<TimeOfDay> {
        available_end_slots(
            &SlotCatalog::business_day().end_candidates,
            &self.reservations,
            self.draft.start,
        )
    }

    /// Whether the submit action is enabled.
    pub fn is_submittable(&self) -> bool {
        BookingValidator::missing_fields(&self.draft).is_empty()
    }

    pub fn validate(&self, today: NaiveDate) -> Result<Reservation> {
        BookingValidator::validate(&self.draft, today)
    }

    /// Shows the new reservation and clears the personal fields; room and
    /// date stay selected.
    pub fn record_created(&mut self, reservation: Reservation) {
        if Some(reservation.room) == self.draft.room && Some(reservation.date) == self.draft.date {
            self.reservations.push(reservation);
        }
        self.draft.client.clear();
        self.draft.start = None;
        self.draft.end = None;
        self.error = None;
    }

    /// Keeps every field so the user can correct and resubmit.
    pub fn record_failure(&mut self, error: &BookingError) {
        self.error = Some(error.user_friendly_message());
    }

    /// Back to the initial, empty form. In-flight fetches become stale.
    pub fn reset(&mut self) {
        self.draft = BookingDraft::default();
        self.error = None;
        self.selection_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::utils::error::StoreOperation;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn reservation(room: RoomId, date: NaiveDate, start: &str, end: &str) -> Reservation {
        Reservation {
            client: "Ana".to_string(),
            date,
            start: t(start),
            end: t(end),
            room,
        }
    }

    fn clock() -> FixedClock {
        FixedClock(day(18).and_hms_opt(14, 32, 0).unwrap())
    }

    #[test]
    fn no_fetch_until_room_and_date_are_set() {
        let mut form = BookingForm::new();
        assert!(form.begin_fetch().is_none());
        form.select_room(RoomId::Salon1);
        assert!(form.begin_fetch().is_none());
        form.set_date(day(20));
        let ticket = form.begin_fetch().unwrap();
        assert_eq!(ticket.room, RoomId::Salon1);
        assert_eq!(ticket.date, day(20));
    }

    #[test]
    fn fetch_result_is_filtered_by_room() {
        let mut form = BookingForm::new();
        form.select_room(RoomId::Salon2);
        form.set_date(day(20));
        let ticket = form.begin_fetch().unwrap();

        let fetched = vec![
            reservation(RoomId::Salon1, day(20), "10:00", "11:00"),
            reservation(RoomId::Salon2, day(20), "12:00", "13:00"),
        ];
        assert!(form.apply_fetch(ticket, Ok(fetched)));
        assert_eq!(form.reservations().len(), 1);
        assert_eq!(form.reservations()[0].room, RoomId::Salon2);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut form = BookingForm::new();
        form.set_date(day(20));
        form.select_room(RoomId::Salon1);
        let ticket_a = form.begin_fetch().unwrap();
        form.select_room(RoomId::Salon2);
        let ticket_b = form.begin_fetch().unwrap();

        let fetched = vec![
            reservation(RoomId::Salon1, day(20), "10:00", "11:00"),
            reservation(RoomId::Salon2, day(20), "15:00", "16:00"),
        ];
        assert!(form.apply_fetch(ticket_b, Ok(fetched.clone())));
        assert!(!form.apply_fetch(ticket_a, Ok(fetched)));

        assert_eq!(form.reservations().len(), 1);
        assert!(form.reservations().iter().all(|r| r.room == RoomId::Salon2));
    }

    #[test]
    fn failed_fetch_keeps_current_list() {
        let mut form = BookingForm::new();
        form.select_room(RoomId::Salon1);
        form.set_date(day(20));
        let ticket = form.begin_fetch().unwrap();
        form.apply_fetch(
            ticket,
            Ok(vec![reservation(RoomId::Salon1, day(20), "10:00", "11:00")]),
        );

        let ticket = form.begin_fetch().unwrap();
        let failure = BookingError::UnknownFailure {
            status: 503,
            operation: StoreOperation::List,
        };
        assert!(!form.apply_fetch(ticket, Err(failure)));
        assert_eq!(form.reservations().len(), 1);
        assert!(form.error().is_none());
    }

    #[test]
    fn changing_start_clears_end() {
        let mut form = BookingForm::new();
        form.set_start(Some(t("10:00")));
        form.set_end(Some(t("11:00")));
        form.set_start(Some(t("10:30")));
        assert_eq!(form.draft().end, None);
        assert_eq!(form.draft().start, Some(t("10:30")));
    }

    #[test]
    fn options_follow_reservations_and_clock() {
        let mut form = BookingForm::new();
        form.select_room(RoomId::Salon1);
        form.set_date(day(18));
        let ticket = form.begin_fetch().unwrap();
        form.apply_fetch(
            ticket,
            Ok(vec![reservation(RoomId::Salon1, day(18), "16:00", "17:00")]),
        );

        let starts = form.start_options(&clock());
        assert_eq!(starts, vec![t("15:00"), t("17:30")]);

        assert!(form.end_options().is_empty());
        form.set_start(Some(t("15:00")));
        assert_eq!(form.end_options(), vec![t("15:30")]);
    }

    #[test]
    fn submittable_only_when_complete() {
        let mut form = BookingForm::new();
        assert!(!form.is_submittable());
        form.set_client("Juan Lopez");
        form.select_room(RoomId::Salon3);
        form.set_date(day(20));
        form.set_start(Some(t("09:00")));
        assert!(!form.is_submittable());
        form.set_end(Some(t("10:00")));
        assert!(form.is_submittable());
    }

    #[test]
    fn created_reservation_is_appended_and_fields_cleared() {
        let mut form = BookingForm::new();
        form.set_client("Juan Lopez");
        form.select_room(RoomId::Salon3);
        form.set_date(day(20));
        form.set_start(Some(t("09:00")));
        form.set_end(Some(t("10:00")));
        let created = form.validate(day(18)).unwrap();

        form.record_created(created);
        assert_eq!(form.reservations().len(), 1);
        assert_eq!(form.draft().client, "");
        assert_eq!(form.draft().start, None);
        assert_eq!(form.draft().room, Some(RoomId::Salon3));
        assert!(!form.start_options(&clock()).contains(&t("09:00")));
    }

    #[test]
    fn failure_preserves_fields() {
        let mut form = BookingForm::new();
        form.set_client("Juan Lopez");
        form.set_start(Some(t("09:00")));
        form.record_failure(&BookingError::StoreRejected {
            status: 409,
            message: "Horario ocupado".to_string(),
        });
        assert_eq!(form.error(), Some("Horario ocupado"));
        assert_eq!(form.draft().client, "Juan Lopez");
        assert_eq!(form.draft().start, Some(t("09:00")));
    }

    #[test]
    fn reset_restores_initial_state_and_invalidates_fetches() {
        let mut form = BookingForm::new();
        form.select_room(RoomId::Salon1);
        form.set_date(day(20));
        let ticket = form.begin_fetch().unwrap();
        form.reset();

        assert_eq!(form.draft(), &BookingDraft::default());
        assert!(!form.apply_fetch(ticket, Ok(Vec::new())));
    }
}
