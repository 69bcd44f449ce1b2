use crate::core::clock::{min_date, today_floor};
use crate::core::conflict::{available_end_slots, available_start_slots};
use crate::core::form::{BookingForm, FetchTicket};
use crate::core::validator::BookingValidator;
use crate::core::{Availability, BookingDraft, Clock, Reservation, ReservationStore, SlotCatalog};
use crate::domain::model::{RoomId, TimeOfDay};
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;

/// Ties the availability rules to a reservation store and a clock.
pub struct BookingService<S: ReservationStore, K: Clock> {
    store: S,
    clock: K,
}

impl<S: ReservationStore, K: Clock> BookingService<S, K> {
    pub fn new(store: S, clock: K) -> Self {
        Self { store, clock }
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Every reservation on `date`, all rooms.
    pub async fn list(&self, date: NaiveDate) -> Result<Vec<Reservation>> {
        tracing::debug!("Listing reservations for {}", date);
        self.store.list_by_date(date).await
    }

    pub async fn room_reservations(
        &self,
        date: NaiveDate,
        room: RoomId,
    ) -> Result<Vec<Reservation>> {
        let all = self.store.list_by_date(date).await?;
        Ok(all.into_iter().filter(|r| r.room == room).collect())
    }

    /// Pure part of the availability query.
    pub fn compute_availability(
        &self,
        date: NaiveDate,
        room: RoomId,
        reservations: &[Reservation],
        chosen_start: Option<TimeOfDay>,
    ) -> Availability {
        let catalog = SlotCatalog::business_day();
        let floor = today_floor(&self.clock, date);

        Availability {
            room,
            date,
            start_slots: available_start_slots(&catalog.start_candidates, reservations, floor),
            end_slots: available_end_slots(&catalog.end_candidates, reservations, chosen_start),
        }
    }

    /// Fetches the room's reservations and derives the free slots. Dates
    /// before today are refused; any failed fetch degrades to an empty
    /// reservation list.
    pub async fn availability(
        &self,
        date: NaiveDate,
        room: RoomId,
        chosen_start: Option<TimeOfDay>,
    ) -> Result<Availability> {
        if date < self.clock.today() {
            return Err(BookingError::DateInPast {
                date: date.to_string(),
                today: min_date(&self.clock),
            });
        }

        let reservations = self
            .room_reservations(date, room)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Error fetching reservations, showing none: {}", e);
                Vec::new()
            });
        Ok(self.compute_availability(date, room, &reservations, chosen_start))
    }

    /// Validates and submits as is. A slot taken in the meantime comes back
    /// from the store as `StoreRejected`.
    pub async fn submit(&self, draft: &BookingDraft) -> Result<Reservation> {
        let reservation = BookingValidator::validate(draft, self.clock.today())?;
        tracing::info!(
            "Submitting reservation for {} in {} on {} {}-{}",
            reservation.client,
            reservation.room,
            reservation.date,
            reservation.start,
            reservation.end
        );
        let created = self.store.create(&reservation).await?;
        tracing::info!("Reservation created for {}", created.client);
        Ok(created)
    }

    /// Like `submit`, but first checks the chosen times against the slots the
    /// form would currently offer.
    pub async fn book(&self, draft: &BookingDraft) -> Result<Reservation> {
        let reservation = BookingValidator::validate(draft, self.clock.today())?;
        let availability = self
            .availability(reservation.date, reservation.room, Some(reservation.start))
            .await?;

        let unavailable = |slot: TimeOfDay| BookingError::SlotUnavailable {
            room: reservation.room.label().to_string(),
            date: reservation.date.to_string(),
            slot: slot.to_string(),
        };
        if !availability.start_slots.contains(&reservation.start) {
            return Err(unavailable(reservation.start));
        }
        if !availability.end_slots.contains(&reservation.end) {
            return Err(unavailable(reservation.end));
        }

        self.submit(draft).await
    }

    /// Fetch for a ticket obtained from `BookingForm::begin_fetch`. Kept apart
    /// from `apply_fetch` so several fetches can be in flight at once.
    pub async fn fetch(&self, ticket: FetchTicket) -> Result<Vec<Reservation>> {
        self.room_reservations(ticket.date, ticket.room).await
    }

    /// Reloads the form's reservation list for its current selection.
    pub async fn refresh(&self, form: &mut BookingForm) -> bool {
        let Some(ticket) = form.begin_fetch() else {
            return false;
        };
        let result = self.fetch(ticket).await;
        form.apply_fetch(ticket, result)
    }

    /// Submit action of the form. Nothing is sent while fields are missing;
    /// failures keep the form contents and record a message to display.
    pub async fn submit_form(&self, form: &mut BookingForm) -> Result<Reservation> {
        let outcome = match form.validate(self.clock.today()) {
            Ok(_) => self.submit(form.draft()).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(created) => {
                form.record_created(created.clone());
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("Reservation not created: {}", e);
                form.record_failure(&e);
                Err(e)
            }
        }
    }
}
