pub mod clock;
pub mod conflict;
pub mod form;
pub mod service;
pub mod slots;
pub mod validator;

pub use crate::domain::model::{Availability, BookingDraft, Reservation, SlotCatalog};
pub use crate::domain::ports::{Clock, ConfigProvider, ReservationStore};
pub use crate::utils::error::Result;
