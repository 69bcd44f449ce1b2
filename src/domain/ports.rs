use crate::domain::model::Reservation;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn accept_invalid_certs(&self) -> bool;
}

/// The remote reservation store. Filtering by room happens on the caller's
/// side; the store only filters by date.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Reservation>>;
    async fn create(&self, reservation: &Reservation) -> Result<Reservation>;
}

/// Source of local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
