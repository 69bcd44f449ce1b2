use crate::core::{ConfigProvider, Reservation, ReservationStore};
use crate::utils::error::{BookingError, Result, StoreOperation};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::Deserialize;

const RESERVATIONS_PATH: &str = "/api/reserva";

/// Error body returned by the store on rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

/// Reservation store reached over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpReservationStore {
    client: Client,
    base_url: String,
}

impl HttpReservationStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs())
            .build()?;
        Ok(Self::with_client(client, config.api_base_url()))
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, RESERVATIONS_PATH)
    }
}

/// A `message` in the body is shown to the user verbatim; anything else
/// becomes a generic failure.
async fn rejection(response: Response, operation: StoreOperation) -> BookingError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorPayload>(&body)
        .ok()
        .and_then(|payload| payload.message)
        .filter(|message| !message.trim().is_empty())
    {
        Some(message) => BookingError::StoreRejected { status, message },
        None => {
            tracing::debug!("Store returned {} without message: {}", status, body);
            BookingError::UnknownFailure { status, operation }
        }
    }
}

#[async_trait]
impl ReservationStore for HttpReservationStore {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Reservation>> {
        let fecha = date.format("%Y-%m-%d").to_string();
        tracing::debug!("GET {}?fecha={}", self.endpoint(), fecha);

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("fecha", fecha.as_str())])
            .send()
            .await?;

        tracing::debug!("Store response status: {}", response.status());
        if !response.status().is_success() {
            return Err(rejection(response, StoreOperation::List).await);
        }

        let items: Vec<serde_json::Value> = response.json().await?;
        let mut reservations = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Reservation>(item.clone()) {
                Ok(reservation) => reservations.push(reservation),
                Err(e) => tracing::warn!("Skipping malformed reservation {}: {}", item, e),
            }
        }

        Ok(reservations)
    }

    async fn create(&self, reservation: &Reservation) -> Result<Reservation> {
        tracing::debug!("POST {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .json(reservation)
            .send()
            .await?;

        tracing::debug!("Store response status: {}", response.status());
        if !response.status().is_success() {
            return Err(rejection(response, StoreOperation::Create).await);
        }

        let echoed: serde_json::Value = response.json().await?;
        match serde_json::from_value::<Reservation>(echoed) {
            Ok(created) => Ok(created),
            Err(e) => {
                tracing::warn!("Store echoed an unreadable reservation: {}", e);
                Ok(reservation.clone())
            }
        }
    }
}
