use crate::domain::model::{BookingDraft, Reservation};
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn disallowed_name_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-zÁÉÍÓÚáéíóúÑñ\s]").unwrap())
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Keeps letters (accented Spanish vowels and Ñ included) and whitespace,
/// then collapses whitespace runs. Input hygiene only.
pub fn normalize_client_name(raw: &str) -> String {
    let letters = disallowed_name_chars().replace_all(raw, "");
    whitespace_runs().replace_all(letters.trim(), " ").into_owned()
}

pub struct BookingValidator;

impl BookingValidator {
    /// Names of the fields still missing, in form order.
    pub fn missing_fields(draft: &BookingDraft) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if normalize_client_name(&draft.client).is_empty() {
            missing.push("client");
        }
        if draft.date.is_none() {
            missing.push("date");
        }
        if draft.start.is_none() {
            missing.push("start");
        }
        if draft.end.is_none() {
            missing.push("end");
        }
        if draft.room.is_none() {
            missing.push("room");
        }
        missing
    }

    /// Turns a complete draft into the reservation to submit. Slot
    /// availability is not rechecked here; the store has the final word.
    pub fn validate(draft: &BookingDraft, today: NaiveDate) -> Result<Reservation> {
        let missing = Self::missing_fields(draft);
        let (Some(date), Some(room), Some(start), Some(end)) =
            (draft.date, draft.room, draft.start, draft.end)
        else {
            return Err(BookingError::MissingField { fields: missing });
        };
        if !missing.is_empty() {
            return Err(BookingError::MissingField { fields: missing });
        }

        if start >= end {
            return Err(BookingError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        if date < today {
            return Err(BookingError::DateInPast {
                date: date.to_string(),
                today: today.to_string(),
            });
        }

        Ok(Reservation {
            client: normalize_client_name(&draft.client),
            date,
            start,
            end,
            room,
        })
    }
}
