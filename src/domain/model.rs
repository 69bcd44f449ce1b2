use crate::utils::error::{BookingError, Result};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Wall-clock time with minute precision. Ordering is by minutes since
/// midnight, never by the rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(BookingError::InvalidTime {
                value: format!("{}:{}", hour, minute),
                reason: "hour must be 0-23 and minute 0-59".to_string(),
            });
        }
        Ok(Self::hm(hour as u16, minute as u16))
    }

    /// Constructor for values already known to be in range. Out-of-range
    /// input panics, which fails the build when used in a `const`.
    pub(crate) const fn hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self {
            minutes: hour * 60 + minute,
        }
    }

    pub fn from_minutes(total: i32) -> Option<Self> {
        (0..MINUTES_PER_DAY).contains(&total).then(|| Self {
            minutes: total as u16,
        })
    }

    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    pub fn total_minutes(&self) -> i32 {
        self.minutes as i32
    }

    /// Clock arithmetic: rolls over hours and wraps around midnight.
    pub fn add_minutes(self, delta: i32) -> Self {
        Self {
            minutes: (self.total_minutes() + delta).rem_euclid(MINUTES_PER_DAY) as u16,
        }
    }

    /// Drops seconds, so 14:32:59 becomes 14:32.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self::hm(time.hour() as u16, time.minute() as u16)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| BookingError::InvalidTime {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid("expected HH:MM"));
        }

        let field = |part: &str, max: u8| -> Result<u8> {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("expected HH:MM"));
            }
            let value: u8 = part.parse().map_err(|_| invalid("expected HH:MM"))?;
            if value > max {
                return Err(invalid("hour must be 0-23 and minute 0-59"));
            }
            Ok(value)
        };

        let hour = field(parts[0], 23)?;
        if parts[1].len() != 2 {
            return Err(invalid("minutes must have two digits"));
        }
        let minute = field(parts[1], 59)?;
        // Backends may echo HH:MM:SS; seconds are validated and dropped.
        if let Some(seconds) = parts.get(2) {
            field(seconds, 59)?;
        }

        TimeOfDay::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomId {
    Salon1,
    Salon2,
    Salon3,
}

impl RoomId {
    pub const ALL: [RoomId; 3] = [RoomId::Salon1, RoomId::Salon2, RoomId::Salon3];

    /// Wire token sent to and received from the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomId::Salon1 => "salon1",
            RoomId::Salon2 => "salon2",
            RoomId::Salon3 => "salon3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomId::Salon1 => "Salon 1",
            RoomId::Salon2 => "Salon 2",
            RoomId::Salon3 => "Salon 3",
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomId {
    type Err = BookingError;

    /// Accepts the wire token or the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        RoomId::ALL
            .into_iter()
            .find(|room| {
                room.as_str().eq_ignore_ascii_case(wanted) || room.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| BookingError::UnknownRoom(s.to_string()))
    }
}

/// A persisted reservation as the store reports it. Field names follow the
/// store's JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "fecha", with = "wire_date")]
    pub date: NaiveDate,
    #[serde(rename = "horaInicio")]
    pub start: TimeOfDay,
    #[serde(rename = "horaFin")]
    pub end: TimeOfDay,
    #[serde(rename = "salonId")]
    pub room: RoomId,
}

/// Dates travel as `YYYY-MM-DD`; a trailing time part (`T00:00:00`) from
/// date-time backends is tolerated on input.
mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let day = raw.split('T').next().unwrap_or_default();
        NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}

/// Candidate slots for one business day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    pub start_candidates: Vec<TimeOfDay>,
    pub end_candidates: Vec<TimeOfDay>,
}

/// What the user has filled in so far. Nothing here is trusted until
/// `BookingValidator::validate` accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub client: String,
    pub date: Option<NaiveDate>,
    pub room: Option<RoomId>,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

/// Available choices for one room and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub room: RoomId,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub start_slots: Vec<TimeOfDay>,
    pub end_slots: Vec<TimeOfDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_renders_zero_padded() {
        let time = t("09:05");
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 5);
        assert_eq!(time.to_string(), "09:05");
        assert_eq!(t("9:30").to_string(), "09:30");
    }

    #[test]
    fn accepts_seconds_from_backend() {
        assert_eq!(t("10:00:00"), t("10:00"));
        assert!("10:00:61".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "24:00", "12:60", "17:90", "12", "12:5", "ab:cd", "1:2:3:4", "-1:00"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn add_minutes_rolls_over_the_hour() {
        assert_eq!(t("17:45").add_minutes(30), t("18:15"));
        assert_eq!(t("10:00").add_minutes(-30), t("09:30"));
        assert_eq!(t("23:50").add_minutes(30), t("00:20"));
        assert_eq!(t("00:10").add_minutes(-30), t("23:40"));
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(t("9:30") < t("10:00"));
        assert!(t("17:30") < t("18:00"));
        assert_eq!(t("18:00").total_minutes(), 1080);
        assert_eq!(TimeOfDay::from_minutes(1440), None);
    }

    #[test]
    fn const_constructor_accepts_day_bounds() {
        assert_eq!(TimeOfDay::hm(0, 0).total_minutes(), 0);
        assert_eq!(TimeOfDay::hm(23, 59).to_string(), "23:59");
    }

    #[test]
    #[should_panic(expected = "time of day out of range")]
    fn const_constructor_rejects_hour_24() {
        TimeOfDay::hm(24, 0);
    }

    #[test]
    #[should_panic(expected = "time of day out of range")]
    fn const_constructor_rejects_minute_60() {
        TimeOfDay::hm(17, 60);
    }

    #[test]
    fn room_ids_parse_from_token_or_label() {
        assert_eq!("salon2".parse::<RoomId>().unwrap(), RoomId::Salon2);
        assert_eq!("Salon 3".parse::<RoomId>().unwrap(), RoomId::Salon3);
        assert!("salon4".parse::<RoomId>().is_err());
        assert_eq!(RoomId::Salon1.label(), "Salon 1");
    }

    #[test]
    fn reservation_uses_store_field_names() {
        let reservation = Reservation {
            client: "Juan Lopez".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            start: t("10:00"),
            end: t("11:00"),
            room: RoomId::Salon1,
        };
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cliente": "Juan Lopez",
                "fecha": "2026-10-20",
                "horaInicio": "10:00",
                "horaFin": "11:00",
                "salonId": "salon1"
            })
        );
    }

    #[test]
    fn reservation_tolerates_backend_shapes() {
        let json = serde_json::json!({
            "id": 7,
            "cliente": "Ana",
            "fecha": "2026-10-20T00:00:00",
            "horaInicio": "14:00:00",
            "horaFin": "15:30:00",
            "salonId": "salon3"
        });
        let reservation: Reservation = serde_json::from_value(json).unwrap();
        assert_eq!(reservation.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(reservation.start, t("14:00"));
        assert_eq!(reservation.room, RoomId::Salon3);
    }
}
