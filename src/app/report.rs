use crate::core::{Availability, Reservation};
use crate::domain::model::{RoomId, TimeOfDay};
use crate::utils::error::Result;

/// One line per reservation: `cliente - salonId - fecha - horaInicio - horaFin`.
pub fn render_table(reservations: &[Reservation]) -> String {
    if reservations.is_empty() {
        return "No reservations found".to_string();
    }

    reservations
        .iter()
        .map(|r| format!("{} - {} - {} - {} - {}", r.client, r.room, r.date, r.start, r.end))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(reservations: &[Reservation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reservations)?)
}

/// CSV with the store's column names as header.
pub fn render_csv(reservations: &[Reservation]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for reservation in reservations {
        writer.serialize(reservation)?;
    }
    if reservations.is_empty() {
        writer.write_record(["cliente", "fecha", "horaInicio", "horaFin", "salonId"])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn join_slots(slots: &[TimeOfDay]) -> String {
    if slots.is_empty() {
        return "(none)".to_string();
    }
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_availability(availability: &Availability, chosen_start: Option<TimeOfDay>) -> String {
    let mut lines = vec![
        format!("{} on {}", availability.room.label(), availability.date),
        format!("  Start times: {}", join_slots(&availability.start_slots)),
    ];
    match chosen_start {
        Some(start) => lines.push(format!(
            "  End times after {}: {}",
            start,
            join_slots(&availability.end_slots)
        )),
        None => lines.push("  End times: choose a start time first (--start)".to_string()),
    }
    lines.join("\n")
}

pub fn render_rooms() -> String {
    RoomId::ALL
        .iter()
        .map(|room| format!("{}\t{}", room.as_str(), room.label()))
        .collect::<Vec<_>>()
        .join("\n")
}
