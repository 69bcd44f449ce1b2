use crate::core::SlotCatalog;
use crate::domain::model::TimeOfDay;

pub const OPENING_TIME: TimeOfDay = TimeOfDay::hm(9, 0);
pub const CLOSING_TIME: TimeOfDay = TimeOfDay::hm(18, 0);
/// Slot granularity and also the minimum reservation length.
pub const SLOT_MINUTES: i32 = 30;

fn ticks(first: TimeOfDay, last: TimeOfDay) -> Vec<TimeOfDay> {
    (first.total_minutes()..=last.total_minutes())
        .step_by(SLOT_MINUTES as usize)
        .filter_map(TimeOfDay::from_minutes)
        .collect()
}

/// 09:00 through 17:30. Starting at closing time is meaningless.
pub fn generate_start_slots() -> Vec<TimeOfDay> {
    ticks(OPENING_TIME, CLOSING_TIME.add_minutes(-SLOT_MINUTES))
}

/// 09:30 through 18:00: at least one slot long, ending by closing time.
pub fn generate_end_slots() -> Vec<TimeOfDay> {
    ticks(OPENING_TIME.add_minutes(SLOT_MINUTES), CLOSING_TIME)
}

impl SlotCatalog {
    pub fn business_day() -> Self {
        Self {
            start_candidates: generate_start_slots(),
            end_candidates: generate_end_slots(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(slots: &[TimeOfDay]) -> Vec<String> {
        slots.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn start_slots_cover_the_business_day() {
        let slots = generate_start_slots();
        assert_eq!(slots.len(), 18);
        assert_eq!(slots.first().unwrap().to_string(), "09:00");
        assert_eq!(slots.last().unwrap().to_string(), "17:30");
        assert!(slots
            .windows(2)
            .all(|w| w[1].total_minutes() - w[0].total_minutes() == 30));
    }

    #[test]
    fn end_slots_run_to_closing_time() {
        let slots = generate_end_slots();
        assert_eq!(slots.len(), 18);
        assert_eq!(slots.first().unwrap().to_string(), "09:30");
        assert_eq!(slots.last().unwrap().to_string(), "18:00");
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(SlotCatalog::business_day(), SlotCatalog::business_day());
        assert_eq!(
            rendered(&generate_start_slots()[..3]),
            vec!["09:00", "09:30", "10:00"]
        );
    }
}
