use std::sync::OnceLock;

use crate::models::SlotGroup;

const FIRST_HOUR: u32 = 7;
const LAST_HOUR: u32 = 23;
const MINUTE_STEP: u32 = 15;

static CATALOG: OnceLock<Vec<String>> = OnceLock::new();

/// The fixed grid of examination windows: every quarter hour from 07:00
/// through 23:45, as zero-padded `HH:MM` labels. Zero padding makes
/// lexicographic order equal chronological order, which the grouping code
/// relies on. Built once, shared process-wide.
pub fn time_slot_catalog() -> &'static [String] {
    CATALOG.get_or_init(|| {
        let mut labels = Vec::with_capacity(((LAST_HOUR - FIRST_HOUR + 1) * 60 / MINUTE_STEP) as usize);
        for hour in FIRST_HOUR..=LAST_HOUR {
            for minute in (0..60).step_by(MINUTE_STEP as usize) {
                labels.push(format!("{:02}:{:02}", hour, minute));
            }
        }
        labels
    })
}

pub fn is_catalog_label(label: &str) -> bool {
    time_slot_catalog().iter().any(|l| l == label)
}

/// Catalog labels the group does not occupy yet, in catalog order. This is
/// what the add-slot picker offers inside a group's detail view.
pub fn available_time_slots(group: &SlotGroup) -> Vec<&'static str> {
    time_slot_catalog()
        .iter()
        .filter(|label| !group.appointments.iter().any(|slot| &slot.time_slot == *label))
        .map(|label| label.as_str())
        .collect()
}
