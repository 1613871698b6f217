use shared_models::Page;
use shared_utils::normalize_date_key;

use crate::models::{AppointmentSlot, SlotGroup};

/// Slots inside a group are presented in ascending `HH:MM` order. Labels
/// are zero padded, so plain string comparison is the right sort.
pub fn sort_slots(group: &mut SlotGroup) {
    group.appointments.sort_by(|a, b| a.time_slot.cmp(&b.time_slot));
}

/// Recomputes the three aggregates from the slot list. Local mutations call
/// this instead of patching the totals incrementally, so the invariant
/// "totals equal the sums" can never drift.
pub fn refresh_totals(group: &mut SlotGroup) {
    group.total_slots = group.appointments.len() as i64;
    group.total_patients =
        group.appointments.iter().map(|slot| slot.current_patients as i64).sum();
    group.total_max_patients =
        group.appointments.iter().map(|slot| slot.max_patients as i64).sum();
}

/// The cross-group flat list kept alongside the page.
pub fn flatten_page(page: &Page<SlotGroup>) -> Vec<AppointmentSlot> {
    page.content.iter().flat_map(|group| group.appointments.iter().cloned()).collect()
}

/// Group identity is the normalized date plus the doctor. The raw date
/// strings on the two sides may use different formats for the same day.
pub fn group_matches(group: &SlotGroup, date: &str, doctor_id: i64) -> bool {
    group.doctor_id == doctor_id && normalize_date_key(&group.date) == normalize_date_key(date)
}

pub fn find_group<'a>(
    page: &'a Page<SlotGroup>,
    date: &str,
    doctor_id: i64,
) -> Option<&'a SlotGroup> {
    page.content.iter().find(|group| group_matches(group, date, doctor_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: i64, date: &str, time_slot: &str, current: i32, max: i32) -> AppointmentSlot {
        AppointmentSlot {
            id,
            doctor_id: 4,
            doctor_name: Some("Dr. 4".to_string()),
            doctor_title: None,
            specialty_id: 1,
            date: date.to_string(),
            time_slot: time_slot.to_string(),
            room: None,
            building: None,
            max_patients: max,
            current_patients: current,
            created_at: None,
            updated_at: None,
        }
    }

    fn group(date: &str, doctor_id: i64, slots: Vec<AppointmentSlot>) -> SlotGroup {
        let mut group = SlotGroup {
            date: date.to_string(),
            doctor_id,
            doctor_name: Some(format!("Dr. {}", doctor_id)),
            doctor_title: None,
            specialty_id: 1,
            room: None,
            building: None,
            appointments: slots,
            total_slots: 0,
            total_patients: 0,
            total_max_patients: 0,
        };
        refresh_totals(&mut group);
        group
    }

    fn page_of(groups: Vec<SlotGroup>) -> Page<SlotGroup> {
        Page { content: groups, ..Page::empty() }
    }

    #[test]
    fn slots_sort_by_time_label() {
        let mut g = group(
            "2025-03-10",
            4,
            vec![
                slot(3, "2025-03-10", "14:30", 0, 20),
                slot(1, "2025-03-10", "07:15", 0, 20),
                slot(2, "2025-03-10", "09:00", 0, 20),
            ],
        );
        sort_slots(&mut g);
        let order: Vec<&str> = g.appointments.iter().map(|s| s.time_slot.as_str()).collect();
        assert_eq!(order, vec!["07:15", "09:00", "14:30"]);
    }

    #[test]
    fn totals_are_the_sums_over_the_slots() {
        let g = group(
            "2025-03-10",
            4,
            vec![
                slot(1, "2025-03-10", "07:00", 5, 20),
                slot(2, "2025-03-10", "07:15", 12, 30),
            ],
        );
        assert_eq!(g.total_slots, 2);
        assert_eq!(g.total_patients, 17);
        assert_eq!(g.total_max_patients, 50);
    }

    #[test]
    fn flatten_collects_every_slot_across_groups() {
        let page = page_of(vec![
            group("2025-03-10", 4, vec![slot(1, "2025-03-10", "07:00", 0, 20)]),
            group(
                "2025-03-11",
                5,
                vec![
                    slot(2, "2025-03-11", "08:00", 0, 20),
                    slot(3, "2025-03-11", "08:15", 0, 20),
                ],
            ),
        ]);
        let flat = flatten_page(&page);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn groups_match_across_date_formats() {
        let g = group("2025-03-10T00:00:00Z", 4, vec![]);
        assert!(group_matches(&g, "2025-03-10", 4));
        assert!(group_matches(&g, "2025-03-10 08:30:00", 4));
        assert!(!group_matches(&g, "2025-03-11", 4));
        assert!(!group_matches(&g, "2025-03-10", 5));
    }

    #[test]
    fn find_group_locates_by_normalized_identity() {
        let page = page_of(vec![
            group("2025-03-10", 4, vec![]),
            group("2025-03-10T00:00:00Z", 5, vec![]),
        ]);
        assert_eq!(find_group(&page, "2025-03-10", 5).map(|g| g.doctor_id), Some(5));
        assert!(find_group(&page, "2025-03-12", 4).is_none());
    }
}
