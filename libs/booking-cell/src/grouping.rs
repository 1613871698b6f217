use std::collections::BTreeMap;

use schedule_cell::AvailableSlot;

pub const UNCLASSIFIED_SPECIALTY: &str = "Chưa phân loại";
pub const UNKNOWN_ROOM: &str = "N/A";

/// One card of the patient-facing picker: every open slot of one
/// specialty in one physical room.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialtyRoomGroup {
    /// Zero when the availability rows carried no specialty.
    pub specialty_id: i64,
    pub specialty_name: String,
    pub room: String,
    pub building: String,
    pub slots: Vec<AvailableSlot>,
}

/// Buckets availability rows by specialty, then by room and building
/// within each specialty. Specialties come out in ascending id order
/// with the unclassified bucket first; rooms keep the order they first
/// appeared in; slots keep the order the backend sent them in. Every
/// input row lands in exactly one group, full slots included.
pub fn group_by_specialty_room(slots: &[AvailableSlot]) -> Vec<SpecialtyRoomGroup> {
    let mut specialties: BTreeMap<i64, Vec<SpecialtyRoomGroup>> = BTreeMap::new();

    for slot in slots {
        let specialty_id = slot.specialty_id.unwrap_or(0);
        let room = slot.room.clone().unwrap_or_else(|| UNKNOWN_ROOM.to_string());
        let building = slot
            .building
            .clone()
            .unwrap_or_else(|| UNKNOWN_ROOM.to_string());

        let rooms = specialties.entry(specialty_id).or_default();
        let idx = match rooms
            .iter()
            .position(|group| group.room == room && group.building == building)
        {
            Some(idx) => idx,
            None => {
                rooms.push(SpecialtyRoomGroup {
                    specialty_id,
                    specialty_name: slot
                        .specialty_name
                        .clone()
                        .unwrap_or_else(|| UNCLASSIFIED_SPECIALTY.to_string()),
                    room,
                    building,
                    slots: Vec::new(),
                });
                rooms.len() - 1
            }
        };
        rooms[idx].slots.push(slot.clone());
    }

    specialties.into_values().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use shared_utils::test_utils::MockBackendResponses;

    fn slot(
        appointment_id: i64,
        specialty: Option<(i64, &str)>,
        room: Option<&str>,
        time_slot: &str,
        available: i64,
    ) -> AvailableSlot {
        let value: Value = MockBackendResponses::available_slot(
            Some(appointment_id),
            4,
            specialty,
            room,
            time_slot,
            available,
        );
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn groups_by_specialty_then_room() {
        let slots = vec![
            slot(1, Some((2, "Da liễu")), Some("P.301"), "08:00", 3),
            slot(2, Some((1, "Nội tổng quát")), Some("P.205"), "08:15", 2),
            slot(3, Some((2, "Da liễu")), Some("P.302"), "08:30", 1),
            slot(4, Some((2, "Da liễu")), Some("P.301"), "08:45", 5),
        ];

        let groups = group_by_specialty_room(&slots);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].specialty_id, 1);
        assert_eq!(groups[0].room, "P.205");
        assert_eq!(groups[1].specialty_id, 2);
        assert_eq!(groups[1].room, "P.301");
        assert_eq!(groups[2].room, "P.302");

        let first_room_times: Vec<&str> = groups[1]
            .slots
            .iter()
            .map(|slot| slot.time_slot.as_str())
            .collect();
        assert_eq!(first_room_times, ["08:00", "08:45"]);
    }

    #[test]
    fn missing_specialty_and_room_fall_back_to_sentinels() {
        let slots = vec![slot(9, None, None, "10:00", 4)];

        let groups = group_by_specialty_room(&slots);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].specialty_id, 0);
        assert_eq!(groups[0].specialty_name, UNCLASSIFIED_SPECIALTY);
        assert_eq!(groups[0].room, UNKNOWN_ROOM);
        assert_eq!(groups[0].building, UNKNOWN_ROOM);
    }

    #[test]
    fn specialties_order_numerically_with_unclassified_first() {
        let slots = vec![
            slot(1, Some((11, "Tim mạch")), Some("P.401"), "08:00", 1),
            slot(2, Some((2, "Da liễu")), Some("P.301"), "08:00", 1),
            slot(3, None, None, "08:00", 1),
        ];

        let ids: Vec<i64> = group_by_specialty_room(&slots)
            .iter()
            .map(|group| group.specialty_id)
            .collect();

        assert_eq!(ids, [0, 2, 11]);
    }

    #[test]
    fn every_row_lands_in_exactly_one_group() {
        let slots = vec![
            slot(1, Some((1, "Nội tổng quát")), Some("P.205"), "08:00", 2),
            slot(2, Some((1, "Nội tổng quát")), Some("P.205"), "08:15", 0),
            slot(3, Some((1, "Nội tổng quát")), Some("P.206"), "08:00", 1),
            slot(4, None, Some("P.205"), "08:00", 1),
        ];

        let groups = group_by_specialty_room(&slots);
        let total: usize = groups.iter().map(|group| group.slots.len()).sum();

        assert_eq!(total, slots.len());
        // A slot with no seats left still renders; the picker greys it out.
        assert!(groups
            .iter()
            .flat_map(|group| &group.slots)
            .any(|slot| slot.available_count == 0));
    }
}
