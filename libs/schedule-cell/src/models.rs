use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_utils::normalize_date_key;

pub const MIN_CAPACITY: i32 = 1;
pub const MAX_CAPACITY: i32 = 50;
pub const DEFAULT_CAPACITY: i32 = 20;

/// One bookable 15-minute examination window of one doctor on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSlot {
    pub id: i64,
    pub doctor_id: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub doctor_title: Option<String>,
    pub specialty_id: i64,
    /// Arrives as either `YYYY-MM-DD` or a full timestamp; compare through
    /// `shared_utils::normalize_date_key`, never directly.
    pub date: String,
    pub time_slot: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    pub max_patients: i32,
    pub current_patients: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppointmentSlot {
    /// Locally synthesized slot shown while the backend confirms a create.
    /// The millisecond timestamp id cannot collide with the backend's small
    /// sequential ids, and the next refetch replaces it with the real row.
    pub fn provisional(group: &SlotGroup, time_slot: &str, max_patients: i32) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            doctor_id: group.doctor_id,
            doctor_name: group.doctor_name.clone(),
            doctor_title: group.doctor_title.clone(),
            specialty_id: group.specialty_id,
            date: normalize_date_key(&group.date),
            time_slot: time_slot.to_string(),
            room: group.room.clone(),
            building: group.building.clone(),
            max_patients,
            current_patients: 0,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Admin view row: all slots of one doctor on one date, with the aggregate
/// totals the backend reports alongside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotGroup {
    pub date: String,
    pub doctor_id: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub doctor_title: Option<String>,
    pub specialty_id: i64,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    pub appointments: Vec<AppointmentSlot>,
    #[serde(default)]
    pub total_slots: i64,
    #[serde(default)]
    pub total_patients: i64,
    #[serde(default)]
    pub total_max_patients: i64,
}

/// Availability row for the patient-facing picker. A null `appointmentId`
/// marks a slot the backend will create on demand when booked. The
/// specialty fields are not always present; grouping falls back to its
/// sentinels when they are missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub appointment_id: Option<i64>,
    pub doctor_id: i64,
    pub doctor_name: String,
    #[serde(default)]
    pub doctor_title: Option<String>,
    pub time_slot: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    pub available_count: i64,
    pub current_patients: i32,
    pub max_patients: i32,
    #[serde(default)]
    pub specialty_id: Option<i64>,
    #[serde(default, rename = "specialty")]
    pub specialty_name: Option<String>,
}

/// Create payload for `POST /appointments`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewSlot {
    pub doctor_id: i64,
    pub specialty_id: i64,
    pub date: String,
    pub time_slot: String,
    pub max_patients: i32,
}

/// Update payload for `PUT /appointments/{id}`. Capacity is the only
/// editable field of an existing slot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlotPatch {
    pub max_patients: i32,
}

/// Query for the admin page listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub doctor_id: Option<i64>,
    pub specialty_id: Option<i64>,
    pub date: Option<String>,
    pub page: i64,
    pub size: i64,
}

impl Default for ScheduleFilter {
    fn default() -> Self {
        Self { doctor_id: None, specialty_id: None, date: None, page: 0, size: 10 }
    }
}

impl ScheduleFilter {
    pub fn for_doctor(doctor_id: i64) -> Self {
        Self { doctor_id: Some(doctor_id), ..Self::default() }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(doctor_id) = self.doctor_id {
            query.push(("doctorId", doctor_id.to_string()));
        }
        if let Some(specialty_id) = self.specialty_id {
            query.push(("specialtyId", specialty_id.to_string()));
        }
        if let Some(date) = &self.date {
            query.push(("date", date.clone()));
        }
        query.push(("page", self.page.to_string()));
        query.push(("size", self.size.to_string()));
        query
    }
}
