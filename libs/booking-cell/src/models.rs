use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// One booked examination, as the backend reports it. `appointment_id`
/// is absent when the booking predates the slot (the backend creates the
/// slot on demand); `patient_id` is absent when the user booked for
/// themselves rather than a family member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_email: Option<String>,
    #[serde(default)]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub appointment_id: Option<i64>,
    pub doctor_id: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub doctor_title: Option<String>,
    pub specialty_id: i64,
    #[serde(default)]
    pub specialty_name: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    pub booking_code: String,
    /// Position in the doctor's queue for the day. The backend serializes
    /// this as a string, zero-padded or not, so it stays opaque here.
    pub queue_number: String,
    pub status: BookingStatus,
    pub examination_date: String,
    pub examination_time: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Lifecycle of a booking. Statuses this client does not know about are
/// carried verbatim in `Other` and re-serialized unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Other(raw) => raw,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, BookingStatus::Confirmed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BookingStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            other => BookingStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for BookingStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StatusVisitor;

        impl<'de> Visitor<'de> for StatusVisitor {
            type Value = BookingStatus;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a booking status string")
            }

            fn visit_str<E>(self, raw: &str) -> Result<BookingStatus, E>
            where
                E: de::Error,
            {
                Ok(BookingStatus::from(raw))
            }
        }

        deserializer.deserialize_str(StatusVisitor)
    }
}

/// Create payload for `POST /bookings`. Either an existing slot id or a
/// doctor id must be present; with only a doctor the backend picks or
/// creates the slot for the requested date and time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i64>,
    pub specialty_id: i64,
    pub date: String,
    pub time_slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
}

impl NewBooking {
    /// Checks the payload before it is allowed near the dispatch queue.
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.appointment_id.is_none() && self.doctor_id.is_none() {
            return Err(BookingError::Validation(
                "Select a time slot or a doctor before booking".to_string(),
            ));
        }
        if self.specialty_id < 1 {
            return Err(BookingError::Validation(
                "A specialty is required".to_string(),
            ));
        }
        if self.date.trim().is_empty() {
            return Err(BookingError::Validation(
                "An examination date is required".to_string(),
            ));
        }
        if self.time_slot.trim().is_empty() {
            return Err(BookingError::Validation(
                "An examination time is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Day-of-visit queue standing for one booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueueInfo {
    pub booking_code: String,
    pub queue_number: String,
    pub waiting_count: i64,
    pub examination_date: String,
    pub examination_time: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
}

/// A relative the account holder can book on behalf of.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
