use tracing::debug;

use shared_api::ApiClient;
use shared_models::{ApiError, Page};

use crate::models::{AppointmentSlot, AvailableSlot, NewSlot, ScheduleFilter, SlotGroup, SlotPatch};

/// REST surface of the scheduling backend. Pure transport: no local state,
/// no optimistic behavior. The engine layers the booking protocol on top.
#[derive(Clone)]
pub struct ScheduleService {
    api: ApiClient,
}

impl ScheduleService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// One admin page of slots, grouped by day and doctor server-side.
    pub async fn fetch_page(&self, filter: &ScheduleFilter) -> Result<Page<SlotGroup>, ApiError> {
        debug!(page = filter.page, size = filter.size, "fetching appointment page");
        self.api.get("/appointments", &filter.to_query()).await
    }

    pub async fn create_slot(&self, new_slot: &NewSlot) -> Result<AppointmentSlot, ApiError> {
        debug!(
            doctor_id = new_slot.doctor_id,
            time_slot = %new_slot.time_slot,
            "creating appointment slot"
        );
        self.api.post("/appointments", new_slot).await
    }

    pub async fn update_slot(&self, id: i64, patch: &SlotPatch) -> Result<AppointmentSlot, ApiError> {
        debug!(id, max_patients = patch.max_patients, "updating appointment slot");
        self.api.put(&format!("/appointments/{}", id), patch).await
    }

    pub async fn delete_slot(&self, id: i64) -> Result<(), ApiError> {
        debug!(id, "deleting appointment slot");
        self.api.delete(&format!("/appointments/{}", id)).await
    }

    /// Bookable slots for one specialty and day, optionally narrowed to a
    /// doctor or a doctor title.
    pub async fn available_slots(
        &self,
        specialty_id: i64,
        date: &str,
        doctor_id: Option<i64>,
        title: Option<&str>,
    ) -> Result<Vec<AvailableSlot>, ApiError> {
        debug!(specialty_id, date, "fetching available slots");
        let mut query = vec![
            ("specialtyId", specialty_id.to_string()),
            ("date", date.to_string()),
        ];
        if let Some(doctor_id) = doctor_id {
            query.push(("doctorId", doctor_id.to_string()));
        }
        if let Some(title) = title {
            query.push(("title", title.to_string()));
        }
        self.api.get("/appointments/available", &query).await
    }
}
