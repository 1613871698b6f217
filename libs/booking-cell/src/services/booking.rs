use tracing::debug;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{Booking, FamilyMember, NewBooking, QueueInfo};

/// REST surface of the booking backend. Pure transport, like the
/// schedule service: the engine layers dispatch and reconciliation on top.
#[derive(Clone)]
pub struct BookingService {
    api: ApiClient,
}

impl BookingService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The signed-in user's own bookings, newest first as served.
    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        debug!("fetching own bookings");
        self.api.get("/bookings", &[]).await
    }

    /// Every booking in the system; requires an admin token.
    pub async fn all_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        debug!("fetching all bookings");
        self.api.get("/bookings/admin/all", &[]).await
    }

    pub async fn booking(&self, id: i64) -> Result<Booking, ApiError> {
        debug!(id, "fetching booking");
        self.api.get(&format!("/bookings/{}", id), &[]).await
    }

    pub async fn create(&self, new_booking: &NewBooking) -> Result<Booking, ApiError> {
        debug!(
            specialty_id = new_booking.specialty_id,
            date = %new_booking.date,
            time_slot = %new_booking.time_slot,
            "creating booking"
        );
        self.api.post("/bookings", new_booking).await
    }

    /// Cancels a booking. The backend answers with the updated row.
    pub async fn cancel(&self, id: i64) -> Result<Booking, ApiError> {
        debug!(id, "cancelling booking");
        self.api.post_empty(&format!("/bookings/{}/cancel", id)).await
    }

    pub async fn queue_info(&self, id: i64) -> Result<QueueInfo, ApiError> {
        debug!(id, "fetching queue info");
        self.api.get(&format!("/bookings/{}/queue", id), &[]).await
    }

    pub async fn family_members(&self) -> Result<Vec<FamilyMember>, ApiError> {
        debug!("fetching family members");
        self.api.get("/family-members", &[]).await
    }
}
