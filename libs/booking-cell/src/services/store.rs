use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{Booking, BookingStatus, QueueInfo};

/// Client-side snapshot of the booking screens. `bookings` backs both the
/// patient's own list and the admin list, whichever was fetched last;
/// `current` and `queue` back the detail and queue views.
#[derive(Debug, Clone, Default)]
pub struct BookingState {
    pub bookings: Vec<Booking>,
    pub current: Option<Booking>,
    pub queue: Option<QueueInfo>,
    pub pending: bool,
}

/// Shared handle over [`BookingState`]. Mutation goes through the
/// reducer-style methods here, driven by the engine's workers and reads.
#[derive(Clone, Default)]
pub struct BookingStore {
    state: Arc<RwLock<BookingState>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> BookingState {
        self.state.read().await.clone()
    }

    pub async fn mark_pending(&self) {
        self.state.write().await.pending = true;
    }

    pub async fn clear_pending(&self) {
        self.state.write().await.pending = false;
    }

    /// Fetch success, own or admin list alike.
    pub async fn apply_bookings(&self, bookings: Vec<Booking>) {
        let mut state = self.state.write().await;
        state.bookings = bookings;
        state.pending = false;
    }

    pub async fn apply_current(&self, booking: Booking) {
        let mut state = self.state.write().await;
        state.current = Some(booking);
        state.pending = false;
    }

    pub async fn apply_queue(&self, queue: QueueInfo) {
        let mut state = self.state.write().await;
        state.queue = Some(queue);
        state.pending = false;
    }

    /// Create success: the authoritative new row tops the list. There is no
    /// provisional row to replace; the code and queue number only exist once
    /// the backend has assigned them.
    pub async fn prepend_booking(&self, booking: Booking) {
        let mut state = self.state.write().await;
        state.bookings.insert(0, booking);
        state.pending = false;
    }

    /// Dispatch-time flip to `cancelled` on whatever local copies show the
    /// booking. The server's answer or the next refetch overwrites this.
    pub async fn mark_cancelled(&self, id: i64) {
        let mut state = self.state.write().await;
        let mut touched = false;
        if let Some(booking) = state.bookings.iter_mut().find(|booking| booking.id == id) {
            booking.status = BookingStatus::Cancelled;
            touched = true;
        }
        if let Some(current) = state.current.as_mut() {
            if current.id == id {
                current.status = BookingStatus::Cancelled;
                touched = true;
            }
        }
        if !touched {
            debug!(id, "cancel target not in local state, nothing to flip");
        }
    }

    /// Cancel confirmed: the server's updated row replaces the local copies.
    pub async fn confirm_cancelled(&self, booking: Booking) {
        let mut state = self.state.write().await;
        if let Some(existing) = state.bookings.iter_mut().find(|b| b.id == booking.id) {
            *existing = booking.clone();
        }
        if let Some(current) = state.current.as_mut() {
            if current.id == booking.id {
                *current = booking;
            }
        }
        state.pending = false;
    }
}
