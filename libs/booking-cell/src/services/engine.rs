use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::{ApiError, Notifier};

use crate::error::BookingError;
use crate::models::{Booking, FamilyMember, NewBooking, QueueInfo};
use crate::services::booking::BookingService;
use crate::services::store::{BookingState, BookingStore};

/// Front door of the booking screens. Mutations go through one worker per
/// action type, exactly like the schedule engine: dispatch validates,
/// applies whatever local mutation the view needs, queues the request and
/// schedules the reconcile fetch. Reads are plain awaited calls whose
/// failures surface to the caller instead of a notice channel.
#[derive(Clone)]
pub struct BookingEngine {
    service: BookingService,
    store: BookingStore,
    reconcile_delay: Duration,
    create_tx: UnboundedSender<NewBooking>,
    cancel_tx: UnboundedSender<i64>,
    fetch_all_tx: UnboundedSender<()>,
}

impl BookingEngine {
    pub fn start(config: &AppConfig, api: ApiClient, notifier: Notifier) -> Self {
        let service = BookingService::new(api);
        let store = BookingStore::new();

        let (create_tx, create_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = mpsc::unbounded_channel();
        let (fetch_all_tx, fetch_all_rx) = mpsc::unbounded_channel();

        tokio::spawn(create_worker(service.clone(), store.clone(), notifier.clone(), create_rx));
        tokio::spawn(cancel_worker(service.clone(), store.clone(), notifier.clone(), cancel_rx));
        tokio::spawn(fetch_all_worker(service.clone(), store.clone(), notifier, fetch_all_rx));

        info!("booking engine started");
        Self {
            service,
            store,
            reconcile_delay: config.reconcile_delay(),
            create_tx,
            cancel_tx,
            fetch_all_tx,
        }
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    pub async fn snapshot(&self) -> BookingState {
        self.store.snapshot().await
    }

    /// The signed-in user's bookings, stored and returned.
    pub async fn my_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        fetch_own(&self.service, &self.store).await.map_err(Into::into)
    }

    pub async fn booking(&self, id: i64) -> Result<Booking, BookingError> {
        self.store.mark_pending().await;
        match self.service.booking(id).await {
            Ok(booking) => {
                self.store.apply_current(booking.clone()).await;
                Ok(booking)
            }
            Err(err) => {
                self.store.clear_pending().await;
                Err(err.into())
            }
        }
    }

    pub async fn queue_info(&self, id: i64) -> Result<QueueInfo, BookingError> {
        self.store.mark_pending().await;
        match self.service.queue_info(id).await {
            Ok(queue) => {
                self.store.apply_queue(queue.clone()).await;
                Ok(queue)
            }
            Err(err) => {
                self.store.clear_pending().await;
                Err(err.into())
            }
        }
    }

    /// Relatives bookable on behalf of. Kept off the store; the booking form
    /// consumes the list directly.
    pub async fn family_members(&self) -> Result<Vec<FamilyMember>, BookingError> {
        self.service.family_members().await.map_err(Into::into)
    }

    /// Books an appointment. Nothing is inserted locally at dispatch time:
    /// the booking code and queue number only exist once the backend has
    /// assigned them, so the confirmed row arrives via the worker and the
    /// reconcile fetch.
    #[instrument(skip(self, new_booking), fields(specialty_id = new_booking.specialty_id, date = %new_booking.date))]
    pub async fn create(&self, new_booking: NewBooking) -> Result<(), BookingError> {
        new_booking.validate()?;

        let dispatch_id = Uuid::new_v4();
        debug!(%dispatch_id, "dispatching booking create");
        self.create_tx
            .send(new_booking)
            .map_err(|_| BookingError::Dispatch("create worker stopped".to_string()))?;
        self.schedule_reconcile(dispatch_id);
        Ok(())
    }

    /// Cancels a booking. The local copies flip to `cancelled` immediately;
    /// the server's answer and the reconcile fetch make it authoritative.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: i64) -> Result<(), BookingError> {
        let dispatch_id = Uuid::new_v4();
        debug!(%dispatch_id, id, "dispatching booking cancel");
        self.store.mark_cancelled(id).await;
        self.cancel_tx
            .send(id)
            .map_err(|_| BookingError::Dispatch("cancel worker stopped".to_string()))?;
        self.schedule_reconcile(dispatch_id);
        Ok(())
    }

    /// Reloads the admin list. Failures become notices, not errors; the
    /// admin table keeps whatever it had.
    pub fn refresh_all(&self) -> Result<(), BookingError> {
        self.fetch_all_tx
            .send(())
            .map_err(|_| BookingError::Dispatch("fetch worker stopped".to_string()))
    }

    /// Every mutating dispatch is followed by one delayed refetch of the
    /// user's own list. The delay gives the backend room to commit.
    fn schedule_reconcile(&self, dispatch_id: Uuid) {
        let service = self.service.clone();
        let store = self.store.clone();
        let delay = self.reconcile_delay;
        tokio::spawn(async move {
            sleep(delay).await;
            debug!(%dispatch_id, "running reconcile fetch");
            if let Err(err) = fetch_own(&service, &store).await {
                warn!(%dispatch_id, error = %err, "reconcile fetch failed, keeping local state");
            }
        });
    }
}

/// Shared by the `my_bookings` read and the reconcile task.
async fn fetch_own(
    service: &BookingService,
    store: &BookingStore,
) -> Result<Vec<Booking>, ApiError> {
    store.mark_pending().await;
    match service.my_bookings().await {
        Ok(bookings) => {
            store.apply_bookings(bookings.clone()).await;
            Ok(bookings)
        }
        Err(err) => {
            store.clear_pending().await;
            Err(err)
        }
    }
}

async fn create_worker(
    service: BookingService,
    store: BookingStore,
    notifier: Notifier,
    mut inbox: UnboundedReceiver<NewBooking>,
) {
    debug!("create worker started");
    while let Some(new_booking) = inbox.recv().await {
        store.mark_pending().await;
        match service.create(&new_booking).await {
            Ok(booking) => {
                info!(id = booking.id, code = %booking.booking_code, "booking created");
                store.prepend_booking(booking).await;
                notifier.success("Appointment booked");
            }
            Err(err) => {
                error!(error = %err, "booking create failed");
                store.clear_pending().await;
                notifier.error(err.reason_or("Failed to book the appointment"));
            }
        }
    }
    debug!("create worker stopped");
}

async fn cancel_worker(
    service: BookingService,
    store: BookingStore,
    notifier: Notifier,
    mut inbox: UnboundedReceiver<i64>,
) {
    debug!("cancel worker started");
    while let Some(id) = inbox.recv().await {
        store.mark_pending().await;
        match service.cancel(id).await {
            Ok(booking) => {
                info!(id, "booking cancelled");
                store.confirm_cancelled(booking).await;
                notifier.success("Booking cancelled");
            }
            Err(err) => {
                error!(id, error = %err, "booking cancel failed");
                store.clear_pending().await;
                notifier.error(err.reason_or("Failed to cancel the booking"));
            }
        }
    }
    debug!("cancel worker stopped");
}

async fn fetch_all_worker(
    service: BookingService,
    store: BookingStore,
    notifier: Notifier,
    mut inbox: UnboundedReceiver<()>,
) {
    debug!("fetch worker started");
    while inbox.recv().await.is_some() {
        store.mark_pending().await;
        match service.all_bookings().await {
            Ok(bookings) => {
                debug!(count = bookings.len(), "admin booking list applied");
                store.apply_bookings(bookings).await;
            }
            Err(err) => {
                error!(error = %err, "admin booking fetch failed");
                store.clear_pending().await;
                notifier.error(err.reason_or("Failed to load bookings"));
            }
        }
    }
    debug!("fetch worker stopped");
}
