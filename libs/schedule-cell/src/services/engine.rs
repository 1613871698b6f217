use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::Notifier;
use shared_utils::normalize_date_key;

use crate::catalog::{available_time_slots, is_catalog_label};
use crate::error::ScheduleError;
use crate::models::{
    AppointmentSlot, NewSlot, ScheduleFilter, SlotGroup, SlotPatch, DEFAULT_CAPACITY,
    MAX_CAPACITY, MIN_CAPACITY,
};
use crate::services::schedule::ScheduleService;
use crate::services::store::{ScheduleState, ScheduleStore};

struct SlotUpdate {
    id: i64,
    patch: SlotPatch,
}

/// Front door of the admin schedule. Dispatch methods validate, apply the
/// optimistic mutation, hand the request to the matching worker and schedule
/// the reconcile fetch that makes the server's answer authoritative again.
///
/// One worker per action type: two creates queue behind each other, while a
/// create and an update run concurrently. Deletes are the exception, each
/// one runs in its own detached task.
#[derive(Clone)]
pub struct ScheduleEngine {
    store: ScheduleStore,
    reconcile_delay: Duration,
    fetch_tx: UnboundedSender<ScheduleFilter>,
    create_tx: UnboundedSender<NewSlot>,
    update_tx: UnboundedSender<SlotUpdate>,
    delete_tx: UnboundedSender<i64>,
}

impl ScheduleEngine {
    pub fn start(config: &AppConfig, api: ApiClient, notifier: Notifier) -> Self {
        let service = ScheduleService::new(api);
        let store = ScheduleStore::new();

        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let (create_tx, create_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let (delete_tx, delete_rx) = mpsc::unbounded_channel();

        tokio::spawn(fetch_worker(service.clone(), store.clone(), notifier.clone(), fetch_rx));
        tokio::spawn(create_worker(service.clone(), store.clone(), notifier.clone(), create_rx));
        tokio::spawn(update_worker(service.clone(), store.clone(), notifier.clone(), update_rx));
        tokio::spawn(delete_worker(service, store.clone(), notifier, delete_rx));

        info!("schedule engine started");
        Self {
            store,
            reconcile_delay: config.reconcile_delay(),
            fetch_tx,
            create_tx,
            update_tx,
            delete_tx,
        }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub async fn snapshot(&self) -> ScheduleState {
        self.store.snapshot().await
    }

    /// Loads (or reloads) the admin page. The filter is remembered so that
    /// later reconcile fetches hit the same page.
    pub async fn fetch(&self, filter: ScheduleFilter) -> Result<(), ScheduleError> {
        self.store.set_filter(filter.clone()).await;
        self.fetch_tx
            .send(filter)
            .map_err(|_| ScheduleError::Dispatch("fetch worker stopped".to_string()))
    }

    /// Creates a slot outside any detail view. No optimistic insert here:
    /// without a selected group there is no local view to patch, the
    /// reconcile fetch brings the new row in.
    #[instrument(skip(self, new_slot), fields(doctor_id = new_slot.doctor_id, time_slot = %new_slot.time_slot))]
    pub async fn create_slot(&self, mut new_slot: NewSlot) -> Result<(), ScheduleError> {
        validate_capacity(new_slot.max_patients)?;
        validate_label(&new_slot.time_slot)?;
        if new_slot.date.trim().is_empty() {
            return Err(ScheduleError::Validation("A date is required".to_string()));
        }
        new_slot.date = normalize_date_key(&new_slot.date);

        let dispatch_id = Uuid::new_v4();
        debug!(%dispatch_id, "dispatching slot create");
        self.create_tx
            .send(new_slot)
            .map_err(|_| ScheduleError::Dispatch("create worker stopped".to_string()))?;
        self.schedule_reconcile(dispatch_id);
        Ok(())
    }

    /// Adds one time slot to the currently selected day. The provisional row
    /// appears immediately with a timestamp id; the reconcile fetch replaces
    /// it with the server's row. Capacity defaults to 20 when not given.
    #[instrument(skip(self))]
    pub async fn add_slot_to_selected(
        &self,
        time_slot: &str,
        max_patients: Option<i32>,
    ) -> Result<(), ScheduleError> {
        let max_patients = max_patients.unwrap_or(DEFAULT_CAPACITY);
        validate_capacity(max_patients)?;
        let selected = self.store.selected().await.ok_or(ScheduleError::NoSelection)?;
        let time_slot = time_slot.trim();
        validate_label(time_slot)?;
        if !available_time_slots(&selected).iter().any(|label| *label == time_slot) {
            return Err(ScheduleError::Validation(format!(
                "{} is already scheduled for this day",
                time_slot
            )));
        }

        let provisional = AppointmentSlot::provisional(&selected, time_slot, max_patients);
        let new_slot = NewSlot {
            doctor_id: selected.doctor_id,
            specialty_id: selected.specialty_id,
            date: normalize_date_key(&selected.date),
            time_slot: time_slot.to_string(),
            max_patients,
        };

        let dispatch_id = Uuid::new_v4();
        debug!(%dispatch_id, provisional_id = provisional.id, "dispatching slot add");
        self.store.insert_provisional(provisional).await;
        self.create_tx
            .send(new_slot)
            .map_err(|_| ScheduleError::Dispatch("create worker stopped".to_string()))?;
        self.schedule_reconcile(dispatch_id);
        Ok(())
    }

    /// Commits the open editing session with the given capacity. The editing
    /// id is the correlation key; a slot that vanished from the selected
    /// group since the session opened aborts the commit.
    #[instrument(skip(self))]
    pub async fn update_capacity(&self, max_patients: i32) -> Result<(), ScheduleError> {
        let (editing_id, _) = self.store.editing().await.ok_or(ScheduleError::NoEditingSession)?;
        validate_capacity(max_patients)?;
        let selected = self.store.selected().await.ok_or(ScheduleError::NoSelection)?;
        if !selected.appointments.iter().any(|slot| slot.id == editing_id) {
            return Err(ScheduleError::TargetMissing(editing_id));
        }

        let dispatch_id = Uuid::new_v4();
        debug!(%dispatch_id, id = editing_id, "dispatching capacity update");
        self.store.apply_capacity(editing_id, max_patients).await;
        self.store.finish_edit().await;
        self.update_tx
            .send(SlotUpdate { id: editing_id, patch: SlotPatch { max_patients } })
            .map_err(|_| ScheduleError::Dispatch("update worker stopped".to_string()))?;
        self.schedule_reconcile(dispatch_id);
        Ok(())
    }

    /// Deletes a slot. A slot that already has booked patients is refused
    /// locally, nothing reaches the backend.
    #[instrument(skip(self))]
    pub async fn delete_slot(&self, slot_id: i64) -> Result<(), ScheduleError> {
        let slot =
            self.store.find_slot(slot_id).await.ok_or(ScheduleError::TargetMissing(slot_id))?;
        if slot.current_patients > 0 {
            return Err(ScheduleError::HasBookedPatients { booked: slot.current_patients });
        }

        let dispatch_id = Uuid::new_v4();
        debug!(%dispatch_id, id = slot_id, "dispatching slot delete");
        self.store.remove_slot(slot_id).await;
        self.delete_tx
            .send(slot_id)
            .map_err(|_| ScheduleError::Dispatch("delete worker stopped".to_string()))?;
        self.schedule_reconcile(dispatch_id);
        Ok(())
    }

    pub async fn select_group(&self, group: SlotGroup) {
        self.store.select_group(group).await;
    }

    pub async fn clear_selection(&self) {
        self.store.clear_selection().await;
    }

    pub async fn begin_edit(&self, slot_id: i64) -> Result<(), ScheduleError> {
        self.store.begin_edit(slot_id).await
    }

    pub async fn stage_capacity(&self, max_patients: i32) -> Result<(), ScheduleError> {
        self.store.stage_capacity(max_patients).await
    }

    pub async fn cancel_edit(&self) {
        self.store.cancel_edit().await;
    }

    /// Every mutating dispatch is followed by one delayed fetch of the last
    /// filter. The delay gives the backend room to commit before we read.
    fn schedule_reconcile(&self, dispatch_id: Uuid) {
        let store = self.store.clone();
        let fetch_tx = self.fetch_tx.clone();
        let delay = self.reconcile_delay;
        tokio::spawn(async move {
            sleep(delay).await;
            let filter = store.last_filter().await;
            debug!(%dispatch_id, "running reconcile fetch");
            if fetch_tx.send(filter).is_err() {
                warn!(%dispatch_id, "fetch worker gone, reconcile fetch dropped");
            }
        });
    }
}

async fn fetch_worker(
    service: ScheduleService,
    store: ScheduleStore,
    notifier: Notifier,
    mut inbox: UnboundedReceiver<ScheduleFilter>,
) {
    debug!("fetch worker started");
    while let Some(filter) = inbox.recv().await {
        store.mark_pending().await;
        match service.fetch_page(&filter).await {
            Ok(page) => {
                debug!(groups = page.len(), "schedule page applied");
                store.apply_page(page).await;
            }
            Err(err) => {
                error!(error = %err, "schedule fetch failed");
                store.clear_pending().await;
                notifier.error(err.reason_or("Failed to load the schedule"));
            }
        }
    }
    debug!("fetch worker stopped");
}

async fn create_worker(
    service: ScheduleService,
    store: ScheduleStore,
    notifier: Notifier,
    mut inbox: UnboundedReceiver<NewSlot>,
) {
    debug!("create worker started");
    while let Some(new_slot) = inbox.recv().await {
        store.mark_pending().await;
        match service.create_slot(&new_slot).await {
            Ok(slot) => {
                info!(id = slot.id, time_slot = %slot.time_slot, "slot created");
                store.apply_created(slot).await;
                notifier.success("Time slot created");
            }
            Err(err) => {
                error!(error = %err, "slot create failed");
                store.clear_pending().await;
                notifier.error(err.reason_or("Failed to create the time slot"));
            }
        }
    }
    debug!("create worker stopped");
}

async fn update_worker(
    service: ScheduleService,
    store: ScheduleStore,
    notifier: Notifier,
    mut inbox: UnboundedReceiver<SlotUpdate>,
) {
    debug!("update worker started");
    while let Some(update) = inbox.recv().await {
        store.mark_pending().await;
        match service.update_slot(update.id, &update.patch).await {
            Ok(slot) => {
                info!(id = slot.id, max_patients = slot.max_patients, "slot updated");
                store.apply_updated(slot).await;
                notifier.success("Time slot updated");
            }
            Err(err) => {
                error!(id = update.id, error = %err, "slot update failed");
                store.clear_pending().await;
                notifier.error(err.reason_or("Failed to update the time slot"));
            }
        }
    }
    debug!("update worker stopped");
}

/// Unlike the other workers this one does not run its requests inline: each
/// delete goes to its own task so several can be in flight at once.
async fn delete_worker(
    service: ScheduleService,
    store: ScheduleStore,
    notifier: Notifier,
    mut inbox: UnboundedReceiver<i64>,
) {
    debug!("delete worker started");
    while let Some(slot_id) = inbox.recv().await {
        let service = service.clone();
        let store = store.clone();
        let notifier = notifier.clone();
        tokio::spawn(async move {
            match service.delete_slot(slot_id).await {
                Ok(()) => {
                    info!(id = slot_id, "slot deleted");
                    store.apply_deleted(slot_id).await;
                    notifier.success("Time slot deleted");
                }
                Err(err) => {
                    error!(id = slot_id, error = %err, "slot delete failed");
                    notifier.error(err.reason_or("Failed to delete the time slot"));
                }
            }
        });
    }
    debug!("delete worker stopped");
}

fn validate_capacity(max_patients: i32) -> Result<(), ScheduleError> {
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&max_patients) {
        return Err(ScheduleError::Validation(format!(
            "Patient capacity must be between {} and {}",
            MIN_CAPACITY, MAX_CAPACITY
        )));
    }
    Ok(())
}

fn validate_label(time_slot: &str) -> Result<(), ScheduleError> {
    if !is_catalog_label(time_slot) {
        return Err(ScheduleError::Validation(format!("{} is not a bookable time", time_slot)));
    }
    Ok(())
}
