use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use shared_models::Page;

use crate::error::ScheduleError;
use crate::grouping::{find_group, flatten_page, refresh_totals, sort_slots};
use crate::models::{AppointmentSlot, ScheduleFilter, SlotGroup, SlotPatch};

/// Client-side snapshot of the admin schedule.
///
/// `selected` is a working copy of one group, held while its detail view is
/// open. Optimistic mutations are applied to that copy only; `page` and
/// `slots` keep the last server answer until the next fetch replaces them.
#[derive(Debug, Clone, Default)]
pub struct ScheduleState {
    pub page: Page<SlotGroup>,
    pub slots: Vec<AppointmentSlot>,
    pub selected: Option<SlotGroup>,
    pub editing_id: Option<i64>,
    pub editing_draft: Option<SlotPatch>,
    pub pending: bool,
    pub last_filter: ScheduleFilter,
}

/// Shared handle over [`ScheduleState`]. All mutation goes through the
/// reducer-style methods here; the engine's workers and dispatch methods are
/// the only writers in practice.
#[derive(Clone, Default)]
pub struct ScheduleStore {
    state: Arc<RwLock<ScheduleState>>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> ScheduleState {
        self.state.read().await.clone()
    }

    pub async fn last_filter(&self) -> ScheduleFilter {
        self.state.read().await.last_filter.clone()
    }

    pub async fn set_filter(&self, filter: ScheduleFilter) {
        self.state.write().await.last_filter = filter;
    }

    pub async fn mark_pending(&self) {
        self.state.write().await.pending = true;
    }

    pub async fn clear_pending(&self) {
        self.state.write().await.pending = false;
    }

    /// Fetch success. Replaces the page and the flat list, then reconciles
    /// the selected group against the fresh snapshot:
    ///
    /// - still present (matched by normalized date + doctor) → adopt the
    ///   refreshed group, slots re-sorted;
    /// - absent (moved to another page, deleted) → keep the prior copy;
    /// - an open editing session survives unless its slot id vanished from
    ///   the adopted group, in which case the session is force-closed.
    pub async fn apply_page(&self, page: Page<SlotGroup>) {
        let mut state = self.state.write().await;
        state.slots = flatten_page(&page);
        state.page = page;
        state.pending = false;

        let Some(selected) = state.selected.clone() else {
            return;
        };
        match find_group(&state.page, &selected.date, selected.doctor_id) {
            Some(fresh) => {
                let mut adopted = fresh.clone();
                sort_slots(&mut adopted);
                if let Some(editing_id) = state.editing_id {
                    if !adopted.appointments.iter().any(|slot| slot.id == editing_id) {
                        info!(editing_id, "edited slot gone after refetch, closing edit session");
                        state.editing_id = None;
                        state.editing_draft = None;
                    }
                }
                state.selected = Some(adopted);
            }
            None => {
                debug!(
                    doctor_id = selected.doctor_id,
                    date = %selected.date,
                    "selected group absent from refreshed page, keeping prior copy"
                );
            }
        }
    }

    /// Opens the detail view on a group. Any editing session from a
    /// previously selected group is discarded.
    pub async fn select_group(&self, group: SlotGroup) {
        let mut state = self.state.write().await;
        let mut adopted = group;
        sort_slots(&mut adopted);
        state.editing_id = None;
        state.editing_draft = None;
        state.selected = Some(adopted);
    }

    pub async fn clear_selection(&self) {
        let mut state = self.state.write().await;
        state.selected = None;
        state.editing_id = None;
        state.editing_draft = None;
    }

    pub async fn selected(&self) -> Option<SlotGroup> {
        self.state.read().await.selected.clone()
    }

    /// Opens an editing session on one slot of the selected group. The id is
    /// the durable key; the draft starts from the slot's current capacity.
    pub async fn begin_edit(&self, slot_id: i64) -> Result<(), ScheduleError> {
        let mut state = self.state.write().await;
        let selected = state.selected.as_ref().ok_or(ScheduleError::NoSelection)?;
        let slot = selected
            .appointments
            .iter()
            .find(|slot| slot.id == slot_id)
            .ok_or(ScheduleError::TargetMissing(slot_id))?;
        let draft = SlotPatch { max_patients: slot.max_patients };
        state.editing_id = Some(slot_id);
        state.editing_draft = Some(draft);
        Ok(())
    }

    /// Updates the draft without touching the slot itself.
    pub async fn stage_capacity(&self, max_patients: i32) -> Result<(), ScheduleError> {
        let mut state = self.state.write().await;
        let draft = state.editing_draft.as_mut().ok_or(ScheduleError::NoEditingSession)?;
        draft.max_patients = max_patients;
        Ok(())
    }

    pub async fn editing(&self) -> Option<(i64, SlotPatch)> {
        let state = self.state.read().await;
        match (state.editing_id, state.editing_draft.clone()) {
            (Some(id), Some(draft)) => Some((id, draft)),
            _ => None,
        }
    }

    pub async fn cancel_edit(&self) {
        let mut state = self.state.write().await;
        state.editing_id = None;
        state.editing_draft = None;
    }

    /// Same clearing as `cancel_edit`; called once a capacity change has been
    /// applied and dispatched.
    pub async fn finish_edit(&self) {
        self.cancel_edit().await;
    }

    /// Optimistic add into the selected group.
    pub async fn insert_provisional(&self, slot: AppointmentSlot) {
        let mut state = self.state.write().await;
        if let Some(selected) = state.selected.as_mut() {
            selected.appointments.push(slot);
            sort_slots(selected);
            refresh_totals(selected);
        }
    }

    /// Optimistic capacity change in the selected group.
    pub async fn apply_capacity(&self, slot_id: i64, max_patients: i32) {
        let mut state = self.state.write().await;
        if let Some(selected) = state.selected.as_mut() {
            if let Some(slot) = selected.appointments.iter_mut().find(|slot| slot.id == slot_id) {
                slot.max_patients = max_patients;
            }
            refresh_totals(selected);
        }
    }

    /// Optimistic removal from the selected group.
    pub async fn remove_slot(&self, slot_id: i64) {
        let mut state = self.state.write().await;
        if let Some(selected) = state.selected.as_mut() {
            selected.appointments.retain(|slot| slot.id != slot_id);
            refresh_totals(selected);
        }
    }

    /// Server confirmed a create: the authoritative record joins the flat
    /// list. The grouped page is healed by the next fetch instead.
    pub async fn apply_created(&self, slot: AppointmentSlot) {
        let mut state = self.state.write().await;
        state.slots.push(slot);
        state.pending = false;
    }

    pub async fn apply_updated(&self, slot: AppointmentSlot) {
        let mut state = self.state.write().await;
        if let Some(existing) = state.slots.iter_mut().find(|s| s.id == slot.id) {
            *existing = slot;
        }
        state.pending = false;
    }

    pub async fn apply_deleted(&self, slot_id: i64) {
        let mut state = self.state.write().await;
        state.slots.retain(|slot| slot.id != slot_id);
        state.pending = false;
    }

    /// Looks a slot up in the selected group first, then in the flat list.
    pub async fn find_slot(&self, slot_id: i64) -> Option<AppointmentSlot> {
        let state = self.state.read().await;
        state
            .selected
            .as_ref()
            .and_then(|group| group.appointments.iter().find(|slot| slot.id == slot_id))
            .or_else(|| state.slots.iter().find(|slot| slot.id == slot_id))
            .cloned()
    }
}
