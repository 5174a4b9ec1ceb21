//! Durable-layer operations, one set per collection.
//!
//! Every mutating operation is a single read-modify-write of one collection
//! through the [`RecordStore`]; it returns the resulting authoritative record
//! or `()`. Read operations return the full collection or a sub-view.

mod absences;
mod budgets;
mod calendar;
mod settings;
mod todos;

use std::sync::Arc;

use worktrack_core::absence::{AbsenceKind, RangeEntry};
use worktrack_core::storage::{Result as StoreResult, SickEntries, VacationEntries};

use crate::error::Result;
use crate::storage::RecordStore;

/// The operations the presentation layer calls to reach durable state.
#[derive(Clone)]
pub struct StoreApi {
    store: Arc<RecordStore>,
}

impl StoreApi {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    async fn update_entries<R>(
        &self,
        kind: AbsenceKind,
        f: impl FnOnce(&mut Vec<RangeEntry>) -> StoreResult<R>,
    ) -> Result<R> {
        let result = match kind {
            AbsenceKind::Vacation => self.store.update::<VacationEntries, R>(f).await,
            AbsenceKind::Sick => self.store.update::<SickEntries, R>(f).await,
        };
        Ok(result?)
    }
}
