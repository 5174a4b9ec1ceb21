mod document;
mod error;
mod traits;

pub use document::{
    entries_collection_name, Collection, HolidayCache, Settings, SickEntries, StoreDocument,
    Todos, VacationBudgets, VacationEntries, WorkDays,
};
pub use error::{Result, StoreError};
pub use traits::StorageBackend;
