//! In-memory list controllers for tanks and fish
//!
//! A controller mirrors one entity list from the store. After the initial
//! load it patches its cache locally on every successful mutation instead of
//! re-reading the table. Overlapping calls are not serialized, so the cache
//! reflects completion order.

pub mod fish_list;
pub mod tank_list;


pub use fish_list::FishListController;
pub use tank_list::TankListController;

use crate::models::Identified;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

/// Snapshot of a controller's cache
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListState<T> {
    /// Newest first
    pub items: Vec<T>,
    /// True until the first load attempt finishes, successful or not.
    pub loading: bool,
    /// Message from the last failed load, cleared by the next good one.
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

pub(crate) struct ListCache<T> {
    state: Mutex<ListState<T>>,
}

impl<T: Identified + Clone> ListCache<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(ListState::default()),
        }
    }

    pub(crate) fn snapshot(&self) -> ListState<T> {
        self.lock().clone()
    }

    pub(crate) fn replace(&self, items: Vec<T>) {
        let mut state = self.lock();
        state.items = items;
        state.loading = false;
        state.error = None;
    }

    pub(crate) fn fail(&self, message: String) {
        let mut state = self.lock();
        state.loading = false;
        state.error = Some(message);
    }

    pub(crate) fn prepend(&self, item: T) {
        self.lock().items.insert(0, item);
    }

    /// Apply `f` to the cached entry with `id`, if any. Returns whether one matched.
    pub(crate) fn patch(&self, id: T::Id, f: impl FnOnce(&mut T)) -> bool {
        let mut state = self.lock();
        match state.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&self, id: T::Id) {
        self.lock().items.retain(|item| item.id() != id);
    }

    fn lock(&self) -> MutexGuard<'_, ListState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
